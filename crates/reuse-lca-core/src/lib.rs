pub mod amortization;
pub mod constants;
pub mod error;
pub mod parse;
pub mod types;

#[cfg(feature = "scenarios")]
pub mod scenarios;

pub use error::ReuseLcaError;
pub use types::*;

/// Standard result type for all reuse-lca operations
pub type ReuseLcaResult<T> = Result<T, ReuseLcaError>;
