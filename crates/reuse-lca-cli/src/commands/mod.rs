pub mod compute;
pub mod panel;
