//! Permissive parsing for user-edited numeric fields.
//!
//! Form fields and CLI flags arrive as free text. The policy, shared by
//! every input collaborator: trim surrounding whitespace, accept either
//! `.` or `,` as the decimal separator, and fall back to zero for empty
//! or unparsable text instead of failing the whole computation. The
//! engine itself only ever sees the resulting finite `Decimal`.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a numeric field leniently, falling back to zero.
pub fn lenient_decimal(text: &str) -> Decimal {
    let normalized = text.trim().replace(',', ".");
    Decimal::from_str(&normalized).unwrap_or(Decimal::ZERO)
}

/// Parse a cycle horizon leniently, coercing anything below 1 up to 1.
pub fn lenient_horizon(text: &str) -> u32 {
    text.trim().parse::<u32>().unwrap_or(1).max(1)
}
