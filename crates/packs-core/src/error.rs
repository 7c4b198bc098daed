//! Error types for catalog and order validation

use thiserror::Error;

/// Errors raised at the allocation boundary.
///
/// Both kinds are input-validation failures: they are detected before any
/// computation or state change, and retrying with the same input can never
/// succeed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackError {
    #[error("Invalid pack catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid order amount {0}: must be greater than zero")]
    InvalidAmount(i64),
}

pub type Result<T> = std::result::Result<T, PackError>;

/// Validate an order amount coming in from a caller.
pub(crate) fn validate_amount(amount: i64) -> Result<u64> {
    if amount <= 0 {
        return Err(PackError::InvalidAmount(amount));
    }
    Ok(amount as u64)
}
