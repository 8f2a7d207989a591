use rust_decimal::Decimal;
use thiserror::Error;

use super::rules::parse_amount;
use crate::receipt::Receipt;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid total value: '{0}'")]
    InvalidTotal(String),
}

/// Check a submitted receipt before scoring.
///
/// Only structural completeness and the total are checked. Item fields and
/// the purchase time are left to the scoring rules, which tolerate bad values.
pub fn validate_receipt(receipt: Receipt) -> Result<Receipt, ValidationError> {
    if receipt.retailer.is_empty() {
        return Err(ValidationError::MissingField("retailer"));
    }
    if receipt.purchase_date.is_empty() {
        return Err(ValidationError::MissingField("purchaseDate"));
    }
    if receipt.items.is_empty() {
        return Err(ValidationError::MissingField("items"));
    }

    match parse_amount(&receipt.total) {
        Ok(total) if total > Decimal::ZERO => Ok(receipt),
        _ => Err(ValidationError::InvalidTotal(receipt.total)),
    }
}
