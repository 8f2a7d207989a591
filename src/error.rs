use thiserror::Error;

use crate::id::IdError;
use crate::scoring::ValidationError;

#[derive(Debug, Error)]
pub enum ReceiptError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("malformed receipt payload: {0}")]
    MalformedPayload(String),

    #[error(transparent)]
    IdentifierGenerationFailed(#[from] IdError),

    #[error("no receipt found for id '{0}'")]
    NotFound(String),
}

impl ReceiptError {
    /// True when the caller must correct the request; false for internal failures.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ReceiptError::IdentifierGenerationFailed(_))
    }
}

pub type ReceiptResult<T> = Result<T, ReceiptError>;
