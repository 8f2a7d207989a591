use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::ReceiptError;

pub struct ApiError(pub ReceiptError);

impl From<ReceiptError> for ApiError {
    fn from(err: ReceiptError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ReceiptError::Validation(_) | ReceiptError::MalformedPayload(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            ReceiptError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            // Logged where it happened; details stay server-side
            ReceiptError::IdentifierGenerationFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        };

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
