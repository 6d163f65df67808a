//! API response types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::core::MinterError;

/// Response for a prepared mint transaction
#[derive(Debug, Serialize, Deserialize)]
pub struct MintResponse {
    pub message: String,
    /// Base64 transaction awaiting the wallet signature
    pub tx: String,
    #[serde(rename = "metadataURI")]
    pub metadata_uri: String,
}

/// Plain message body, used for errors
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for MinterError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            return (StatusCode::BAD_REQUEST, Json(MessageResponse::new(self.to_string())))
                .into_response();
        }

        tracing::error!("Request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse::new("Internal server error")),
        )
            .into_response()
    }
}
