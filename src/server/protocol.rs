use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Request body for `POST /segment`: an opaque base64-encoded image
#[derive(Serialize, Deserialize)]
pub struct PredRequest {
    pub img_base64: String,
}

impl Debug for PredRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PredRequest {{ img_base64: <data> }}")
    }
}

/// Successful response: the binary mask, PNG-encoded then base64-encoded
#[derive(Debug, Serialize, Deserialize)]
pub struct PredResponse {
    pub mask: String,
}

/// Uniform body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ExceptionResponse {
    pub message: String,
}
