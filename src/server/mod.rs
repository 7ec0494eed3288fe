use crate::consts::{CHANNELS, IMAGE_SIZE, RUN_ERROR_MESSAGE};
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use tracing::error;

mod protocol;
pub mod routes;

/// The one client-facing error type. Shape mismatches surface verbatim with
/// a 400; every other failure is logged and collapsed into a fixed opaque
/// 500 so internals never leak to the caller.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Client error: the submitted image does not decode to 256x256 RGB
    pub fn invalid_image_size(height: u32, width: u32) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            message: format!(
                "Invalid image size. Expected ({s}, {s}, {c}), got ({height}, {width}, {c})",
                s = IMAGE_SIZE,
                c = CHANNELS,
            ),
        }
    }

    /// Server error: the cause is logged here and never serialized
    pub fn run_failure<E: Into<anyhow::Error>>(err: E) -> Self {
        error!("error during model run: {:#}", err.into());
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: RUN_ERROR_MESSAGE.to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl actix_web::error::ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(protocol::ExceptionResponse {
                message: self.message.clone(),
            })
    }

    fn status_code(&self) -> StatusCode {
        self.status
    }
}
