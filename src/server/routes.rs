//! The user-facing JSON web server that listens for segmentation requests.
//! Decodes the submitted image, validates its shape, and hands it to the
//! torch pipeline.

use super::protocol::{PredRequest, PredResponse};
use super::ApiError;
use crate::consts::{GREETING, IMAGE_SIZE};
use crate::settings::Settings;
use crate::torch::SegmentationModel;
use actix_web::{get, post, web, Responder};
use base64::{engine::general_purpose, Engine as _};
use serde_json::json;
use tracing::info;

type Result<T> = std::result::Result<T, ApiError>;

#[get("/")]
pub async fn root() -> impl Responder {
    web::Json(json!({ "message": GREETING }))
}

#[post("/segment")]
pub async fn segment(
    req: web::Json<PredRequest>,
    settings: web::Data<Settings>,
) -> Result<impl Responder> {
    // Parse the input request
    let bytes = general_purpose::STANDARD
        .decode(&req.img_base64)
        .map_err(ApiError::run_failure)?;
    let rgb = image::load_from_memory(&bytes)
        .map_err(ApiError::run_failure)?
        .to_rgb8();

    let (width, height) = rgb.dimensions();
    if (width, height) != (IMAGE_SIZE, IMAGE_SIZE) {
        return Err(ApiError::invalid_image_size(height, width));
    }

    // The weights file is re-read on every request, mirroring the original
    // service. Caching the loaded module is the obvious followup.
    let mask = SegmentationModel::load(&settings.model_path)
        .and_then(|model| model.segment(&rgb))
        .map_err(ApiError::run_failure)?;

    info!("finished serving segmentation request");

    Ok(web::Json(PredResponse { mask }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::RUN_ERROR_MESSAGE;
    use crate::server::protocol::ExceptionResponse;
    use actix_web::{test, App};
    use image::{DynamicImage, ImageOutputFormat, RgbImage};
    use std::io::Cursor;

    fn png_base64(width: u32, height: u32) -> String {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
            .unwrap();
        general_purpose::STANDARD.encode(buf)
    }

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(Settings::default()))
                    .service(root)
                    .service(segment),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn root_returns_greeting() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["message"], GREETING);
    }

    #[actix_web::test]
    async fn wrong_resolution_is_a_client_error() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/segment")
            .set_json(PredRequest {
                img_base64: png_base64(128, 128),
            })
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 400);

        let body: ExceptionResponse = test::read_body_json(res).await;
        assert!(body.message.contains("Invalid image size"));
        assert!(body.message.contains("(128, 128, 3)"));
    }

    #[actix_web::test]
    async fn malformed_base64_is_opaque() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/segment")
            .set_json(PredRequest {
                img_base64: "definitely%%not//base64==".into(),
            })
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 500);

        let body: ExceptionResponse = test::read_body_json(res).await;
        assert_eq!(body.message, RUN_ERROR_MESSAGE);
    }

    #[actix_web::test]
    async fn undecodable_image_bytes_are_opaque() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/segment")
            .set_json(PredRequest {
                img_base64: general_purpose::STANDARD.encode(b"not an image"),
            })
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 500);

        let body: ExceptionResponse = test::read_body_json(res).await;
        assert_eq!(body.message, RUN_ERROR_MESSAGE);
    }
}
