use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use segserve::server::routes;
use segserve::settings::Settings;
use std::io;
use tracing::info;

#[actix_web::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt::init();

    let settings = Settings::load().map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    info!(
        "starting segmentation server on {}:{} (model: {})",
        settings.host, settings.port, settings.model_path
    );

    let bind = (settings.host.clone(), settings.port);
    let settings = web::Data::new(settings);

    // Start the HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .app_data(settings.clone())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .service(routes::root)
            .service(routes::segment)
    })
    .bind(bind)?
    .run()
    .await
}
