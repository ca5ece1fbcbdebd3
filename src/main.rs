use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{web, App, HttpServer};
use log::{error, info};

use churn_api::inference::{Classifier, OnnxClassifier};
use churn_api::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    info!("🚀 Starting bank customer churn prediction API");

    // The model is loaded once, before the server binds. Missing or broken
    // artifact is fatal: no prediction path exists without a model.
    let model_path =
        std::env::var("MODEL_PATH").unwrap_or_else(|_| "models/churn.onnx".to_string());
    let model: Arc<dyn Classifier> = match OnnxClassifier::load(&model_path) {
        Ok(model) => {
            info!("✅ Model loaded from {}", model_path);
            Arc::new(model)
        }
        Err(e) => {
            error!("❌ {}", e);
            std::process::exit(1);
        }
    };
    let model_data: web::Data<dyn Classifier> = web::Data::from(model);

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let workers = std::env::var("WORKERS")
        .ok()
        .and_then(|w| w.parse::<usize>().ok())
        .unwrap_or_else(num_cpus::get);

    let bind_address = format!("{}:{}", host, port);

    info!("🌐 Server listening on http://{}", bind_address);
    info!("👷 Workers: {}", workers);
    info!("📊 Form available at http://{}/", bind_address);
    info!("🔧 API endpoints:");
    info!("   GET  /api/health      - liveness check");
    info!("   GET  /api/model-info  - model descriptor");
    info!("   POST /api/predict     - churn prediction");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:8080")
            .allowed_origin("http://127.0.0.1:8080")
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .wrap(cors)
            .app_data(model_data.clone())
            .app_data(web::JsonConfig::default().limit(64 * 1024))
            .service(routes::health)
            .service(routes::model_info)
            .service(routes::predict)
            .service(routes::index)
            .service(Files::new("/static", "./static").prefer_utf8(true))
            .default_service(web::route().to(routes::not_found))
    })
    .workers(workers)
    .bind(&bind_address)?
    .run()
    .await
}
