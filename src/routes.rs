use std::time::Instant;

use actix_files::NamedFile;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use log::{error, info};

use crate::inference::{self, Classifier};
use crate::models::{ApiResponse, PredictionResult, RawRecord};
use crate::normalize::normalize;

#[get("/")]
pub async fn index(req: HttpRequest) -> impl Responder {
    match NamedFile::open_async("./static/index.html").await {
        Ok(file) => file.into_response(&req),
        Err(_) => HttpResponse::InternalServerError().body("Failed to load interface"),
    }
}

#[get("/api/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success("Churn prediction API is up"))
}

#[get("/api/model-info")]
pub async fn model_info(model: web::Data<dyn Classifier>) -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success(model.model_info()))
}

#[post("/api/predict")]
pub async fn predict(
    model: web::Data<dyn Classifier>,
    body: web::Json<RawRecord>,
) -> impl Responder {
    let start_time = Instant::now();
    info!("Prediction request received");

    // Unparsable numeric fields coerce to 0 here; no per-field errors exist.
    let record = normalize(body.into_inner());
    let model = model.into_inner();

    match web::block(move || inference::run_prediction(model.as_ref(), &record)).await {
        Ok(Ok(result)) => {
            info!(
                "Prediction: {} with probability {:.3}",
                result.outcome, result.probability
            );
            let mut response = ApiResponse::success(result);
            response.execution_time_ms = Some(start_time.elapsed().as_millis() as u64);
            HttpResponse::Ok().json(response)
        }
        Ok(Err(e)) => {
            error!("Prediction failed: {}", e);
            let mut response =
                ApiResponse::<PredictionResult>::error(&format!("Internal error: {}", e));
            response.execution_time_ms = Some(start_time.elapsed().as_millis() as u64);
            HttpResponse::InternalServerError().json(response)
        }
        Err(e) => {
            error!("Blocking execution failed: {}", e);
            let mut response = ApiResponse::<PredictionResult>::error("Execution error");
            response.execution_time_ms = Some(start_time.elapsed().as_millis() as u64);
            HttpResponse::InternalServerError().json(response)
        }
    }
}

pub async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(ApiResponse::<String>::error("Endpoint not found"))
}
