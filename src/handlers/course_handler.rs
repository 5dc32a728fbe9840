use actix_web::{get, post, web, HttpResponse};
use serde_json::json;

use crate::{app_state::AppState, errors::AppError, models::dto::request::GenerateCourseRequest};

/// Generates a course, its sections and their lessons in one run.
#[post("/api/courses/generate")]
pub async fn generate_course(
    state: web::Data<AppState>,
    request: web::Json<GenerateCourseRequest>,
) -> Result<HttpResponse, AppError> {
    let report = state.course_generator.generate(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(report))
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    state.database.ping().await?;
    Ok(HttpResponse::Ok().json(json!({ "status": "ok" })))
}
