pub mod course_handler;

use actix_web::web;

use crate::errors::AppError;

pub use course_handler::{generate_course, health_check};

pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into());

    cfg.app_data(json_config)
        .service(generate_course)
        .service(health_check);
}
