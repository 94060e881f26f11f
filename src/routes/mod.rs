//! HTTP adapters over the service layer.

use actix_web::error::{InternalError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod api;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps a service failure onto its HTTP status with a JSON `{"error": ...}` body.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    let body = ErrorBody {
        error: err.to_string(),
    };
    match err {
        ServiceError::InvalidRange(_)
        | ServiceError::InvalidDate(_)
        | ServiceError::MissingParameter(_)
        | ServiceError::TypeConstraint(_)
        | ServiceError::Form(_) => HttpResponse::BadRequest().json(body),
        ServiceError::NotFound(_) => HttpResponse::NotFound().json(body),
        ServiceError::StoreUnavailable => HttpResponse::ServiceUnavailable().json(body),
        ServiceError::Internal => HttpResponse::InternalServerError().json(body),
    }
}

/// Query-string extractor settings answering malformed parameters in the API's
/// error format.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        let response = error_response(&ServiceError::Form(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

/// Registers every API route under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(query_config())
            .service(api::api_v1_vessels)
            .service(api::api_v1_vessel)
            .service(api::api_v1_records)
            .service(api::api_v1_records_by_year)
            .service(api::api_v1_records_by_months)
            .service(api::api_v1_records_by_range)
            .service(api::api_v1_records_by_month_window)
            .service(api::api_v1_season_chart),
    );
}
