use actix_web::{HttpResponse, Responder, get, web};

use crate::forms::records::{
    AllRecordsForm, MonthRecordsForm, MonthWindowRecordsForm, RangeRecordsForm, RecordsQuery,
    RecordsQueryFormError, SeasonChartForm, YearRecordsForm,
};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::charts::season_chart as season_chart_service;
use crate::services::records::RecordQueryService;
use crate::services::vessels::{
    get_vessel as get_vessel_service, list_vessels as list_vessels_service,
};

fn records_response(
    query: Result<RecordsQuery, RecordsQueryFormError>,
    repo: &DieselRepository,
) -> HttpResponse {
    let query = match query {
        Ok(query) => query,
        Err(e) => return error_response(&e.into()),
    };

    let service = RecordQueryService::new(repo);
    match service.query_records(&query.mode, query.vessel.as_deref(), query.page) {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => error_response(&e),
    }
}

#[get("/v1/vessels")]
pub async fn api_v1_vessels(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_vessels_service(repo.get_ref()) {
        Ok(vessels) => HttpResponse::Ok().json(vessels),
        Err(e) => error_response(&e),
    }
}

#[get("/v1/vessels/{vessel_id}")]
pub async fn api_v1_vessel(
    vessel_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match get_vessel_service(repo.get_ref(), vessel_id.into_inner()) {
        Ok(vessel) => HttpResponse::Ok().json(vessel),
        Err(e) => error_response(&e),
    }
}

#[get("/v1/records")]
pub async fn api_v1_records(
    params: web::Query<AllRecordsForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    records_response(params.into_inner().parse(), repo.get_ref())
}

#[get("/v1/records/year")]
pub async fn api_v1_records_by_year(
    params: web::Query<YearRecordsForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    records_response(params.into_inner().parse(), repo.get_ref())
}

#[get("/v1/records/months")]
pub async fn api_v1_records_by_months(
    params: web::Query<MonthRecordsForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    records_response(params.into_inner().parse(), repo.get_ref())
}

#[get("/v1/records/range")]
pub async fn api_v1_records_by_range(
    params: web::Query<RangeRecordsForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    records_response(params.into_inner().parse(), repo.get_ref())
}

#[get("/v1/records/daterange")]
pub async fn api_v1_records_by_month_window(
    params: web::Query<MonthWindowRecordsForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    records_response(params.into_inner().parse(), repo.get_ref())
}

#[get("/v1/charts/season")]
pub async fn api_v1_season_chart(
    params: web::Query<SeasonChartForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let query = match params.into_inner().parse() {
        Ok(query) => query,
        Err(e) => return error_response(&e.into()),
    };

    match season_chart_service(
        repo.get_ref(),
        query.start_month,
        query.end_month,
        &query.vessel,
    ) {
        Ok(chart) => HttpResponse::Ok().json(chart),
        Err(e) => error_response(&e),
    }
}
