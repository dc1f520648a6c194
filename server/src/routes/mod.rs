//! REST handlers mounted under `/api`.

mod cep;
mod dashboard;
mod dto;
mod employees;
mod franchises;

use axum::{Router, routing::get};
use platform_api::ApiError;
use products_hr::ValidationError;
use sea_orm::DbErr;

use crate::http::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/franquias", get(franchises::list).post(franchises::create))
        .route(
            "/franquias/{id}",
            get(franchises::show)
                .put(franchises::update)
                .delete(franchises::remove),
        )
        .route(
            "/funcionarios",
            get(employees::list).post(employees::create),
        )
        .route(
            "/funcionarios/{id}",
            get(employees::show)
                .put(employees::update)
                .delete(employees::remove),
        )
        .route("/viacep/{cep}", get(cep::lookup))
        .route("/dashboard", get(dashboard::show))
}

pub(crate) fn db_error(err: DbErr) -> ApiError {
    ApiError::internal(err)
}

pub(crate) fn validation_error(err: ValidationError) -> ApiError {
    ApiError::invalid(err.to_string())
}
