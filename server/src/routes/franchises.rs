use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use platform_api::{ApiError, ApiResult, MessageBody, parse_id};
use platform_db::franchises::{self, FranchiseDeletion};
use products_hr::FranchiseForm;
use tracing::{info, instrument};

use super::{db_error, dto::FranchiseResponse, validation_error};
use crate::http::AppState;

pub(crate) const NOT_FOUND: &str = "Franquia não encontrada";
const HAS_EMPLOYEES: &str = "Não é possível deletar franquia com funcionários vinculados";
const DELETED: &str = "Franquia deletada com sucesso";

#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<FranchiseResponse>>> {
    let rows = franchises::list(state.store.pool())
        .await
        .map_err(db_error)?;
    Ok(Json(rows.into_iter().map(FranchiseResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<FranchiseResponse>> {
    let id = parse_id(&id)?;
    let row = franchises::find(state.store.pool(), id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(Json(row.into()))
}

#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<FranchiseForm>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<FranchiseResponse>)> {
    let Json(form) = body?;
    let fields = form.validate().map_err(validation_error)?;
    let model = franchises::create(state.store.pool(), fields)
        .await
        .map_err(db_error)?;
    info!(franchise_id = model.id, "franchise created");
    Ok((
        StatusCode::CREATED,
        Json(FranchiseResponse::new(model, Vec::new())),
    ))
}

#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<FranchiseForm>, JsonRejection>,
) -> ApiResult<Json<FranchiseResponse>> {
    let id = parse_id(&id)?;
    let pool = state.store.pool();
    if !franchises::exists(pool, id).await.map_err(db_error)? {
        return Err(ApiError::not_found(NOT_FOUND));
    }
    let Json(form) = body?;
    let fields = form.validate().map_err(validation_error)?;
    let row = franchises::update(pool, id, fields)
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    info!(franchise_id = id, "franchise updated");
    Ok(Json(row.into()))
}

#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageBody>> {
    let id = parse_id(&id)?;
    match franchises::delete(state.store.pool(), id)
        .await
        .map_err(db_error)?
    {
        FranchiseDeletion::Deleted => {
            info!(franchise_id = id, "franchise deleted");
            Ok(MessageBody::new(DELETED))
        }
        FranchiseDeletion::NotFound => Err(ApiError::not_found(NOT_FOUND)),
        FranchiseDeletion::HasEmployees(employees) => {
            info!(franchise_id = id, employees, "refused to delete franchise with employees");
            Err(ApiError::invalid(HAS_EMPLOYEES))
        }
    }
}
