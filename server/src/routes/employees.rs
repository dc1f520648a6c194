use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use platform_api::{ApiError, ApiResult, MessageBody, parse_id};
use platform_db::{employees, franchises, is_unique_violation};
use products_hr::{EmployeeFields, EmployeeForm};
use sea_orm::DbErr;
use tracing::{info, instrument};

use super::{
    db_error, dto::EmployeeResponse, franchises::NOT_FOUND as FRANCHISE_NOT_FOUND,
    validation_error,
};
use crate::http::AppState;

const NOT_FOUND: &str = "Funcionário não encontrado";
const EMAIL_IN_USE: &str = "Email já está em uso";
const EMAIL_IN_USE_BY_OTHER: &str = "Email já está em uso por outro funcionário";
const DELETED: &str = "Funcionário deletado com sucesso";

#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<EmployeeResponse>>> {
    let rows = employees::list(state.store.pool())
        .await
        .map_err(db_error)?;
    Ok(Json(rows.into_iter().map(EmployeeResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<EmployeeResponse>> {
    let id = parse_id(&id)?;
    let row = employees::find(state.store.pool(), id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(Json(row.into()))
}

#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<EmployeeForm>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<EmployeeResponse>)> {
    let Json(form) = body?;
    let fields = form.validate().map_err(validation_error)?;
    let pool = state.store.pool();
    ensure_franchise(&state, &fields).await?;
    if employees::email_taken(pool, &fields.email, None)
        .await
        .map_err(db_error)?
    {
        return Err(ApiError::invalid(EMAIL_IN_USE));
    }
    let row = employees::create(pool, fields)
        .await
        .map_err(|err| write_error(err, EMAIL_IN_USE))?;
    info!(employee_id = row.employee.id, "employee created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<EmployeeForm>, JsonRejection>,
) -> ApiResult<Json<EmployeeResponse>> {
    let id = parse_id(&id)?;
    let pool = state.store.pool();
    if !employees::exists(pool, id).await.map_err(db_error)? {
        return Err(ApiError::not_found(NOT_FOUND));
    }
    let Json(form) = body?;
    let fields = form.validate().map_err(validation_error)?;
    ensure_franchise(&state, &fields).await?;
    if employees::email_taken(pool, &fields.email, Some(id))
        .await
        .map_err(db_error)?
    {
        return Err(ApiError::invalid(EMAIL_IN_USE_BY_OTHER));
    }
    let row = employees::update(pool, id, fields)
        .await
        .map_err(|err| write_error(err, EMAIL_IN_USE_BY_OTHER))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    info!(employee_id = id, "employee updated");
    Ok(Json(row.into()))
}

#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageBody>> {
    let id = parse_id(&id)?;
    if !employees::delete(state.store.pool(), id)
        .await
        .map_err(db_error)?
    {
        return Err(ApiError::not_found(NOT_FOUND));
    }
    info!(employee_id = id, "employee deleted");
    Ok(MessageBody::new(DELETED))
}

async fn ensure_franchise(state: &AppState, fields: &EmployeeFields) -> ApiResult<()> {
    let Some(franchise_id) = fields.franchise_id else {
        return Ok(());
    };
    if franchises::exists(state.store.pool(), franchise_id)
        .await
        .map_err(db_error)?
    {
        Ok(())
    } else {
        Err(ApiError::not_found(FRANCHISE_NOT_FOUND))
    }
}

// A concurrent insert can still trip the unique index after the pre-check.
fn write_error(err: DbErr, email_message: &'static str) -> ApiError {
    if is_unique_violation(&err) {
        ApiError::invalid(email_message)
    } else {
        db_error(err)
    }
}
