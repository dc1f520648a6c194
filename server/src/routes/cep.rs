use axum::{
    Json,
    extract::{Path, State},
};
use platform_api::{ApiError, ApiResult};
use products_hr::normalize_cep;
use tracing::instrument;

use crate::{cep::Address, http::AppState};

const NOT_FOUND: &str = "CEP não encontrado";
const LOOKUP_FAILED: &str = "Erro ao consultar o CEP";

#[instrument(skip(state))]
pub async fn lookup(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> ApiResult<Json<Address>> {
    let cep = normalize_cep(&raw).map_err(|err| ApiError::invalid(err.to_string()))?;
    state
        .cep
        .lookup(&cep)
        .await
        .map_err(|err| ApiError::internal_with(LOOKUP_FAILED, err))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}
