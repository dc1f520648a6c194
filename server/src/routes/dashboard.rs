use axum::{Json, extract::State};
use platform_api::{ApiError, ApiResult};
use products_hr::{DashboardSnapshot, load_dashboard};
use tracing::{debug, instrument};

use crate::http::AppState;

#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> ApiResult<Json<DashboardSnapshot>> {
    let snapshot = load_dashboard(&state.store)
        .await
        .map_err(ApiError::internal)?;
    debug!(
        franchises = snapshot.total_franchises,
        employees = snapshot.total_employees,
        "dashboard computed"
    );
    Ok(Json(snapshot))
}
