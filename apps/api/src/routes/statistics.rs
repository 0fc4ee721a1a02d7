use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::ranking::Statistics;
use crate::rankings::repository::fetch_statistics;
use crate::state::AppState;

/// GET /api/v1/statistics
/// Active candidate and job counts, stored ranking rows and average experience.
pub async fn statistics_handler(
    State(state): State<AppState>,
) -> Result<Json<Statistics>, AppError> {
    Ok(Json(fetch_statistics(&state.db).await?))
}
