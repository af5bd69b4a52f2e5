//! Recent jobs listing for the dashboard.

use axum::extract::State;
use axum::Json;

use faceless_models::JobSummary;

use crate::error::ApiResult;
use crate::state::AppState;

/// How many jobs the dashboard history shows.
const RECENT_JOBS_LIMIT: usize = 12;

/// GET /api/jobs/recent
///
/// Most recently created jobs first, capped at twelve.
pub async fn list_recent_jobs(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<JobSummary>>> {
    let summaries = state.store.list_recent(RECENT_JOBS_LIMIT).await;
    Ok(Json(summaries))
}
