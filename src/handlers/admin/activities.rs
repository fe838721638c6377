//! Admin activity feed.

use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult};
use crate::models::activity::{ActivityEntry, COLLECTION};
use crate::state::AppState;
use crate::store::ListQuery;

/// GET /api/admin/activities - audit records, newest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ActivityEntry>> {
    let docs = state
        .store
        .list(COLLECTION, ListQuery::all().order_desc("created_at"))
        .await?;

    let entries = docs
        .iter()
        .map(|d| d.decode::<ActivityEntry>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ApiResponse::success(entries))
}
