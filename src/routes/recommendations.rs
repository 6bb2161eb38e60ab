use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::{RequestId, Requester},
    models::Recommendation,
    routes::AppState,
    services::Recommender,
};

/// Handler for the job recommendation endpoint
///
/// The requester's profile is validated before the job pool is loaded, so
/// an unknown requester or an incomplete profile never touches the job store.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    requester: Requester,
) -> AppResult<Json<Recommendation>> {
    let profile = state.users.get(requester.0).await?;
    Recommender::validate(profile.as_ref())?;
    let jobs = state.jobs.list_all().await?;

    tracing::info!(
        request_id = %request_id,
        requester_id = %requester.0,
        pool_size = jobs.len(),
        "Processing recommendation request"
    );

    let recommendation = state.recommender.recommend(profile.as_ref(), jobs).await?;

    tracing::info!(
        request_id = %request_id,
        matches = recommendation.matches.len(),
        "Recommendation completed"
    );

    Ok(Json(recommendation))
}
