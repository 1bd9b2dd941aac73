use crate::models::{ErrorResponse, StatsRequest, UserResult};
use crate::services::stats_service;
use crate::services::youtube_service::YouTubeClient;
use crate::AppState;
use log::{info, warn};
use rocket::serde::json::Json;
use rocket::{post, State};

#[post("/stats", format = "json", data = "<request>")]
pub async fn channel_stats(
    state: &State<AppState>,
    request: Json<StatsRequest>,
) -> Result<Json<Vec<UserResult>>, ErrorResponse> {
    let request = request.into_inner();
    if let Err(e) = request.validate() {
        warn!("Rejected stats request: {}", e.message);
        return Err(e);
    }

    // The key is read once per batch and shared by every lookup in it.
    let platform = YouTubeClient::new(
        state.http_client.clone(),
        &state.youtube.base_url,
        &state.youtube.api_key,
    );

    let results = stats_service::aggregate(&platform, &request.users).await;
    info!("Returning statistics for {} channels", results.len());
    Ok(Json(results))
}
