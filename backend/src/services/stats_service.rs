use crate::models::{
    UserRequest, UserResult, VideoAverages, VideoStat, CHANNEL_NOT_FOUND_MESSAGE,
    FETCH_FAILED_MESSAGE,
};
use crate::services::youtube_service::VideoPlatform;
use crate::utils::{normalize_handle, round_to_two_decimals};
use anyhow::Result;
use futures::future::{join_all, try_join_all};
use log::{error, info, warn};

/// Fetch and aggregate channel statistics for every request.
///
/// All users run concurrently and the output keeps the input order. A failure for
/// one user becomes an error entry in its slot and never affects the others.
pub async fn aggregate<P: VideoPlatform>(
    platform: &P,
    requests: &[UserRequest],
) -> Vec<UserResult> {
    info!("Aggregating channel statistics for {} users", requests.len());

    let results = join_all(
        requests
            .iter()
            .map(|request| fetch_user_stats(platform, &request.username)),
    )
    .await;

    let failed = results.iter().filter(|result| result.error.is_some()).count();
    info!(
        "Finished aggregation: {} succeeded, {failed} with errors",
        results.len() - failed
    );
    results
}

async fn fetch_user_stats<P: VideoPlatform>(platform: &P, username: &str) -> UserResult {
    match collect_user_stats(platform, username).await {
        Ok(result) => result,
        Err(e) => {
            error!("Error fetching data for {username}: {e:?}");
            UserResult::failed(username, FETCH_FAILED_MESSAGE)
        }
    }
}

async fn collect_user_stats<P: VideoPlatform>(
    platform: &P,
    username: &str,
) -> Result<UserResult> {
    let handle = normalize_handle(username);

    let Some(channel) = platform.find_channel(&handle).await? else {
        warn!("No channel found for handle '{handle}'");
        return Ok(UserResult::failed(username, CHANNEL_NOT_FOUND_MESSAGE));
    };
    info!("Resolved '{handle}' to channel {}", channel.channel_id);

    let video_ids = platform.recent_video_ids(&channel.channel_id).await?;
    let Some(latest_video_id) = video_ids.first().cloned() else {
        warn!("Channel {} has no videos", channel.channel_id);
        return Ok(UserResult::without_videos(username, &channel));
    };

    // One failing video fails the whole user.
    let videos = try_join_all(video_ids.iter().map(|id| platform.video_stat(id))).await?;

    let averages = compute_averages(&videos);
    Ok(UserResult::with_stats(
        username,
        &channel,
        &averages,
        Some(latest_video_id),
    ))
}

pub fn compute_averages(videos: &[VideoStat]) -> VideoAverages {
    if videos.is_empty() {
        return VideoAverages::default();
    }

    let count = videos.len() as f64;
    // Counts are provider-controlled and may be anywhere up to u64::MAX.
    let total_views: u128 = videos
        .iter()
        .map(|video| u128::from(video.view_count))
        .sum();
    let total_likes: u128 = videos
        .iter()
        .map(|video| u128::from(video.like_count))
        .sum();
    let total_comments: u128 = videos
        .iter()
        .map(|video| u128::from(video.comment_count))
        .sum();

    let average_views = total_views as f64 / count;
    let average_likes = total_likes as f64 / count;
    let average_comments = total_comments as f64 / count;

    VideoAverages {
        number_of_videos: videos.len(),
        average_views,
        average_likes,
        average_comments,
        engagement_rate: engagement_rate(average_views, average_likes, average_comments),
    }
}

pub fn engagement_rate(average_views: f64, average_likes: f64, average_comments: f64) -> f64 {
    if average_views == 0.0 {
        return 0.0;
    }
    round_to_two_decimals((average_likes + average_comments) / average_views * 100.0)
}
