use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::Responder;
use rocket::serde::{Deserialize, Serialize};
use rocket::{response, Response};
use std::io::Cursor;

pub const CHANNEL_NOT_FOUND_MESSAGE: &str =
    "Channel not found. Please check the username and try again.";
pub const NO_VIDEOS_MESSAGE: &str = "No videos found for this channel.";
pub const FETCH_FAILED_MESSAGE: &str = "An error occurred while fetching data.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRequest {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsRequest {
    pub users: Vec<UserRequest>,
}

impl StatsRequest {
    /// Rejects the whole batch if any entry has a blank username.
    pub fn validate(&self) -> Result<(), ErrorResponse> {
        if let Some(index) = self
            .users
            .iter()
            .position(|user| user.username.trim().is_empty())
        {
            return Err(ErrorResponse {
                error: "validation_error".to_string(),
                message: format!("users[{index}].username must be a non-empty string"),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSummary {
    pub channel_id: String,
    pub subscriber_count: u64,
    pub total_views: u64,
    pub video_count: u64,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoStat {
    pub video_id: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VideoAverages {
    pub number_of_videos: usize,
    pub average_views: f64,
    pub average_likes: f64,
    pub average_comments: f64,
    pub engagement_rate: f64,
}

/// One entry of the response array. Fields left as `None` are omitted from the JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResult {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_channel_views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_views: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_likes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_comments: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_videos: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_video_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UserResult {
    pub fn failed(username: &str, message: &str) -> Self {
        UserResult {
            username: username.to_string(),
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn with_stats(
        username: &str,
        channel: &ChannelSummary,
        averages: &VideoAverages,
        latest_video_id: Option<String>,
    ) -> Self {
        UserResult {
            username: username.to_string(),
            channel_thumbnail_url: channel.thumbnail_url.clone(),
            subscriber_count: Some(channel.subscriber_count),
            total_channel_views: Some(channel.total_views),
            video_count: Some(channel.video_count),
            average_views: Some(averages.average_views),
            average_likes: Some(averages.average_likes),
            average_comments: Some(averages.average_comments),
            number_of_videos: Some(averages.number_of_videos),
            engagement_rate: Some(averages.engagement_rate),
            latest_video_id,
            error: None,
        }
    }

    pub fn without_videos(username: &str, channel: &ChannelSummary) -> Self {
        UserResult {
            error: Some(NO_VIDEOS_MESSAGE.to_string()),
            ..Self::with_stats(username, channel, &VideoAverages::default(), None)
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl<'r> Responder<'r, 'static> for ErrorResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let json = serde_json::to_string(&self).map_err(|_| Status::InternalServerError)?;
        Response::build()
            .status(Status::BadRequest)
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}
