use crate::models::{ChannelSummary, VideoStat};
use crate::utils::parse_count;
use anyhow::{anyhow, Result};
use log::debug;
use reqwest::Client;
use serde_json::Value;

/// Page size of the recent-videos search. Only the first page is ever requested.
pub const RECENT_VIDEOS_LIMIT: usize = 10;

/// The three lookups the aggregation pipeline needs from the video platform.
#[rocket::async_trait]
pub trait VideoPlatform: Send + Sync {
    /// `Ok(None)` when the handle does not resolve to a channel.
    async fn find_channel(&self, handle: &str) -> Result<Option<ChannelSummary>>;

    /// Ids of the channel's most recent videos, newest first.
    async fn recent_video_ids(&self, channel_id: &str) -> Result<Vec<String>>;

    async fn video_stat(&self, video_id: &str) -> Result<VideoStat>;
}

/// YouTube Data API v3 client bound to one API key.
pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(client: Client, base_url: &str, api_key: &str) -> Self {
        YouTubeClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn get_json(&self, resource: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}/{resource}", self.base_url);
        debug!("GET {url} {params:?}");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?
            .json::<Value>()
            .await?;

        // Quota and key problems come back as an `error` object instead of `items`.
        if let Some(error) = response.get("error") {
            let message = error["message"].as_str().unwrap_or("unknown error");
            return Err(anyhow!("YouTube API error on /{resource}: {message}"));
        }

        Ok(response)
    }
}

#[rocket::async_trait]
impl VideoPlatform for YouTubeClient {
    // Documentation: https://developers.google.com/youtube/v3/docs/channels/list
    async fn find_channel(&self, handle: &str) -> Result<Option<ChannelSummary>> {
        let response = self
            .get_json(
                "channels",
                &[("part", "snippet,statistics"), ("forHandle", handle)],
            )
            .await?;

        let Some(channel) = response["items"].as_array().and_then(|items| items.first()) else {
            return Ok(None);
        };

        let channel_id = channel["id"]
            .as_str()
            .ok_or_else(|| anyhow!("Channel item for handle {handle} has no id"))?;
        let statistics = &channel["statistics"];

        Ok(Some(ChannelSummary {
            channel_id: channel_id.to_string(),
            subscriber_count: parse_count(&statistics["subscriberCount"]),
            total_views: parse_count(&statistics["viewCount"]),
            video_count: parse_count(&statistics["videoCount"]),
            thumbnail_url: channel["snippet"]["thumbnails"]["high"]["url"]
                .as_str()
                .map(str::to_string),
        }))
    }

    // Documentation: https://developers.google.com/youtube/v3/docs/search/list
    async fn recent_video_ids(&self, channel_id: &str) -> Result<Vec<String>> {
        let max_results = RECENT_VIDEOS_LIMIT.to_string();
        let response = self
            .get_json(
                "search",
                &[
                    ("part", "id"),
                    ("channelId", channel_id),
                    ("order", "date"),
                    ("type", "video"),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;

        let video_ids = response["items"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item["id"]["videoId"].as_str())
                    .take(RECENT_VIDEOS_LIMIT)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(video_ids)
    }

    // Documentation: https://developers.google.com/youtube/v3/docs/videos/list
    async fn video_stat(&self, video_id: &str) -> Result<VideoStat> {
        let response = self
            .get_json("videos", &[("part", "statistics"), ("id", video_id)])
            .await?;

        let video = response["items"]
            .as_array()
            .and_then(|items| items.first())
            .ok_or_else(|| anyhow!("No statistics returned for video {video_id}"))?;
        let statistics = &video["statistics"];

        Ok(VideoStat {
            video_id: video["id"].as_str().unwrap_or(video_id).to_string(),
            view_count: parse_count(&statistics["viewCount"]),
            like_count: parse_count(&statistics["likeCount"]),
            comment_count: parse_count(&statistics["commentCount"]),
        })
    }
}
