use std::env;
use std::time::Duration;

use serde_json::Value;

use super::super::error::{Endpoint, StatsError};
use super::{ItemsPage, MAX_BATCH, PlaylistItem, PlaylistSource, VideoDetails};
use crate::http::get_text;

pub(crate) const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
const API_BASE_ENV: &str = "PLTIME_API_BASE";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const READ_TIMEOUT: Duration = Duration::from_secs(15);

/// YouTube Data API v3 client. Holds the credential for the lifetime of one operation.
#[derive(Debug, Clone)]
pub(crate) struct YouTubeApi {
    base_url: String,
    api_key: String,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl YouTubeApi {
    pub(crate) fn new(api_key: impl Into<String>) -> Self {
        let base_url = env::var(API_BASE_ENV)
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self::with_base_url(api_key, base_url)
    }

    pub(crate) fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            connect_timeout: CONNECT_TIMEOUT,
            read_timeout: READ_TIMEOUT,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_timeouts(mut self, connect: Duration, read: Duration) -> Self {
        self.connect_timeout = connect;
        self.read_timeout = read;
        self
    }

    fn get_json(
        &self,
        endpoint: Endpoint,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, StatsError> {
        let url = format!("{}/{path}", self.base_url);
        let body = get_text(&url, query, self.connect_timeout, self.read_timeout)
            .map_err(|err| StatsError::retrieval(endpoint, err))?;
        serde_json::from_str(&body)
            .map_err(|err| StatsError::retrieval(endpoint, format!("invalid JSON response: {err}")))
    }
}

impl PlaylistSource for YouTubeApi {
    fn playlist_items_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<ItemsPage, StatsError> {
        let max_results = MAX_BATCH.to_string();
        let mut query = vec![
            ("part", "contentDetails"),
            ("maxResults", max_results.as_str()),
            ("playlistId", playlist_id),
            ("key", self.api_key.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let value = self.get_json(Endpoint::PlaylistItems, "playlistItems", &query)?;
        parse_items_page(&value)
    }

    fn video_details(&self, video_ids: &[&str]) -> Result<Vec<VideoDetails>, StatsError> {
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = video_ids.join(",");
        let query = [
            ("part", "contentDetails"),
            ("id", ids.as_str()),
            ("key", self.api_key.as_str()),
        ];

        let value = self.get_json(Endpoint::Videos, "videos", &query)?;
        parse_video_details(&value)
    }
}

fn response_items(value: &Value, endpoint: Endpoint) -> Result<&[Value], StatsError> {
    match value.get("items") {
        Some(Value::Array(items)) => Ok(items.as_slice()),
        // An empty playlist may omit the field entirely.
        None | Some(Value::Null) => Ok(&[]),
        Some(_) => Err(StatsError::retrieval(
            endpoint,
            "response `items` is not an array",
        )),
    }
}

pub(crate) fn parse_items_page(value: &Value) -> Result<ItemsPage, StatsError> {
    let endpoint = Endpoint::PlaylistItems;
    let items = response_items(value, endpoint)?
        .iter()
        .map(|item| -> Result<PlaylistItem, StatsError> {
            let video_id = item
                .pointer("/contentDetails/videoId")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    StatsError::retrieval(endpoint, "playlist item without contentDetails.videoId")
                })?;
            let item_id = item.get("id").and_then(Value::as_str).unwrap_or_default();
            Ok(PlaylistItem {
                item_id: item_id.to_string(),
                video_id: video_id.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let next_page_token = value
        .get("nextPageToken")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(str::to_string);

    Ok(ItemsPage {
        items,
        next_page_token,
    })
}

pub(crate) fn parse_video_details(value: &Value) -> Result<Vec<VideoDetails>, StatsError> {
    let endpoint = Endpoint::Videos;
    response_items(value, endpoint)?
        .iter()
        .map(|item| -> Result<VideoDetails, StatsError> {
            let video_id = item.get("id").and_then(Value::as_str).ok_or_else(|| {
                StatsError::retrieval(endpoint, "video resource without an id")
            })?;
            let duration = item
                .pointer("/contentDetails/duration")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    StatsError::retrieval(
                        endpoint,
                        format!("video {video_id} has no contentDetails.duration"),
                    )
                })?;
            Ok(VideoDetails {
                video_id: video_id.to_string(),
                duration: duration.to_string(),
            })
        })
        .collect()
}
