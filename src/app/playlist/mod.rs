mod api;

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::duration::parse_duration;
use super::error::StatsError;

pub(crate) use api::YouTubeApi;

/// Upper bound for both page size and detail batch size.
pub(crate) const MAX_BATCH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlaylistItem {
    pub(crate) item_id: String,
    pub(crate) video_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ItemsPage {
    pub(crate) items: Vec<PlaylistItem>,
    pub(crate) next_page_token: Option<String>,
}

/// Raw detail record; `duration` is still the compact `PT..` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VideoDetails {
    pub(crate) video_id: String,
    pub(crate) duration: String,
}

/// Read-only access to the listing and detail endpoints.
pub(crate) trait PlaylistSource {
    fn playlist_items_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<ItemsPage, StatsError>;

    /// `video_ids` holds at most [`MAX_BATCH`] entries. Result order is unspecified and
    /// videos the endpoint cannot see are simply absent.
    fn video_details(&self, video_ids: &[&str]) -> Result<Vec<VideoDetails>, StatsError>;
}

pub(crate) fn list_all_items<S: PlaylistSource + ?Sized>(
    source: &S,
    playlist_id: &str,
) -> Result<Vec<PlaylistItem>, StatsError> {
    let mut items = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0_usize;

    loop {
        let page = source.playlist_items_page(playlist_id, page_token.as_deref())?;
        pages += 1;
        debug!(page = pages, items = page.items.len(), "fetched playlist page");
        items.extend(page.items);

        match page.next_page_token {
            Some(token) if !token.is_empty() => page_token = Some(token),
            _ => break,
        }
    }

    Ok(items)
}

/// Durations in seconds keyed by video id. Each distinct id is requested once.
pub(crate) fn fetch_durations<S: PlaylistSource + ?Sized>(
    source: &S,
    video_ids: &[&str],
) -> Result<HashMap<String, u64>, StatsError> {
    let mut seen = HashSet::new();
    let unique: Vec<&str> = video_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();

    let mut durations = HashMap::with_capacity(unique.len());
    for batch in unique.chunks(MAX_BATCH) {
        let details = source.video_details(batch)?;
        debug!(
            requested = batch.len(),
            returned = details.len(),
            "fetched video details"
        );
        for detail in details {
            let seconds = parse_duration(&detail.duration)?;
            durations.insert(detail.video_id, seconds);
        }
    }

    Ok(durations)
}

/// Accepts a playlist URL (anything carrying a `list=` parameter) or a bare playlist id.
pub(crate) fn extract_playlist_id(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let id_start = ["?list=", "&list="]
        .into_iter()
        .filter_map(|marker| trimmed.find(marker).map(|pos| pos + marker.len()))
        .min();
    if let Some(id_start) = id_start {
        let id = trimmed[id_start..]
            .split(['&', '#'])
            .next()
            .unwrap_or_default();
        return (!id.is_empty()).then(|| id.to_string());
    }

    let is_bare_id = !trimmed
        .chars()
        .any(|ch| ch.is_whitespace() || matches!(ch, '/' | '?' | '&' | '=' | '#'));
    is_bare_id.then(|| trimmed.to_string())
}
