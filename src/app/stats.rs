use std::fmt;
use std::str::FromStr;

use serde_json::{Value, json};
use tracing::{info, warn};

use super::duration::format_duration;
use super::error::StatsError;
use super::playlist::{PlaylistSource, fetch_durations, list_all_items};
use super::range::RangeSelection;

/// Playback rate multiplier. Always finite and at least [`PlaybackSpeed::MIN`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSpeed(f64);

impl PlaybackSpeed {
    pub(crate) const NORMAL: Self = Self(1.0);
    pub(crate) const MIN: f64 = 0.1;

    pub(crate) fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= Self::MIN).then_some(Self(value))
    }

    pub(crate) fn get(self) -> f64 {
        self.0
    }

    pub(crate) fn is_normal(self) -> bool {
        self.0 == 1.0
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl FromStr for PlaybackSpeed {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let value = trimmed
            .strip_suffix(['x', 'X'])
            .unwrap_or(trimmed)
            .parse::<f64>()
            .map_err(|_| format!("invalid speed {raw:?}"))?;
        Self::new(value)
            .ok_or_else(|| format!("speed must be at least {}x, got {raw:?}", Self::MIN))
    }
}

impl fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StatsResult {
    pub(crate) total_videos: usize,
    pub(crate) selected_videos: usize,
    pub(crate) start_index: usize,
    pub(crate) end_index: usize,
    pub(crate) speed: PlaybackSpeed,
    pub(crate) total_seconds: u64,
    pub(crate) adjusted_seconds: f64,
    pub(crate) total_duration: String,
    pub(crate) adjusted_duration: String,
    pub(crate) average_duration: String,
    /// Selected items the detail endpoint did not return; counted as zero seconds.
    pub(crate) unavailable_videos: usize,
}

impl StatsResult {
    pub(crate) fn summary_rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![(
            "Selected Videos".to_string(),
            self.selected_videos.to_string(),
        )];
        if self.selected_videos < self.total_videos {
            rows.push((
                "Video Range".to_string(),
                format!(
                    "{} - {} (of {})",
                    self.start_index, self.end_index, self.total_videos
                ),
            ));
        }
        rows.push(("Total Duration".to_string(), self.total_duration.clone()));
        if !self.speed.is_normal() {
            rows.push((
                format!("Adjusted Duration ({}x)", self.speed),
                self.adjusted_duration.clone(),
            ));
        }
        rows.push((
            "Average Video Length".to_string(),
            self.average_duration.clone(),
        ));
        if self.unavailable_videos > 0 {
            rows.push((
                "Unavailable Videos".to_string(),
                self.unavailable_videos.to_string(),
            ));
        }
        rows
    }

    pub(crate) fn to_json(&self) -> Value {
        json!({
            "totalVideos": self.total_videos,
            "selectedVideos": self.selected_videos,
            "startIndex": self.start_index,
            "endIndex": self.end_index,
            "speed": self.speed.get(),
            "totalSeconds": self.total_seconds,
            "adjustedSeconds": self.adjusted_seconds,
            "totalDuration": self.total_duration,
            "adjustedDuration": self.adjusted_duration,
            "averageDuration": self.average_duration,
            "unavailableVideos": self.unavailable_videos,
        })
    }
}

pub(crate) fn compute_stats<S: PlaylistSource + ?Sized>(
    source: &S,
    playlist_id: &str,
    range: RangeSelection,
    speed: PlaybackSpeed,
) -> Result<StatsResult, StatsError> {
    let items = list_all_items(source, playlist_id)?;
    let selected = range.select(&items);
    if selected.is_empty() {
        return Err(StatsError::EmptySelection);
    }

    let video_ids: Vec<&str> = selected.iter().map(|item| item.video_id.as_str()).collect();
    let durations = fetch_durations(source, &video_ids)?;

    let mut total_seconds: u64 = 0;
    let mut unavailable_videos = 0;
    for video_id in &video_ids {
        match durations.get(*video_id) {
            Some(seconds) => {
                total_seconds = total_seconds
                    .checked_add(*seconds)
                    .ok_or(StatsError::DurationOverflow)?;
            }
            None => {
                warn!(video_id, "video details unavailable, counting as 0s");
                unavailable_videos += 1;
            }
        }
    }

    let selected_videos = selected.len();
    let adjusted_seconds = total_seconds as f64 / speed.get();
    if adjusted_seconds >= u64::MAX as f64 {
        return Err(StatsError::DurationOverflow);
    }
    let average_seconds = total_seconds / selected_videos as u64;
    info!(
        playlist_id,
        selected_videos, total_seconds, "computed playlist stats"
    );

    Ok(StatsResult {
        total_videos: items.len(),
        selected_videos,
        start_index: range.start,
        end_index: range.resolved_end(items.len()),
        speed,
        total_seconds,
        adjusted_seconds,
        total_duration: format_duration(total_seconds),
        adjusted_duration: format_duration(adjusted_seconds.floor() as u64),
        average_duration: format_duration(average_seconds),
        unavailable_videos,
    })
}
