use std::fmt;

use thiserror::Error;

use super::duration::ParseDurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    PlaylistItems,
    Videos,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlaylistItems => f.write_str("playlist items"),
            Self::Videos => f.write_str("video details"),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum StatsError {
    #[error("failed to fetch {endpoint}: {detail}")]
    Retrieval { endpoint: Endpoint, detail: String },
    #[error(transparent)]
    Parse(#[from] ParseDurationError),
    #[error("no videos in the selected range")]
    EmptySelection,
    #[error("total duration of the selected videos is too large to represent")]
    DurationOverflow,
}

impl StatsError {
    pub(crate) fn retrieval(endpoint: Endpoint, detail: impl Into<String>) -> Self {
        Self::Retrieval {
            endpoint,
            detail: detail.into(),
        }
    }
}
