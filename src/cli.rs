use std::num::NonZeroUsize;

use clap::{Parser, Subcommand};

use crate::app::{EndIndex, PlaybackSpeed};

#[derive(Debug, Parser)]
#[command(
    name = "pltime",
    version,
    about = "Estimate watch time for a YouTube playlist range"
)]
pub struct Cli {
    /// API key to use instead of the stored one.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save the YouTube Data API key.
    SetKey { key: String },
    /// Show the stored API key (masked).
    ShowKey,
    /// Forget the stored API key.
    ClearKey,
    /// Remember a playlist (URL or ID) as the current one.
    Use { playlist: String },
    /// List every item of a playlist in order.
    Items { playlist: Option<String> },
    /// Compute watch-time stats for a range of a playlist.
    Stats {
        playlist: Option<String>,
        /// First video to include (1-based).
        #[arg(long, default_value_t = NonZeroUsize::MIN)]
        start: NonZeroUsize,
        /// Last video to include (1-based), or `-1`/`last` for the end of the playlist.
        #[arg(long, default_value = "last", allow_hyphen_values = true)]
        end: EndIndex,
        /// Playback speed multiplier.
        #[arg(long, default_value = "1")]
        speed: PlaybackSpeed,
        /// Print the full result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Interactive range picker.
    Tui { playlist: Option<String> },
}
