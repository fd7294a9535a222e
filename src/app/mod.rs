mod duration;
mod error;
mod playlist;
mod range;
mod stats;
mod tui;


use std::env;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};

use crate::cli::{Cli, Command};
use crate::db::{self, Database};
use crate::paths::database_file_path;

use self::playlist::{YouTubeApi, extract_playlist_id, list_all_items};
use self::stats::compute_stats;

pub use self::range::EndIndex;
pub(crate) use self::range::RangeSelection;
pub use self::stats::PlaybackSpeed;

const API_KEY_ENV: &str = "PLTIME_API_KEY";

/// Credential and playlist for one invocation.
#[derive(Debug, Clone)]
pub(crate) struct AppState {
    pub(crate) api_key: String,
    pub(crate) playlist_id: String,
}

impl AppState {
    pub(crate) fn client(&self) -> YouTubeApi {
        YouTubeApi::new(self.api_key.clone())
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let db = open_db()?;
    let key_override = cli.api_key.as_deref();

    match cli.command {
        Some(Command::SetKey { key }) => run_set_key(&db, &key)?,
        Some(Command::ShowKey) => run_show_key(&db)?,
        Some(Command::ClearKey) => run_clear_key(&db)?,
        Some(Command::Use { playlist }) => run_use(&db, &playlist)?,
        Some(Command::Items { playlist }) => {
            let state = resolve_state(&db, key_override, playlist.as_deref())?;
            run_items(&state)?
        }
        Some(Command::Stats {
            playlist,
            start,
            end,
            speed,
            json,
        }) => {
            let state = resolve_state(&db, key_override, playlist.as_deref())?;
            run_stats(&state, RangeSelection::new(start.get(), end), speed, json)?
        }
        Some(Command::Tui { playlist }) => {
            let state = resolve_state(&db, key_override, playlist.as_deref())?;
            tui::run_tui(&state)?
        }
        None => {
            let state = resolve_state(&db, key_override, None)?;
            tui::run_tui(&state)?
        }
    }

    Ok(())
}

fn run_set_key(db: &Database, key: &str) -> Result<()> {
    let key = key.trim();
    if key.is_empty() {
        bail!("Please enter an API key");
    }
    db.set(db::API_KEY, key)?;
    println!("API key saved successfully!");
    Ok(())
}

fn run_show_key(db: &Database) -> Result<()> {
    match db.get_setting(db::API_KEY)? {
        Some(setting) => println!(
            "API key: {} (saved {})",
            mask_key(&setting.value),
            format_saved_at(&setting.updated_at)
        ),
        None => println!("No API key stored. Run `pltime set-key <KEY>` first."),
    }
    Ok(())
}

fn run_clear_key(db: &Database) -> Result<()> {
    if db.delete(db::API_KEY)? {
        println!("API key removed.");
    } else {
        println!("No API key stored.");
    }
    Ok(())
}

fn run_use(db: &Database, playlist: &str) -> Result<()> {
    let playlist_id = parse_playlist_arg(playlist)?;
    db.set(db::CURRENT_PLAYLIST_ID, &playlist_id)?;
    println!("Current playlist: {playlist_id}");
    Ok(())
}

fn run_items(state: &AppState) -> Result<()> {
    let items = list_all_items(&state.client(), &state.playlist_id)?;
    if items.is_empty() {
        println!("Playlist {} has no items.", state.playlist_id);
        return Ok(());
    }

    println!("{:<6} {:<14} {}", "#", "VIDEO ID", "ITEM ID");
    for (idx, item) in items.iter().enumerate() {
        println!("{:<6} {:<14} {}", idx + 1, item.video_id, item.item_id);
    }
    Ok(())
}

fn run_stats(
    state: &AppState,
    range: RangeSelection,
    speed: PlaybackSpeed,
    json: bool,
) -> Result<()> {
    let stats = compute_stats(&state.client(), &state.playlist_id, range, speed)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&stats.to_json())?);
        return Ok(());
    }

    let rows = stats.summary_rows();
    let width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0)
        + 1;
    for (label, value) in rows {
        println!("{:<width$} {value}", format!("{label}:"), width = width);
    }
    Ok(())
}

/// Flag, then environment, then stored key; explicit playlist, then stored playlist.
/// An explicit playlist becomes the stored current playlist.
fn resolve_state(
    db: &Database,
    key_override: Option<&str>,
    playlist: Option<&str>,
) -> Result<AppState> {
    let env_key = env::var(API_KEY_ENV).ok();
    let api_key = match pick_api_key(key_override, env_key.as_deref()) {
        Some(key) => key,
        None => db
            .get(db::API_KEY)?
            .context("No API key found. Run `pltime set-key <KEY>` first.")?,
    };

    let playlist_id = match playlist {
        Some(raw) => {
            let playlist_id = parse_playlist_arg(raw)?;
            db.set(db::CURRENT_PLAYLIST_ID, &playlist_id)?;
            playlist_id
        }
        None => db.get(db::CURRENT_PLAYLIST_ID)?.context(
            "No playlist selected. Pass a playlist URL or ID, or run `pltime use <PLAYLIST>`.",
        )?,
    };

    Ok(AppState {
        api_key,
        playlist_id,
    })
}

pub(crate) fn pick_api_key(flag: Option<&str>, env_value: Option<&str>) -> Option<String> {
    [flag, env_value]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|key| !key.is_empty())
        .map(str::to_string)
}

fn parse_playlist_arg(raw: &str) -> Result<String> {
    extract_playlist_id(raw).with_context(|| {
        format!("No YouTube playlist found in {raw:?}. Pass a playlist URL or ID.")
    })
}

pub(crate) fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 8))
}

fn format_saved_at(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M %:z")
                .to_string()
        })
        .unwrap_or_else(|_| raw.to_string())
}

fn open_db() -> Result<Database> {
    let db_path = database_file_path()?;
    let db = Database::open(&db_path)?;
    db.migrate()?;
    Ok(db)
}
