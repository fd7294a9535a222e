mod form;
mod jobs;
mod render;
mod session;

use std::io;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::AppState;
use super::stats::StatsResult;

use self::jobs::{JobOutcome, spawn_item_count, spawn_stats};
use self::render::draw_tui;
use self::session::TuiSession;

#[cfg(test)]
pub(crate) use self::form::FormField;
pub(crate) use self::form::RangeForm;

const PAGE_STEP: isize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Busy {
    Idle,
    LoadingItems,
    ComputingStats,
}

pub(super) struct TuiView<'a> {
    pub(super) playlist_id: &'a str,
    pub(super) form: &'a RangeForm,
    pub(super) items_loaded: bool,
    pub(super) stats: Option<&'a StatsResult>,
    pub(super) busy: Busy,
    pub(super) status: &'a str,
}

pub(crate) fn run_tui(state: &AppState) -> Result<()> {
    let mut session = TuiSession::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
        .context("failed to initialize terminal backend")?;
    terminal.clear()?;

    let (job_tx, job_rx) = mpsc::channel::<JobOutcome>();
    let mut form = RangeForm::new(0);
    let mut items_loaded = false;
    let mut stats: Option<StatsResult> = None;
    let mut busy = Busy::LoadingItems;
    let mut status = status_info("Loading playlist...");
    spawn_item_count(state.client(), state.playlist_id.clone(), &job_tx);

    loop {
        while let Ok(outcome) = job_rx.try_recv() {
            busy = Busy::Idle;
            match outcome {
                JobOutcome::ItemCount(Ok(total)) => {
                    form.set_total(total);
                    items_loaded = true;
                    status = if total == 0 {
                        status_error("Playlist has no videos.")
                    } else {
                        status_info(&format!("Loaded {total} videos. Pick a range and press Enter."))
                    };
                }
                JobOutcome::ItemCount(Err(err)) => status = status_error(&err.to_string()),
                JobOutcome::Stats(Ok(result)) => {
                    // The playlist may have changed since it was loaded.
                    form.set_total(result.total_videos);
                    items_loaded = true;
                    status = status_info("Stats ready.");
                    stats = Some(result);
                }
                JobOutcome::Stats(Err(err)) => {
                    stats = None;
                    status = status_error(&err.to_string());
                }
            }
        }

        terminal.draw(|frame| {
            draw_tui(
                frame,
                &TuiView {
                    playlist_id: &state.playlist_id,
                    form: &form,
                    items_loaded,
                    stats: stats.as_ref(),
                    busy,
                    status: &status,
                },
            )
        })?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Up => form.field = form.field.move_up(),
            KeyCode::Down => form.field = form.field.move_down(),
            KeyCode::Left => form.step(-1),
            KeyCode::Right => form.step(1),
            KeyCode::PageDown => form.step(-PAGE_STEP),
            KeyCode::PageUp => form.step(PAGE_STEP),
            KeyCode::Home => form.jump_first(),
            KeyCode::End => form.jump_last(),
            KeyCode::Char('r') => {
                if busy != Busy::Idle {
                    status = status_info("Still working, please wait.");
                    continue;
                }
                busy = Busy::LoadingItems;
                status = status_info("Reloading playlist...");
                spawn_item_count(state.client(), state.playlist_id.clone(), &job_tx);
            }
            KeyCode::Enter => {
                if busy != Busy::Idle {
                    status = status_info("Still working, please wait.");
                    continue;
                }
                let Some(range) = form.selection() else {
                    status = status_error("No videos to select. Press r to reload.");
                    continue;
                };
                busy = Busy::ComputingStats;
                status = status_info("Fetching video durations...");
                spawn_stats(
                    state.client(),
                    state.playlist_id.clone(),
                    range,
                    form.speed(),
                    &job_tx,
                );
            }
            _ => {}
        }
    }

    terminal.show_cursor()?;
    session.leave()?;
    Ok(())
}

pub(super) fn status_info(msg: &str) -> String {
    format!("INFO: {msg}")
}

pub(super) fn status_error(msg: &str) -> String {
    format!("ERROR: {msg}")
}
