use std::sync::mpsc;

use super::super::error::StatsError;
use super::super::playlist::{YouTubeApi, list_all_items};
use super::super::range::RangeSelection;
use super::super::stats::{PlaybackSpeed, StatsResult, compute_stats};

#[derive(Debug)]
pub(super) enum JobOutcome {
    ItemCount(Result<usize, StatsError>),
    Stats(Result<StatsResult, StatsError>),
}

pub(super) fn spawn_item_count(
    client: YouTubeApi,
    playlist_id: String,
    tx: &mpsc::Sender<JobOutcome>,
) {
    let tx = tx.clone();
    std::thread::spawn(move || {
        let outcome = list_all_items(&client, &playlist_id).map(|items| items.len());
        let _ = tx.send(JobOutcome::ItemCount(outcome));
    });
}

pub(super) fn spawn_stats(
    client: YouTubeApi,
    playlist_id: String,
    range: RangeSelection,
    speed: PlaybackSpeed,
    tx: &mpsc::Sender<JobOutcome>,
) {
    let tx = tx.clone();
    std::thread::spawn(move || {
        let outcome = compute_stats(&client, &playlist_id, range, speed);
        let _ = tx.send(JobOutcome::Stats(outcome));
    });
}
