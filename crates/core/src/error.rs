use thiserror::Error;

use crate::input::InputError;
use crate::model::AlgorithmParseError;
use crate::playback::PlaybackError;
use crate::search::SearchError;
use crate::structures::SnapshotError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("input: {0}")]
    Input(#[from] InputError),
    #[error("playback: {0}")]
    Playback(#[from] PlaybackError),
    #[error("algorithm: {0}")]
    Algorithm(#[from] AlgorithmParseError),
    #[error("search: {0}")]
    Search(#[from] SearchError),
    #[error("snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}
