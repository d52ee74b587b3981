use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum PlayerError {
    #[error("track index {0} out of range")]
    TrackOutOfRange(usize),

    #[error("playback rejected: {0}")]
    PlaybackRejected(String),

    #[error("no source loaded")]
    NothingLoaded,

    #[error("audio output error: {0}")]
    OutputError(String),
}
