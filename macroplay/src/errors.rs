use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("Sequence is empty")]
    EmptySequence,

    #[error("Invalid shortcut: {0}")]
    InvalidShortcut(String),

    #[error("Runner is busy: {0}")]
    RunnerBusy(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}
