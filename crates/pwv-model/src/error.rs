use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid session id: {0:?}")]
    InvalidSessionId(String),
}

#[derive(Debug, Error)]
pub enum PwvError {
    #[error("rule file not found: {}", path.display())]
    RulesNotFound { path: PathBuf },
    #[error("failed to read rule file {}", path.display())]
    RulesUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write candidate to output sink")]
    Sink(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PwvError>;
