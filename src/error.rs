//! Crate error type

use thiserror::Error;

/// Errors raised while configuring or driving the simulation
#[derive(Debug, Error)]
pub enum Error {
    /// A level band scheduled a wave but has no registered spawn points
    #[error("level {level} has no registered spawn points")]
    NoSpawnPoints { level: u32 },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("invalid level layout: {0}")]
    InvalidLayout(String),

    #[error("failed to parse json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
