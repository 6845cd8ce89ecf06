//! Error types for the game binary and its collaborators

/// Everything that can go wrong outside the simulation itself.  Game-ending
/// events are phases, not errors.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Terminal I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An audio asset could not be loaded or played
    #[error("Failed to load audio asset {asset}: {reason}")]
    ResourceLoad { asset: String, reason: String },

    /// The log file could not be set up
    #[error("Log setup failed: {0}")]
    LogSetup(String),
}

/// Result type for game operations
pub type Result<T> = std::result::Result<T, GameError>;
