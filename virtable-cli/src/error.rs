use thiserror::Error;
use virtable_lib::ViewError;

/// A line that doesn't parse as a session command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{command}' needs a {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    #[error("Unknown field part '{0}' (expected value, min or max)")]
    UnknownPart(String),
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("Failed to encode state: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    View(#[from] ViewError),
}

impl CliError {
    /// Whether the session should stop. Bad commands are reported and skipped.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CliError::Command(_) | CliError::View(_))
    }
}
