use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SchedError {
    #[error("invalid time of day {input:?}: expected HH:MM:SS")]
    Format { input: String },

    #[error("decoding error: {0}")]
    Decoding(DecodeFailure),

    #[error("encoding error: {0}")]
    Encoding(serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Config error: {0}")]
    Config(#[from] figment::Error),
}

/// Why a stored JSON column could not be turned back into a mapping.
#[derive(Debug, ThisError)]
pub enum DecodeFailure {
    /// The driver handed back something other than a byte sequence.
    #[error("unexpected storage representation (got {found})")]
    UnexpectedRepresentation { found: &'static str },

    #[error("invalid JSON: {0}")]
    InvalidJson(serde_json::Error),
}

impl SchedError {
    pub(crate) fn format(input: impl Into<String>) -> Self {
        SchedError::Format {
            input: input.into(),
        }
    }
}

impl From<DecodeFailure> for SchedError {
    fn from(e: DecodeFailure) -> Self {
        SchedError::Decoding(e)
    }
}
