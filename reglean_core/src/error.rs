use thiserror::Error;

use crate::value::CastError;

pub type Result<T> = std::result::Result<T, GleanError>;

#[derive(Debug, Error)]
pub enum GleanError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Cast failed for category `{category}`: {source}")]
    Cast {
        category: String,
        #[source]
        source: CastError,
    },
}

impl GleanError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn pattern(pattern: &str, source: regex::Error) -> Self {
        Self::Pattern {
            pattern: pattern.to_string(),
            source,
        }
    }
}
