use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourierError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Empty response from {0}")]
    EmptyResponse(String),

    #[error("Failed to parse {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl CourierError {
    pub(crate) fn parse(context: impl Into<String>, source: serde_json::Error) -> Self {
        CourierError::Parse {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CourierError::Io {
            path: path.into(),
            source,
        }
    }

    /// Short machine-friendly label, used for metrics and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            CourierError::Config(_) => "config",
            CourierError::Transport(_) => "transport",
            CourierError::EmptyResponse(_) => "empty_response",
            CourierError::Parse { .. } => "parse",
            CourierError::Io { .. } => "io",
            CourierError::InvalidHeader(_) => "invalid_header",
        }
    }
}

pub type Result<T> = std::result::Result<T, CourierError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = CourierError::io(
            "storage/templates.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.kind(), "io");
        assert!(err.to_string().contains("storage/templates.json"));
    }

    #[test]
    fn test_parse_error_kind() {
        let source = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let err = CourierError::parse("template cache", source);
        assert_eq!(err.kind(), "parse");
        assert!(err.to_string().starts_with("Failed to parse template cache"));
    }
}
