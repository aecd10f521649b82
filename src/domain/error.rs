//! Domain error types.

/// A matched command whose fields fail semantic checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid quantity '{0}': must be a whole number greater than zero")]
    InvalidQuantity(String),

    #[error("invalid price '{0}': must be a number greater than zero")]
    InvalidPrice(String),

    #[error("invalid symbol '{0}': must be letters only")]
    InvalidSymbol(String),
}

/// Top-level error type for chattrader.
#[derive(Debug, thiserror::Error)]
pub enum ChattraderError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid command pattern: {reason}")]
    Grammar { reason: String },

    #[error("brokerage error: {reason}")]
    Brokerage { reason: String },

    #[error("chat transport error: {reason}")]
    Transport { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<regex::Error> for ChattraderError {
    fn from(err: regex::Error) -> Self {
        ChattraderError::Grammar {
            reason: err.to_string(),
        }
    }
}

impl From<&ChattraderError> for std::process::ExitCode {
    fn from(err: &ChattraderError) -> Self {
        let code: u8 = match err {
            ChattraderError::Io(_) => 1,
            ChattraderError::ConfigParse { .. }
            | ChattraderError::ConfigMissing { .. }
            | ChattraderError::ConfigInvalid { .. } => 2,
            ChattraderError::Brokerage { .. } => 3,
            ChattraderError::Transport { .. } => 4,
            ChattraderError::Grammar { .. } | ChattraderError::Validation(_) => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_converts_transparently() {
        let err: ChattraderError = ValidationError::InvalidPrice("0".into()).into();
        assert_eq!(
            err.to_string(),
            "invalid price '0': must be a number greater than zero"
        );
    }

    #[test]
    fn brokerage_error_message_includes_reason() {
        let err = ChattraderError::Brokerage {
            reason: "insufficient buying power".into(),
        };
        assert_eq!(err.to_string(), "brokerage error: insufficient buying power");
    }

    #[test]
    fn config_missing_message() {
        let err = ChattraderError::ConfigMissing {
            section: "telegram".into(),
            key: "token".into(),
        };
        assert_eq!(err.to_string(), "missing config key [telegram] token");
    }
}
