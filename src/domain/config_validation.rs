//! Configuration validation.
//!
//! Validates every config field before anything connects.

use std::collections::HashSet;

use crate::domain::error::ChattraderError;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_ALPACA_BASE_URL: &str = "https://paper-api.alpaca.markets";
pub const DEFAULT_POLL_TIMEOUT_SECS: i64 = 30;
const MAX_POLL_TIMEOUT_SECS: i64 = 300;

pub fn validate_bot_config(config: &dyn ConfigPort) -> Result<(), ChattraderError> {
    validate_required(config, "telegram", "token")?;
    validate_required(config, "alpaca", "api_key_id")?;
    validate_required(config, "alpaca", "api_secret_key")?;
    validate_url(config, "telegram", "api_url")?;
    validate_url(config, "alpaca", "base_url")?;
    validate_poll_timeout(config)?;
    validate_allowed_channels(config)?;
    Ok(())
}

fn validate_required(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), ChattraderError> {
    match config.get_string(section, key) {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(ChattraderError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}

fn validate_url(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), ChattraderError> {
    match config.get_string(section, key) {
        None => Ok(()),
        Some(url) if url.starts_with("https://") || url.starts_with("http://") => Ok(()),
        Some(_) => Err(ChattraderError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: "must be an http:// or https:// URL".to_string(),
        }),
    }
}

fn validate_poll_timeout(config: &dyn ConfigPort) -> Result<(), ChattraderError> {
    let value = config.get_int("telegram", "poll_timeout_secs", DEFAULT_POLL_TIMEOUT_SECS);
    if !(1..=MAX_POLL_TIMEOUT_SECS).contains(&value) {
        return Err(ChattraderError::ConfigInvalid {
            section: "telegram".to_string(),
            key: "poll_timeout_secs".to_string(),
            reason: format!("poll_timeout_secs must be between 1 and {MAX_POLL_TIMEOUT_SECS}"),
        });
    }
    Ok(())
}

fn validate_allowed_channels(config: &dyn ConfigPort) -> Result<(), ChattraderError> {
    let raw = config
        .get_string("bot", "allowed_channels")
        .ok_or_else(|| ChattraderError::ConfigMissing {
            section: "bot".to_string(),
            key: "allowed_channels".to_string(),
        })?;
    parse_channels(&raw).map(|_| ())
}

/// Parse a comma-separated list of numeric channel ids.
pub fn parse_channels(input: &str) -> Result<HashSet<i64>, ChattraderError> {
    let invalid = |reason: String| ChattraderError::ConfigInvalid {
        section: "bot".to_string(),
        key: "allowed_channels".to_string(),
        reason,
    };

    let mut channels = HashSet::new();
    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty entry in channel list".to_string()));
        }
        let id = trimmed
            .parse::<i64>()
            .map_err(|_| invalid(format!("'{trimmed}' is not a numeric channel id")))?;
        channels.insert(id);
    }
    Ok(channels)
}
