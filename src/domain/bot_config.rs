//! Immutable runtime configuration, built once at startup.

use secrecy::SecretString;
use std::collections::HashSet;

#[derive(Debug)]
pub struct TelegramConfig {
    pub api_url: String,
    pub token: SecretString,
    pub poll_timeout_secs: u64,
}

#[derive(Debug)]
pub struct AlpacaConfig {
    pub base_url: String,
    pub api_key_id: String,
    pub api_secret_key: SecretString,
}

#[derive(Debug)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub alpaca: AlpacaConfig,
    pub allowed_channels: HashSet<i64>,
}
