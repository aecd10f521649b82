//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crate::adapters::alpaca_adapter::AlpacaAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::telegram_adapter::TelegramAdapter;
use crate::domain::bot_config::{AlpacaConfig, BotConfig, TelegramConfig};
use crate::domain::config_validation::{
    DEFAULT_ALPACA_BASE_URL, DEFAULT_POLL_TIMEOUT_SECS, DEFAULT_TELEGRAM_API_URL, parse_channels,
    validate_bot_config,
};
use crate::domain::error::ChattraderError;
use crate::domain::grammar::Grammar;
use crate::domain::intent::{Classification, TradingIntent};
use crate::domain::reply;
use crate::domain::router::Router;
use crate::domain::validator;
use crate::ports::brokerage_port::BrokeragePort;
use crate::ports::chat_port::ChatPort;
use crate::ports::config_port::ConfigPort;
use crate::service::BotService;

#[derive(Parser, Debug)]
#[command(name = "chattrader", about = "Chat-driven trading bot")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the bot and poll for messages until interrupted
    Run {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file without connecting
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show how a message would be interpreted
    Parse {
        /// Message text, e.g. "SELL 10 TSLA LIMIT 250.50"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run { config } => run_bot(&config),
        Command::Check { config } => run_check(&config),
        Command::Parse { text } => run_parse(&text.join(" ")),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = ChattraderError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Validate and assemble the runtime configuration.
pub fn build_bot_config(adapter: &dyn ConfigPort) -> Result<BotConfig, ChattraderError> {
    validate_bot_config(adapter)?;

    let required = |section: &str, key: &str| {
        adapter
            .get_string(section, key)
            .map(|v| v.trim().to_string())
            .ok_or_else(|| ChattraderError::ConfigMissing {
                section: section.to_string(),
                key: key.to_string(),
            })
    };
    let url = |section: &str, key: &str, default: &str| {
        adapter
            .get_string(section, key)
            .unwrap_or_else(|| default.to_string())
            .trim_end_matches('/')
            .to_string()
    };

    let poll_timeout_secs =
        adapter.get_int("telegram", "poll_timeout_secs", DEFAULT_POLL_TIMEOUT_SECS) as u64;

    Ok(BotConfig {
        telegram: TelegramConfig {
            api_url: url("telegram", "api_url", DEFAULT_TELEGRAM_API_URL),
            token: SecretString::from(required("telegram", "token")?),
            poll_timeout_secs,
        },
        alpaca: AlpacaConfig {
            base_url: url("alpaca", "base_url", DEFAULT_ALPACA_BASE_URL),
            api_key_id: required("alpaca", "api_key_id")?,
            api_secret_key: SecretString::from(required("alpaca", "api_secret_key")?),
        },
        allowed_channels: parse_channels(&required("bot", "allowed_channels")?)?,
    })
}

fn load_bot_config(config_path: &PathBuf) -> Result<BotConfig, ExitCode> {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = load_config(config_path)?;
    build_bot_config(&adapter).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn run_bot(config_path: &PathBuf) -> ExitCode {
    let config = match load_bot_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    match start(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}

fn start(config: BotConfig) -> Result<(), ChattraderError> {
    let BotConfig {
        telegram,
        alpaca,
        allowed_channels,
    } = config;

    let broker: Arc<dyn BrokeragePort> = Arc::new(AlpacaAdapter::new(alpaca));
    let chat: Arc<dyn ChatPort> =
        Arc::new(TelegramAdapter::new(telegram, allowed_channels.clone())?);
    let router = Arc::new(Router::new(allowed_channels, broker)?);
    let service = BotService::new(router, chat);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(service.run(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
        tracing::info!("interrupt received");
    }));
    Ok(())
}

fn run_check(config_path: &PathBuf) -> ExitCode {
    let config = match load_bot_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    eprintln!("Config OK");
    eprintln!("  Telegram API:     {}", config.telegram.api_url);
    eprintln!("  Poll timeout:     {}s", config.telegram.poll_timeout_secs);
    eprintln!("  Alpaca endpoint:  {}", config.alpaca.base_url);
    eprintln!("  Allowed channels: {}", config.allowed_channels.len());
    ExitCode::SUCCESS
}

/// Interpret `text` offline. Returns the canonical intent, or the reply the
/// bot would send when the text is not an executable command.
pub fn parse_command(text: &str) -> Result<Result<TradingIntent, String>, ChattraderError> {
    let grammar = Grammar::new()?;
    Ok(match grammar.classify(text.trim()) {
        Classification::Unrecognized => Err(reply::HELP_TEXT.to_string()),
        Classification::Command(raw) => validator::validate(raw).map_err(|e| reply::warning(&e)),
    })
}

fn run_parse(text: &str) -> ExitCode {
    match parse_command(text) {
        Ok(Ok(intent)) => {
            println!("{intent}");
            ExitCode::SUCCESS
        }
        Ok(Err(reply)) => {
            eprintln!("{reply}");
            ExitCode::from(5)
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}
