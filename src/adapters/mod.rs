//! Concrete adapter implementations for ports.

pub mod alpaca_adapter;
pub mod file_config_adapter;
pub mod telegram_adapter;
