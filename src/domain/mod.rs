//! Core domain types and logic: the command grammar and the order engine.

pub mod bot_config;
pub mod config_validation;
pub mod dispatcher;
pub mod error;
pub mod grammar;
pub mod intent;
pub mod order;
pub mod position;
pub mod reply;
pub mod resolver;
pub mod router;
pub mod validator;
