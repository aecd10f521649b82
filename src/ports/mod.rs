//! Port traits defining the boundaries between domain and adapters.

pub mod brokerage_port;
pub mod chat_port;
pub mod config_port;
