//! Application configuration

mod app_config;

pub use app_config::{AiConfig, AppConfig, LogFormat, LoggingConfig, SearchConfig, ServerConfig};
