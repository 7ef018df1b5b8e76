use clap::{Parser, ValueEnum};
use shortlink_core::validity::DEFAULT_VALIDITY_MINUTES;
use shortlink_store::DEFAULT_MAX_GENERATION_ATTEMPTS;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "SHORTLINK_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "SHORTLINK_BASE_URL";
pub const DEFAULT_VALIDITY_MINUTES_ENV: &str = "SHORTLINK_DEFAULT_VALIDITY_MINUTES";
pub const MAX_GENERATION_ATTEMPTS_ENV: &str = "SHORTLINK_MAX_GENERATION_ATTEMPTS";
pub const LOG_FORMAT_ENV: &str = "SHORTLINK_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Text => write!(f, "text"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "shortlink-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Public address prepended to short codes in returned links.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(
        long,
        env = DEFAULT_VALIDITY_MINUTES_ENV,
        default_value_t = DEFAULT_VALIDITY_MINUTES as f64,
    )]
    pub default_validity_minutes: f64,

    #[arg(
        long,
        env = MAX_GENERATION_ATTEMPTS_ENV,
        default_value_t = DEFAULT_MAX_GENERATION_ATTEMPTS,
    )]
    pub max_generation_attempts: usize,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Text
    )]
    pub log_format: LogFormatArg,
}
