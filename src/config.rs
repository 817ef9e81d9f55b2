//! Настройки процесса, читаются один раз при старте из окружения (и `.env`).

use std::net::SocketAddr;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::{AppError, Result};

const DEFAULT_BASE_URL: &str = "https://pro-api.coinmarketcap.com";
const DEFAULT_SYMBOLS: &str = "BTC,ETH,LTC,XMR";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bot_token: String,
    pub admin_id: Option<u64>,
    pub price_feed: PriceFeedSettings,
    pub http_addr: SocketAddr,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct PriceFeedSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub symbols: Vec<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Settings {
    /// Читает настройки из переменных окружения, предварительно подгрузив `.env`
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(AppError::Config {
                    key: ".env",
                    reason: e.to_string(),
                });
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let database_url = required(&get, "DATABASE_URL")?;
        let bot_token = required(&get, "TELOXIDE_TOKEN")?;
        let admin_id = get("ADMIN_ID")
            .map(|v| parse::<u64>("ADMIN_ID", &v))
            .transpose()?;
        let timeout_secs = get("PRICE_FEED_TIMEOUT_SECS")
            .map(|v| parse::<u64>("PRICE_FEED_TIMEOUT_SECS", &v))
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let symbols = get("COINMARKETCAP_SYMBOLS")
            .unwrap_or_else(|| DEFAULT_SYMBOLS.to_string())
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        if symbols.is_empty() {
            return Err(AppError::Config {
                key: "COINMARKETCAP_SYMBOLS",
                reason: "пустой список".to_string(),
            });
        }
        let price_feed = PriceFeedSettings {
            base_url: get("COINMARKETCAP_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: get("COINMARKETCAP_API_KEY"),
            symbols,
            timeout: Duration::from_secs(timeout_secs),
        };
        let http_addr = parse::<SocketAddr>(
            "HTTP_ADDR",
            &get("HTTP_ADDR").unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string()),
        )?;
        let logging = LoggingSettings {
            level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            json: get("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json")),
        };
        Ok(Self {
            database_url,
            bot_token,
            admin_id,
            price_feed,
            http_addr,
            logging,
        })
    }
}

impl LoggingSettings {
    /// Инициализирует tracing; `RUST_LOG` имеет приоритет над `LOG_LEVEL`
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        if self.json {
            tracing_subscriber::fmt().json().with_env_filter(filter).init();
        } else {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
}

fn required(get: impl Fn(&str) -> Option<String>, key: &'static str) -> Result<String> {
    get(key).ok_or(AppError::Config {
        key,
        reason: "не задано".to_string(),
    })
}

fn parse<T>(key: &'static str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| AppError::Config {
        key,
        reason: format!("'{value}': {e}"),
    })
}
