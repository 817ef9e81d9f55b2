use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use teloxide::utils::html;
use tracing::warn;

use crate::models::{CryptoCurrency, KeyInfo, Market, MenuResponse, ParseMode, TextMessage};
use crate::price_feed::PriceFeed;
use crate::utils::format_decimal;
use crate::Result;

use super::MenuService;

const NAME: &str = "CoinMarketCap";
const COMMAND: &str = "coinmarketcap";
const NO_DATA: &str = "No market data available";
const BILLION: i64 = 1_000_000_000;

/// Сводка по рынку: капитализация, котировки и расход квоты API
pub struct PriceDashboard {
    feed: Arc<dyn PriceFeed>,
    timeout: Duration,
}

struct MessageLine {
    title: String,
    price: String,
    change: String,
}

impl MessageLine {
    fn new(title: String, price: Decimal, change: Decimal) -> Self {
        Self {
            title,
            price: format_decimal(price, false),
            change: format!("({}%)", format_decimal(change, true)),
        }
    }
    fn market(market: &Market) -> Self {
        Self::new(
            "Cap".to_string(),
            market.total / Decimal::from(BILLION),
            market.daily_percentage_change,
        )
    }
    fn currency(currency: &CryptoCurrency) -> Self {
        Self::new(
            format!("{} [{}]", currency.name, currency.rank),
            currency.price,
            currency.daily_percentage_change,
        )
    }
}

impl PriceDashboard {
    pub fn new(feed: Arc<dyn PriceFeed>, timeout: Duration) -> Self {
        Self { feed, timeout }
    }

    /// Ожидание с ограничением; таймаут равен недоступным данным
    async fn bounded<T: Default>(&self, what: &str, fetch: impl Future<Output = T>) -> T {
        match tokio::time::timeout(self.timeout, fetch).await {
            Ok(value) => value,
            Err(_) => {
                warn!("Запрос '{what}' не уложился в {:?}", self.timeout);
                T::default()
            }
        }
    }

    fn render(
        market: Option<&Market>,
        currencies: &[CryptoCurrency],
        key_info: Option<&KeyInfo>,
    ) -> String {
        let lines = market
            .map(MessageLine::market)
            .into_iter()
            .chain(currencies.iter().map(MessageLine::currency))
            .collect::<Vec<_>>();
        let mut text = align(&lines);
        if lines.is_empty() {
            text.push(NO_DATA.to_string());
        }
        if let Some(key_info) = key_info {
            text.push(key_info.quota_line());
        }
        text.join("\n")
    }
}

/// Выравнивает цены по правому краю одной колонки
fn align(lines: &[MessageLine]) -> Vec<String> {
    let max_title = lines.iter().map(|l| l.title.chars().count()).max();
    let max_price = lines.iter().map(|l| l.price.chars().count()).max();
    let width = max_title.unwrap_or_default() + max_price.unwrap_or_default();
    lines
        .iter()
        .map(|l| {
            let places = width - l.title.chars().count() - l.price.chars().count();
            format!("{} {}{} {}", l.title, " ".repeat(places), l.price, l.change)
        })
        .collect()
}

#[async_trait]
impl MenuService for PriceDashboard {
    fn name(&self) -> &str {
        NAME
    }
    fn command(&self) -> &str {
        COMMAND
    }
    async fn init(&self) -> Result<MenuResponse> {
        let (currencies, market, key_info) = tokio::join!(
            self.bounded("currencies", self.feed.currencies()),
            self.bounded("market", self.feed.market()),
            self.bounded("key info", self.feed.key_info()),
        );
        let text = Self::render(market.as_ref(), &currencies, key_info.as_ref());
        let message = TextMessage::builder()
            .text(format!("<pre>{}</pre>", html::escape(&text)))
            .parse_mode(ParseMode::Html)
            .build()?;
        Ok(MenuResponse::send(message))
    }
    async fn process_command(&self, _tokens: &[&str], _is_admin: bool) -> Result<MenuResponse> {
        Ok(MenuResponse::empty())
    }
}
