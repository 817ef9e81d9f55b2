use std::time::Duration;

use async_trait::async_trait;

use crate::models::{CryptoCurrency, KeyInfo, Market};
use crate::price_feed::PriceFeed;

/// Отдает заранее заданные данные; `None` и пустой список изображают сбой
pub struct StaticPriceFeed {
    currencies: Vec<CryptoCurrency>,
    market: Option<Market>,
    key_info: Option<KeyInfo>,
    market_delay: Option<Duration>,
}

impl StaticPriceFeed {
    pub fn new(
        currencies: Vec<CryptoCurrency>,
        market: Option<Market>,
        key_info: Option<KeyInfo>,
    ) -> Self {
        Self {
            currencies,
            market,
            key_info,
            market_delay: None,
        }
    }
    pub fn unavailable() -> Self {
        Self::new(Vec::new(), None, None)
    }
    /// Задержка ответа по рынку, для проверки таймаутов
    pub fn with_market_delay(mut self, delay: Duration) -> Self {
        self.market_delay = Some(delay);
        self
    }
}

#[async_trait]
impl PriceFeed for StaticPriceFeed {
    async fn currencies(&self) -> Vec<CryptoCurrency> {
        self.currencies.clone()
    }
    async fn market(&self) -> Option<Market> {
        if let Some(delay) = self.market_delay {
            tokio::time::sleep(delay).await;
        }
        self.market.clone()
    }
    async fn key_info(&self) -> Option<KeyInfo> {
        self.key_info.clone()
    }
}
