mod dto;

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{error, info};

use crate::config::PriceFeedSettings;
use crate::models::{CryptoCurrency, KeyInfo, Market};
use crate::Result;
use dto::{ApiResponse, KeyInfoDto, MarketDto, QuotesData};

const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

/// Источник рыночных данных. Ошибки не пробрасываются:
/// пустой список или `None` означают "данные недоступны".
#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn currencies(&self) -> Vec<CryptoCurrency>;
    async fn market(&self) -> Option<Market>;
    async fn key_info(&self) -> Option<KeyInfo>;
}

/// Клиент CoinMarketCap
pub struct CoinMarketCapClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    symbols: Vec<String>,
}

impl CoinMarketCapClient {
    pub fn new(settings: &PriceFeedSettings, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .gzip(true)
            .timeout(settings.timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            symbols: settings.symbols.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn request<T: DeserializeOwned>(&self, url: &str) -> Result<ApiResponse<T>> {
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json::<ApiResponse<T>>()
            .await?;
        Ok(response)
    }

    /// Выполняет запрос; при любой ошибке пишет в лог и возвращает `None`
    async fn execute<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        let url = self.url(path);
        info!("Запрашиваю {url}");
        match self.request::<T>(&url).await {
            Ok(response) => {
                let status = response.status.unwrap_or_default();
                if status.error_code != 0 {
                    error!(
                        "{url}: ошибка API {}: {}",
                        status.error_code,
                        status.error_message.unwrap_or_default()
                    );
                    return None;
                }
                if response.data.is_none() {
                    error!("{url}: пустой ответ");
                }
                response.data
            }
            Err(e) => {
                error!("{url} завершился ошибкой: {e:?}");
                None
            }
        }
    }
}

#[async_trait]
impl PriceFeed for CoinMarketCapClient {
    async fn currencies(&self) -> Vec<CryptoCurrency> {
        let path = format!(
            "v2/cryptocurrency/quotes/latest?symbol={}",
            self.symbols.join(",")
        );
        self.execute::<QuotesData>(&path)
            .await
            .map(|data| dto::to_currencies(data, &self.symbols))
            .unwrap_or_default()
    }
    async fn market(&self) -> Option<Market> {
        self.execute::<MarketDto>("v1/global-metrics/quotes/latest")
            .await
            .map(Market::from)
    }
    async fn key_info(&self) -> Option<KeyInfo> {
        self.execute::<KeyInfoDto>("v1/key/info")
            .await
            .map(KeyInfo::from)
    }
}
