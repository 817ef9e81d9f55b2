use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{CryptoCurrency, KeyInfo, Market};

/// Общая обертка ответов CoinMarketCap
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub status: Option<ApiStatus>,
    pub data: Option<T>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiStatus {
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub credit_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct CryptoCurrencyDto {
    pub cmc_rank: Option<i32>,
    #[serde(default)]
    pub quote: HashMap<String, QuoteDto>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteDto {
    pub price: Option<Decimal>,
    pub percent_change_24h: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct MarketDto {
    #[serde(default)]
    pub quote: HashMap<String, MarketQuoteDto>,
}

#[derive(Debug, Deserialize)]
pub struct MarketQuoteDto {
    pub total_market_cap: Option<Decimal>,
    pub total_market_cap_yesterday_percentage_change: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct KeyInfoDto {
    pub usage: KeyUsageDto,
}

#[derive(Debug, Deserialize)]
pub struct KeyUsageDto {
    pub current_day: CreditUsageDto,
    pub current_month: CreditUsageDto,
}

#[derive(Debug, Deserialize)]
pub struct CreditUsageDto {
    #[serde(default)]
    pub credits_used: i64,
    #[serde(default)]
    pub credits_left: i64,
}

pub type QuotesData = HashMap<String, Vec<CryptoCurrencyDto>>;

/// Котировки в порядке `symbols`; отсутствующие в ответе символы пропускаются
pub fn to_currencies(data: QuotesData, symbols: &[String]) -> Vec<CryptoCurrency> {
    let mut data = data;
    symbols
        .iter()
        .filter_map(|symbol| {
            let dto = data.remove(symbol)?.into_iter().next()?;
            let quote = dto
                .quote
                .get("USD")
                .or_else(|| dto.quote.values().next());
            Some(CryptoCurrency {
                name: symbol.clone(),
                rank: dto.cmc_rank.unwrap_or_default(),
                price: quote.and_then(|q| q.price).unwrap_or_default(),
                daily_percentage_change: quote
                    .and_then(|q| q.percent_change_24h)
                    .unwrap_or_default(),
            })
        })
        .collect()
}

impl From<MarketDto> for Market {
    fn from(value: MarketDto) -> Self {
        let quote = value
            .quote
            .get("USD")
            .or_else(|| value.quote.values().next());
        Self {
            total: quote.and_then(|q| q.total_market_cap).unwrap_or_default(),
            daily_percentage_change: quote
                .and_then(|q| q.total_market_cap_yesterday_percentage_change)
                .unwrap_or_default(),
        }
    }
}

impl From<KeyInfoDto> for KeyInfo {
    fn from(value: KeyInfoDto) -> Self {
        let usage = value.usage;
        Self {
            daily_used: usage.current_day.credits_used,
            daily_left: usage.current_day.credits_left,
            monthly_used: usage.current_month.credits_used,
            monthly_left: usage.current_month.credits_left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::str::FromStr;

    const QUOTES: &str = r#"{
        "status": {"timestamp": "2024-05-01T10:00:00.000Z", "error_code": 0, "error_message": null, "credit_count": 1},
        "data": {
            "ETH": [{"id": 1027, "cmc_rank": 2, "quote": {"USD": {"price": 3012.5512, "percent_change_24h": -1.234}}}],
            "BTC": [{"id": 1, "cmc_rank": 1, "quote": {"USD": {"price": 61234.123, "percent_change_24h": 2.5}}}],
            "XMR": [{"id": 328, "cmc_rank": null, "quote": {"USD": {"price": null, "percent_change_24h": null}}}]
        }
    }"#;

    #[test]
    fn test_quotes_follow_symbol_order() -> Result<()> {
        let response: ApiResponse<QuotesData> = serde_json::from_str(QUOTES)?;
        let symbols = ["BTC", "ETH", "LTC", "XMR"].map(String::from);
        let currencies = to_currencies(response.data.unwrap_or_default(), &symbols);
        let names = currencies.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["BTC", "ETH", "XMR"]);
        assert_eq!(currencies[0].rank, 1);
        assert_eq!(currencies[0].price, Decimal::from_str("61234.123")?);
        assert_eq!(
            currencies[1].daily_percentage_change,
            Decimal::from_str("-1.234")?
        );
        assert_eq!(currencies[2].rank, 0);
        assert_eq!(currencies[2].price, Decimal::ZERO);
        Ok(())
    }

    #[test]
    fn test_market_and_key_info() -> Result<()> {
        let market: ApiResponse<MarketDto> = serde_json::from_str(
            r#"{"status": {"error_code": 0}, "data": {"quote": {"USD": {
                "total_market_cap": 2345678901234.5,
                "total_market_cap_yesterday_percentage_change": 1.75}}}}"#,
        )?;
        let market = Market::from(market.data.expect("data"));
        assert_eq!(market.total, Decimal::from_str("2345678901234.5")?);
        assert_eq!(market.daily_percentage_change, Decimal::from_str("1.75")?);

        let key: ApiResponse<KeyInfoDto> = serde_json::from_str(
            r#"{"data": {"usage": {
                "current_minute": {"requests_made": 0, "requests_left": 30},
                "current_day": {"credits_used": 12, "credits_left": 321},
                "current_month": {"credits_used": 140, "credits_left": 9860}}}}"#,
        )?;
        let key = KeyInfo::from(key.data.expect("data"));
        assert_eq!(key.quota_line(), "Quota 12/333 140/10000");
        Ok(())
    }

    #[test]
    fn test_error_status_is_parsed() -> Result<()> {
        let response: ApiResponse<MarketDto> = serde_json::from_str(
            r#"{"status": {"error_code": 1001, "error_message": "This API Key is invalid."}}"#,
        )?;
        let status = response.status.unwrap_or_default();
        assert_eq!(status.error_code, 1001);
        assert!(response.data.is_none());
        Ok(())
    }
}
