use rust_decimal::Decimal;
use serde::Serialize;

/// Котировка криптовалюты
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CryptoCurrency {
    pub name: String,
    pub rank: i32,
    pub price: Decimal,
    pub daily_percentage_change: Decimal,
}

/// Общая капитализация рынка
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Market {
    pub total: Decimal,
    pub daily_percentage_change: Decimal,
}

/// Расход кредитов API-ключа
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct KeyInfo {
    pub daily_used: i64,
    pub daily_left: i64,
    pub monthly_used: i64,
    pub monthly_left: i64,
}

impl KeyInfo {
    pub fn quota_line(&self) -> String {
        format!(
            "Quota {}/{} {}/{}",
            self.daily_used,
            self.daily_used + self.daily_left,
            self.monthly_used,
            self.monthly_used + self.monthly_left
        )
    }
}
