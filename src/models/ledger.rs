use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Формат времени в истории и в выгрузке
pub const ENTRY_TIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Одна запись журнала баланса
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, FromRow)]
pub struct LedgerEntry {
    pub created_at: DateTime<Utc>,
    pub change: i64,
    pub balance: i64,
}

impl LedgerEntry {
    /// строка для кнопки истории: `<время>: <изменение> => <баланс>`
    pub fn history_line(&self) -> String {
        format!(
            "{}: {} => {}",
            self.created_at.format(ENTRY_TIME_FORMAT),
            self.change,
            self.balance
        )
    }
    /// строка для файла выгрузки: `[<время>] <изменение> => <баланс>`
    pub fn export_line(&self) -> String {
        format!(
            "[{}] {} => {}",
            self.created_at.format(ENTRY_TIME_FORMAT),
            self.change,
            self.balance
        )
    }
}
