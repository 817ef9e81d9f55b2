//! Заменители внешних зависимостей для тестов.
//!
//! Доступны в `#[cfg(test)]` и с фичей `testkit` (интеграционные тесты).
//!
//! - [`MemoryLedger`] - журнал баланса в памяти вместо Postgres.
//! - [`StaticPriceFeed`] - заранее заданные котировки вместо CoinMarketCap.
//! - [`RecordingMessenger`] - записывает действия вместо вызовов Telegram.

mod feed;
mod ledger;
mod messenger;

pub use feed::StaticPriceFeed;
pub use ledger::MemoryLedger;
pub use messenger::{RecordingMessenger, SentAction};
