mod ledger;
pub use ledger::LedgerStorage;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::models::LedgerEntry;
use crate::Result;

/// Журнал баланса: только добавление записей, баланс считается накопительно
#[async_trait]
pub trait Ledger: Send + Sync {
    /// баланс последней записи или 0, если записей нет
    async fn last_balance(&self) -> Result<i64>;
    /// записи от новых к старым; `limit = None` - без ограничения
    async fn history(&self, limit: Option<i64>, offset: i64) -> Result<Vec<LedgerEntry>>;
    /// добавляет запись с балансом = предыдущий баланс + `change`
    async fn create_entry(&self, change: i64) -> Result<LedgerEntry>;
}

/// Подключается к Postgres и применяет миграции
pub async fn connect(database_url: &str) -> Result<sqlx::PgPool> {
    info!("Подключаюсь к базе данных");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    info!("Применяю миграции");
    sqlx::migrate!().run(&pool).await?;
    info!("База данных готова к использованию");
    Ok(pool)
}
