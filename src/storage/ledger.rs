use async_trait::async_trait;

use crate::models::LedgerEntry;
use crate::Result;

use super::Ledger;

#[derive(Clone)]
pub struct LedgerStorage {
    pool: sqlx::PgPool,
}
impl LedgerStorage {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Ledger for LedgerStorage {
    async fn last_balance(&self) -> Result<i64> {
        let query = "SELECT balance FROM ledger_history ORDER BY created_at DESC, id DESC LIMIT 1";
        let balance = sqlx::query_scalar::<_, i64>(query)
            .fetch_optional(&self.pool)
            .await?;
        Ok(balance.unwrap_or_default())
    }
    async fn history(&self, limit: Option<i64>, offset: i64) -> Result<Vec<LedgerEntry>> {
        // LIMIT NULL в Postgres означает "без ограничения"
        let query = "SELECT created_at, change, balance FROM ledger_history \
                     ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2";
        let entries = sqlx::query_as::<_, LedgerEntry>(query)
            .bind(limit)
            .bind(offset.max(0))
            .fetch_all(&self.pool)
            .await?;
        Ok(entries)
    }
    async fn create_entry(&self, change: i64) -> Result<LedgerEntry> {
        let mut tx = self.pool.begin().await?;
        // читатели не блокируются, параллельные записи выстраиваются в очередь
        sqlx::query("LOCK TABLE ledger_history IN EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;
        let query = "INSERT INTO ledger_history (created_at, change, balance) \
                     VALUES (clock_timestamp(), $1, \
                     COALESCE((SELECT balance FROM ledger_history \
                     ORDER BY created_at DESC, id DESC LIMIT 1), 0) + $1) \
                     RETURNING created_at, change, balance";
        let entry = sqlx::query_as::<_, LedgerEntry>(query)
            .bind(change)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(
            "Записала изменение {} в журнал, баланс {}",
            entry.change,
            entry.balance
        );
        Ok(entry)
    }
}
