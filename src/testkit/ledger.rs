use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;

use crate::models::LedgerEntry;
use crate::storage::Ledger;
use crate::{AppError, Result};

/// Журнал в памяти. Записи хранятся от старых к новым.
#[derive(Default)]
pub struct MemoryLedger {
    entries: Mutex<Vec<LedgerEntry>>,
    fail_writes: AtomicBool,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
    /// Пока включено, любая запись завершается ошибкой базы данных
    pub fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn last_balance(&self) -> Result<i64> {
        Ok(self
            .entries
            .lock()
            .await
            .last()
            .map(|e| e.balance)
            .unwrap_or_default())
    }
    async fn history(&self, limit: Option<i64>, offset: i64) -> Result<Vec<LedgerEntry>> {
        let entries = self.entries.lock().await;
        let limit = limit.map_or(usize::MAX, |l| l.max(0) as usize);
        Ok(entries
            .iter()
            .rev()
            .skip(offset.max(0) as usize)
            .take(limit)
            .cloned()
            .collect())
    }
    async fn create_entry(&self, change: i64) -> Result<LedgerEntry> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Db(sqlx::Error::PoolTimedOut));
        }
        let mut entries = self.entries.lock().await;
        let last = entries.last();
        let balance = last.map(|e| e.balance).unwrap_or_default() + change;
        let now = Utc::now();
        // время записей строго возрастает, даже если часы не успели сдвинуться
        let created_at = match last {
            Some(prev) if prev.created_at >= now => prev.created_at + Duration::microseconds(1),
            _ => now,
        };
        let entry = LedgerEntry {
            created_at,
            change,
            balance,
        };
        entries.push(entry.clone());
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    async fn ledger_with(changes: impl IntoIterator<Item = i64>) -> Result<MemoryLedger> {
        let ledger = MemoryLedger::new();
        for change in changes {
            ledger.create_entry(change).await?;
        }
        Ok(ledger)
    }

    fn changes(entries: &[LedgerEntry]) -> Vec<i64> {
        entries.iter().map(|e| e.change).collect()
    }

    #[tokio::test]
    async fn test_offset_skips_newest() -> Result<()> {
        let ledger = ledger_with(1..=5).await?;
        assert_eq!(changes(&ledger.history(Some(2), 1).await?), vec![4, 3]);
        assert_eq!(changes(&ledger.history(Some(10), 3).await?), vec![2, 1]);
        assert!(ledger.history(Some(3), 5).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_limit_caps_at_total() -> Result<()> {
        let ledger = ledger_with(1..=5).await?;
        assert_eq!(ledger.history(Some(10), 0).await?.len(), 5);
        assert_eq!(ledger.history(Some(3), 0).await?.len(), 3);
        assert_eq!(ledger.history(None, 0).await?.len(), 5);
        assert!(ledger.history(Some(0), 0).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_history_is_strictly_newest_first() -> Result<()> {
        let ledger = ledger_with([10, -3, 7, -1]).await?;
        let history = ledger.history(None, 0).await?;
        for pair in history.windows(2) {
            assert!(pair[0].created_at > pair[1].created_at);
            assert_eq!(pair[0].balance, pair[1].balance + pair[0].change);
        }
        assert_eq!(ledger.last_balance().await?, 13);
        Ok(())
    }

    #[tokio::test]
    async fn test_failing_writes_leave_ledger_untouched() -> Result<()> {
        let ledger = ledger_with([5]).await?;
        ledger.set_failing(true);
        assert!(matches!(ledger.create_entry(1).await, Err(AppError::Db(_))));
        ledger.set_failing(false);
        assert_eq!(ledger.create_entry(1).await?.balance, 6);
        assert_eq!(ledger.len().await, 2);
        Ok(())
    }
}
