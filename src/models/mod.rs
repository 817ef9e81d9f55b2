mod ledger;
mod market;
mod response;
pub use ledger::*;
pub use market::*;
pub use response::*;

use std::sync::Arc;

use crate::storage::Ledger;

/// Общие данные для обработчиков HTTP
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn Ledger>,
}
impl AppState {
    /// Создать новый экземпляр общих данных
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self { ledger }
    }
}
