use async_trait::async_trait;

use crate::models::{Document, TextMessage};
use crate::Result;

/// Действия в мессенджере, которые нужны диспетчеру
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_text(&self, chat_id: i64, message: &TextMessage) -> Result<()>;
    async fn edit_text(&self, chat_id: i64, message_id: i32, message: &TextMessage) -> Result<()>;
    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()>;
    async fn send_document(&self, chat_id: i64, document: &Document) -> Result<()>;
    /// Всплывающее уведомление в ответ на нажатие кнопки
    async fn answer_callback(&self, callback_id: &str, text: &str) -> Result<()>;
    /// Индикатор "печатает..."
    async fn send_typing(&self, chat_id: i64) -> Result<()>;
}
