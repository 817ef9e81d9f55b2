use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::dispatcher::Messenger;
use crate::models::{Document, TextMessage};
use crate::{AppError, Result};

/// Одно записанное действие
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SentAction {
    Text {
        chat_id: i64,
        message: TextMessage,
    },
    Edit {
        chat_id: i64,
        message_id: i32,
        message: TextMessage,
    },
    Delete {
        chat_id: i64,
        message_id: i32,
    },
    Document {
        chat_id: i64,
        document: Document,
    },
    Answer {
        callback_id: String,
        text: String,
    },
    Typing {
        chat_id: i64,
    },
}

/// Мессенджер, который только запоминает вызовы
#[derive(Default)]
pub struct RecordingMessenger {
    actions: Mutex<Vec<SentAction>>,
    typing_fails: AtomicBool,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn actions(&self) -> Vec<SentAction> {
        self.actions.lock().map(|a| a.clone()).unwrap_or_default()
    }
    /// Пока включено, индикатор набора возвращает ошибку и не записывается
    pub fn set_typing_fails(&self, fails: bool) {
        self.typing_fails.store(fails, Ordering::SeqCst);
    }
    /// Действия без индикатора набора текста
    pub fn visible_actions(&self) -> Vec<SentAction> {
        self.actions()
            .into_iter()
            .filter(|a| !matches!(a, SentAction::Typing { .. }))
            .collect()
    }
    fn record(&self, action: SentAction) {
        if let Ok(mut actions) = self.actions.lock() {
            actions.push(action);
        }
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_text(&self, chat_id: i64, message: &TextMessage) -> Result<()> {
        self.record(SentAction::Text {
            chat_id,
            message: message.clone(),
        });
        Ok(())
    }
    async fn edit_text(&self, chat_id: i64, message_id: i32, message: &TextMessage) -> Result<()> {
        self.record(SentAction::Edit {
            chat_id,
            message_id,
            message: message.clone(),
        });
        Ok(())
    }
    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.record(SentAction::Delete {
            chat_id,
            message_id,
        });
        Ok(())
    }
    async fn send_document(&self, chat_id: i64, document: &Document) -> Result<()> {
        self.record(SentAction::Document {
            chat_id,
            document: document.clone(),
        });
        Ok(())
    }
    async fn answer_callback(&self, callback_id: &str, text: &str) -> Result<()> {
        self.record(SentAction::Answer {
            callback_id: callback_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }
    async fn send_typing(&self, chat_id: i64) -> Result<()> {
        if self.typing_fails.load(Ordering::SeqCst) {
            return Err(AppError::Message("typing unavailable".to_string()));
        }
        self.record(SentAction::Typing { chat_id });
        Ok(())
    }
}
