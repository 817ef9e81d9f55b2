use async_trait::async_trait;
use teloxide::payloads::{
    AnswerCallbackQuerySetters, EditMessageTextSetters, SendMessageSetters,
};
use teloxide::prelude::*;
use teloxide::types::{ChatAction, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageId};

use crate::dispatcher::Messenger;
use crate::models::{Document, Keyboard, ParseMode, TextMessage};
use crate::Result;

/// Отправка ответов через Telegram Bot API
#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn make_keyboard(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    let rows = keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|action| InlineKeyboardButton::callback(&action.label, &action.payload))
            .collect::<Vec<_>>()
    });
    InlineKeyboardMarkup::new(rows)
}

fn parse_mode(mode: ParseMode) -> teloxide::types::ParseMode {
    match mode {
        ParseMode::Html => teloxide::types::ParseMode::Html,
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, chat_id: i64, message: &TextMessage) -> Result<()> {
        let mut request = self.bot.send_message(ChatId(chat_id), message.text.clone());
        if let Some(keyboard) = &message.keyboard {
            request = request.reply_markup(make_keyboard(keyboard));
        }
        if let Some(mode) = message.parse_mode {
            request = request.parse_mode(parse_mode(mode));
        }
        let sent = request.await?;
        tracing::debug!("Отправила сообщение {}", sent.id.0);
        Ok(())
    }
    async fn edit_text(&self, chat_id: i64, message_id: i32, message: &TextMessage) -> Result<()> {
        let mut request = self.bot.edit_message_text(
            ChatId(chat_id),
            MessageId(message_id),
            message.text.clone(),
        );
        if let Some(keyboard) = &message.keyboard {
            request = request.reply_markup(make_keyboard(keyboard));
        }
        if let Some(mode) = message.parse_mode {
            request = request.parse_mode(parse_mode(mode));
        }
        request.await?;
        Ok(())
    }
    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.bot
            .delete_message(ChatId(chat_id), MessageId(message_id))
            .await?;
        Ok(())
    }
    async fn send_document(&self, chat_id: i64, document: &Document) -> Result<()> {
        let file = InputFile::memory(document.data.clone()).file_name(document.file_name.clone());
        self.bot.send_document(ChatId(chat_id), file).await?;
        Ok(())
    }
    async fn answer_callback(&self, callback_id: &str, text: &str) -> Result<()> {
        self.bot
            .answer_callback_query(callback_id)
            .text(text)
            .await?;
        Ok(())
    }
    async fn send_typing(&self, chat_id: i64) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat_id), ChatAction::Typing)
            .await?;
        Ok(())
    }
}
