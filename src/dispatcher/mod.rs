//! Единая точка входа для входящих обновлений: маршрутизация по реестру
//! сервисов и отрисовка ответа через [`Messenger`].

mod messenger;

pub use messenger::Messenger;

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::menu::{MenuService, ServiceRegistry};
use crate::models::{InlineAction, Keyboard, MenuResponse, Reply, TextMessage};
use crate::utils::command_token;
use crate::Result;

const CHOOSE_SERVICE: &str = "Choose service";
const NO_SERVICE: &str = "No service available";

/// Обновление платформы, сведенное к тому, что нужно диспетчеру
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundUpdate {
    /// Текстовое сообщение, новое или отредактированное
    Text { chat_id: i64, text: String },
    /// Нажатие кнопки
    Callback {
        id: String,
        /// `None`, если исходное сообщение уже недоступно
        origin: Option<MessageRef>,
        user_id: u64,
        data: Option<String>,
    },
    Unsupported(String),
}

/// Сообщение, на котором нажали кнопку
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i32,
}

pub struct UpdateDispatcher {
    registry: ServiceRegistry,
    admin_id: Option<u64>,
    messenger: Arc<dyn Messenger>,
}

impl UpdateDispatcher {
    pub fn new(
        registry: ServiceRegistry,
        admin_id: Option<u64>,
        messenger: Arc<dyn Messenger>,
    ) -> Self {
        Self {
            registry,
            admin_id,
            messenger,
        }
    }

    /// Обрабатывает одно обновление. Ошибки пишутся в лог и дальше не уходят.
    pub async fn handle(&self, update: InboundUpdate) {
        let result = match update {
            InboundUpdate::Text { chat_id, text } => self.on_text(chat_id, &text).await,
            InboundUpdate::Callback {
                id,
                origin,
                user_id,
                data,
            } => {
                self.on_callback(&id, origin, user_id, data.as_deref().unwrap_or_default())
                    .await
            }
            InboundUpdate::Unsupported(kind) => {
                info!("Пропускаю обновление типа '{kind}'");
                Ok(())
            }
        };
        if let Err(e) = result {
            error!("Не удалось обработать обновление: {e:?}");
        }
    }

    #[instrument(name = "text update", skip(self, text))]
    async fn on_text(&self, chat_id: i64, text: &str) -> Result<()> {
        let service = command_token(text).and_then(|command| self.registry.find(command));
        let Some(service) = service else {
            let message = self.services_menu()?;
            return self.messenger.send_text(chat_id, &message).await;
        };
        info!("Команда '{}' из чата {chat_id}", service.command());
        if let Err(e) = self.messenger.send_typing(chat_id).await {
            warn!("Не удалось показать набор текста: {e:?}");
        }
        let response = service.init().await?;
        // на текст нечего править: любая отрисовка идет новым сообщением
        let response = MenuResponse {
            reply: response.reply.map(as_new),
            ..response
        };
        self.render(&response, chat_id, None, None).await
    }

    #[instrument(name = "callback update", skip(self, id, origin))]
    async fn on_callback(
        &self,
        id: &str,
        origin: Option<MessageRef>,
        user_id: u64,
        data: &str,
    ) -> Result<()> {
        let tokens = data.split_whitespace().collect::<Vec<_>>();
        let service = tokens.first().and_then(|command| self.registry.find(command));
        let Some(service) = service else {
            return self
                .messenger
                .answer_callback(id, &format!("Received {data}"))
                .await;
        };
        let response = if tokens.len() == 1 {
            service.init().await?
        } else {
            let is_admin = self.admin_id == Some(user_id);
            service.process_command(&tokens, is_admin).await?
        };
        match origin {
            Some(origin) => {
                self.render(&response, origin.chat_id, Some(origin.message_id), Some(id))
                    .await
            }
            None => {
                warn!("Исходное сообщение недоступно, отвечаю только уведомлением");
                match response.answer {
                    Some(answer) => self.messenger.answer_callback(id, &answer).await,
                    None => Ok(()),
                }
            }
        }
    }

    async fn render(
        &self,
        response: &MenuResponse,
        chat_id: i64,
        message_id: Option<i32>,
        callback_id: Option<&str>,
    ) -> Result<()> {
        match (&response.reply, message_id) {
            (Some(Reply::New(message)), _) => self.messenger.send_text(chat_id, message).await?,
            (Some(Reply::Edited(message)), Some(message_id)) => {
                self.messenger
                    .edit_text(chat_id, message_id, message)
                    .await?
            }
            (Some(Reply::NewAndEdited { new, edited }), Some(message_id)) => {
                self.messenger.send_text(chat_id, new).await?;
                self.messenger
                    .edit_text(chat_id, message_id, edited)
                    .await?;
            }
            (Some(Reply::Document(document)), _) => {
                self.messenger.send_document(chat_id, document).await?
            }
            (Some(reply), None) => warn!("Нечего править для ответа {reply:?}"),
            (None, _) => {}
        }
        if let (true, Some(message_id)) = (response.delete_message, message_id) {
            self.messenger.delete_message(chat_id, message_id).await?;
        }
        if let (Some(answer), Some(callback_id)) = (&response.answer, callback_id) {
            self.messenger.answer_callback(callback_id, answer).await?;
        }
        Ok(())
    }

    /// Общее меню: по кнопке на каждый сервис
    fn services_menu(&self) -> Result<TextMessage> {
        if self.registry.is_empty() {
            return Ok(TextMessage::plain(NO_SERVICE));
        }
        let rows = self
            .registry
            .services()
            .iter()
            .map(|s| vec![InlineAction::new(s.name(), s.command())])
            .collect();
        let message = TextMessage::builder()
            .text(CHOOSE_SERVICE)
            .keyboard(Keyboard::new(rows))
            .build()?;
        Ok(message)
    }
}

fn as_new(reply: Reply) -> Reply {
    match reply {
        Reply::Edited(message) => Reply::New(message),
        Reply::NewAndEdited { new, .. } => Reply::New(new),
        other => other,
    }
}
