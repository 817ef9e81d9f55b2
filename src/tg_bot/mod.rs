mod messenger;
mod schema;

pub use messenger::TelegramMessenger;

use crate::dispatcher::UpdateDispatcher;
use schema::router;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::instrument;

pub struct TGBot {
    bot: Bot,
}

impl TGBot {
    #[instrument(name = "initializing bot", skip(token))]
    pub fn new(token: &str) -> Self {
        let bot = Bot::new(token);
        Self { bot }
    }
    /// Клиент для отправки сообщений
    pub fn messenger(&self) -> TelegramMessenger {
        TelegramMessenger::new(self.bot.clone())
    }
    /// Слушает обновления до Ctrl-C
    #[instrument(name = "starting bot", skip_all)]
    pub async fn run(&self, dispatcher: Arc<UpdateDispatcher>) {
        Dispatcher::builder(self.bot.clone(), router())
            .dependencies(dptree::deps![dispatcher])
            .error_handler(LoggingErrorHandler::with_custom_text(
                "Ошибка в обработчике обновлений",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}
