use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("ошибка базы данных: {0}")]
    Db(#[from] sqlx::Error),
    #[error("ошибка миграции: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("ошибка запроса: {0}")]
    Request(#[from] reqwest::Error),
    #[error("ошибка Telegram: {0}")]
    Telegram(#[from] teloxide::RequestError),
    #[error("неверная настройка {key}: {reason}")]
    Config { key: &'static str, reason: String },
    #[error("команда '{0}' зарегистрирована дважды")]
    DuplicateCommand(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = core::result::Result<T, AppError>;

impl From<crate::models::TextMessageBuilderError> for AppError {
    fn from(value: crate::models::TextMessageBuilderError) -> Self {
        Self::Message(value.to_string())
    }
}
