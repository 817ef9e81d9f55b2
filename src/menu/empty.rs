use async_trait::async_trait;

use crate::models::{MenuResponse, TextMessage};
use crate::Result;

use super::MenuService;

/// Заглушка: показывает одно сообщение и игнорирует команды
pub struct EmptyService {
    command: String,
}

impl EmptyService {
    pub fn new() -> Self {
        Self::with_command("empty")
    }
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for EmptyService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MenuService for EmptyService {
    fn name(&self) -> &str {
        "Empty service"
    }
    fn command(&self) -> &str {
        &self.command
    }
    async fn init(&self) -> Result<MenuResponse> {
        Ok(MenuResponse::send(TextMessage::plain("This is empty service")))
    }
    async fn process_command(&self, _tokens: &[&str], _is_admin: bool) -> Result<MenuResponse> {
        Ok(MenuResponse::empty())
    }
}
