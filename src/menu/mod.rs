//! Сервисы меню: каждое "приложение" бота реализует [`MenuService`],
//! а [`ServiceRegistry`] сопоставляет команду с сервисом.

mod dashboard;
mod empty;
mod ledger;

pub use dashboard::PriceDashboard;
pub use empty::EmptyService;
pub use ledger::LedgerMenu;

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::MenuResponse;
use crate::{AppError, Result};

#[async_trait]
pub trait MenuService: Send + Sync {
    /// Название для общего меню
    fn name(&self) -> &str;
    /// Команда маршрутизации, уникальна среди зарегистрированных сервисов
    fn command(&self) -> &str;
    /// Первое сообщение сервиса
    async fn init(&self) -> Result<MenuResponse>;
    /// Обработка нажатия кнопки; `tokens[0]` - команда сервиса
    async fn process_command(&self, tokens: &[&str], is_admin: bool) -> Result<MenuResponse>;
}

/// Реестр сервисов. Собирается при старте и дальше не меняется.
#[derive(Clone, Default)]
pub struct ServiceRegistry {
    services: Vec<Arc<dyn MenuService>>,
}

impl ServiceRegistry {
    /// Падает на повторяющейся команде
    pub fn new(services: Vec<Arc<dyn MenuService>>) -> Result<Self> {
        let mut registry = Self::default();
        for service in services {
            if registry.find(service.command()).is_some() {
                return Err(AppError::DuplicateCommand(service.command().to_string()));
            }
            tracing::info!(
                "Зарегистрирован сервис '{}' с командой '{}'",
                service.name(),
                service.command()
            );
            registry.services.push(service);
        }
        Ok(registry)
    }
    pub fn find(&self, command: &str) -> Option<Arc<dyn MenuService>> {
        self.services
            .iter()
            .find(|s| s.command() == command)
            .cloned()
    }
    /// Сервисы в порядке регистрации
    pub fn services(&self) -> &[Arc<dyn MenuService>] {
        &self.services
    }
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
