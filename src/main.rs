use std::sync::Arc;

use anyhow::Context;
use menubot::config::Settings;
use menubot::dispatcher::UpdateDispatcher;
use menubot::menu::{EmptyService, LedgerMenu, MenuService, PriceDashboard, ServiceRegistry};
use menubot::models::AppState;
use menubot::price_feed::CoinMarketCapClient;
use menubot::storage::{self, LedgerStorage};
use menubot::tg_bot::TGBot;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().context("Не удалось прочитать настройки")?;
    settings.logging.init();

    info!("Инициализирую базу данных");
    let pool = storage::connect(&settings.database_url)
        .await
        .context("Ошибка подключения к базе данных")?;
    let ledger = Arc::new(LedgerStorage::new(pool));
    info!("База данных готова к использованию");

    let mut services: Vec<Arc<dyn MenuService>> = vec![Arc::new(LedgerMenu::new(ledger.clone()))];
    match settings.price_feed.api_key.as_deref() {
        Some(api_key) => {
            let client = CoinMarketCapClient::new(&settings.price_feed, api_key)
                .context("Не удалось создать клиент CoinMarketCap")?;
            services.push(Arc::new(PriceDashboard::new(
                Arc::new(client),
                settings.price_feed.timeout,
            )));
        }
        None => warn!("COINMARKETCAP_API_KEY не задан, сводка по рынку отключена"),
    }
    services.push(Arc::new(EmptyService::new()));
    let registry = ServiceRegistry::new(services)?;

    let state = AppState::new(ledger);
    let addr = settings.http_addr;
    tokio::spawn(async move {
        if let Err(e) = menubot::routes::serve(addr, state).await {
            error!("HTTP API остановлен: {e:?}");
        }
    });

    let bot = TGBot::new(&settings.bot_token);
    let dispatcher = Arc::new(UpdateDispatcher::new(
        registry,
        settings.admin_id,
        Arc::new(bot.messenger()),
    ));
    info!("Запускаю бота");
    bot.run(dispatcher).await;
    info!("Бот остановлен");
    Ok(())
}
