use std::sync::Arc;
use std::time::Duration;

use menubot::dispatcher::{InboundUpdate, MessageRef, UpdateDispatcher};
use menubot::menu::{EmptyService, LedgerMenu, MenuService, PriceDashboard, ServiceRegistry};
use menubot::testkit::{MemoryLedger, RecordingMessenger, StaticPriceFeed};

pub const ADMIN_ID: u64 = 42;
pub const CHAT_ID: i64 = 100;
pub const MENU_MESSAGE_ID: i32 = 7;

pub struct TestBot {
    pub dispatcher: UpdateDispatcher,
    pub messenger: Arc<RecordingMessenger>,
    pub ledger: Arc<MemoryLedger>,
}

impl TestBot {
    pub fn new() -> Self {
        Self::with_feed(StaticPriceFeed::unavailable())
    }

    pub fn with_feed(feed: StaticPriceFeed) -> Self {
        let ledger = Arc::new(MemoryLedger::new());
        let services: Vec<Arc<dyn MenuService>> = vec![
            Arc::new(LedgerMenu::new(ledger.clone())),
            Arc::new(PriceDashboard::new(Arc::new(feed), Duration::from_secs(1))),
            Arc::new(EmptyService::new()),
        ];
        let registry = ServiceRegistry::new(services).expect("unique commands");
        let messenger = Arc::new(RecordingMessenger::new());
        let dispatcher = UpdateDispatcher::new(registry, Some(ADMIN_ID), messenger.clone());
        Self {
            dispatcher,
            messenger,
            ledger,
        }
    }

    pub async fn text(&self, text: &str) {
        self.dispatcher
            .handle(InboundUpdate::Text {
                chat_id: CHAT_ID,
                text: text.to_string(),
            })
            .await;
    }

    pub async fn press(&self, data: &str) {
        self.dispatcher
            .handle(InboundUpdate::Callback {
                id: "callback".to_string(),
                origin: Some(MessageRef {
                    chat_id: CHAT_ID,
                    message_id: MENU_MESSAGE_ID,
                }),
                user_id: ADMIN_ID,
                data: Some(data.to_string()),
            })
            .await;
    }
}
