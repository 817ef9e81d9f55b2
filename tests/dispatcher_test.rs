mod common;

use common::{TestBot, CHAT_ID, MENU_MESSAGE_ID};
use menubot::models::TextMessage;
use menubot::storage::Ledger;
use menubot::testkit::{SentAction, StaticPriceFeed};

fn labels(message: &TextMessage) -> Vec<String> {
    message
        .keyboard
        .as_ref()
        .map(|k| k.labels().into_iter().map(String::from).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn ledger_command_shows_main_menu() {
    let bot = TestBot::new();
    bot.text("/ledger").await;
    let actions = bot.messenger.visible_actions();
    let [SentAction::Text { chat_id, message }] = actions.as_slice() else {
        panic!("unexpected actions {actions:?}");
    };
    assert_eq!(*chat_id, CHAT_ID);
    assert_eq!(message.text, "Choose action");
    assert_eq!(labels(message), vec!["+25", "+100", "+1000", "Close"]);
}

#[tokio::test]
async fn minus_across_threshold_announces_and_refreshes_menu() -> anyhow::Result<()> {
    let bot = TestBot::new();
    bot.ledger.create_entry(100).await?;
    bot.press("ledger minus 25").await;

    let actions = bot.messenger.actions();
    assert_eq!(actions.len(), 2, "{actions:?}");
    assert_eq!(
        actions[0],
        SentAction::Text {
            chat_id: CHAT_ID,
            message: TextMessage::plain("Received -25. Balance 75"),
        }
    );
    let SentAction::Edit {
        message_id,
        message,
        ..
    } = &actions[1]
    else {
        panic!("expected menu edit, got {:?}", actions[1]);
    };
    assert_eq!(*message_id, MENU_MESSAGE_ID);
    assert_eq!(
        labels(message),
        vec!["-25", "-50", "+25", "+100", "+1000", "History", "Stats", "Close"]
    );
    assert_eq!(bot.ledger.last_balance().await?, 75);
    Ok(())
}

#[tokio::test]
async fn unparseable_amount_only_answers() -> anyhow::Result<()> {
    let bot = TestBot::new();
    bot.press("ledger plus lots").await;
    assert_eq!(
        bot.messenger.actions(),
        vec![SentAction::Answer {
            callback_id: "callback".into(),
            text: "Received ledger plus lots. Unrecognized Balance tracker value".into(),
        }]
    );
    assert!(bot.ledger.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn stats_is_a_toast() -> anyhow::Result<()> {
    let bot = TestBot::new();
    for change in [1000, -25, -100, 25] {
        bot.ledger.create_entry(change).await?;
    }
    bot.press("ledger stats").await;
    assert_eq!(
        bot.messenger.actions(),
        vec![SentAction::Answer {
            callback_id: "callback".into(),
            text: "Total spent: 125".into(),
        }]
    );
    Ok(())
}

#[tokio::test]
async fn close_deletes_menu() {
    let bot = TestBot::new();
    bot.press("ledger close").await;
    assert_eq!(
        bot.messenger.actions(),
        vec![SentAction::Delete {
            chat_id: CHAT_ID,
            message_id: MENU_MESSAGE_ID,
        }]
    );
}

#[tokio::test]
async fn export_sends_chronological_document() -> anyhow::Result<()> {
    let bot = TestBot::new();
    for change in [100, -25] {
        bot.ledger.create_entry(change).await?;
    }
    bot.press("ledger export-history").await;
    let actions = bot.messenger.actions();
    let [SentAction::Document { chat_id, document }] = actions.as_slice() else {
        panic!("unexpected actions {actions:?}");
    };
    assert_eq!(*chat_id, CHAT_ID);
    assert!(document.file_name.starts_with("history "));
    assert!(document.file_name.ends_with(".txt"));
    let text = String::from_utf8(document.data.clone())?;
    let lines = text.split("\r\n").collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("] 100 => 100"), "{text}");
    assert!(lines[1].ends_with("] -25 => 75"), "{text}");
    Ok(())
}

#[tokio::test]
async fn single_token_callback_runs_init() {
    let bot = TestBot::new();
    bot.press("empty").await;
    assert_eq!(
        bot.messenger.actions(),
        vec![SentAction::Text {
            chat_id: CHAT_ID,
            message: TextMessage::plain("This is empty service"),
        }]
    );
}

#[tokio::test]
async fn unknown_callback_echoes_payload() {
    let bot = TestBot::new();
    bot.press("weather today").await;
    assert_eq!(
        bot.messenger.actions(),
        vec![SentAction::Answer {
            callback_id: "callback".into(),
            text: "Received weather today".into(),
        }]
    );
}

#[tokio::test]
async fn storage_failure_is_swallowed() {
    let bot = TestBot::new();
    bot.ledger.set_failing(true);
    bot.press("ledger plus 25").await;
    assert!(bot.messenger.actions().is_empty());

    // следующее обновление обрабатывается как обычно
    bot.press("ledger close").await;
    assert_eq!(bot.messenger.actions().len(), 1);
}

#[tokio::test]
async fn unknown_text_offers_services() {
    let bot = TestBot::new();
    bot.text("hello there").await;
    let actions = bot.messenger.actions();
    let [SentAction::Text { message, .. }] = actions.as_slice() else {
        panic!("unexpected actions {actions:?}");
    };
    assert_eq!(message.text, "Choose service");
    assert_eq!(
        labels(message),
        vec!["Balance tracker", "CoinMarketCap", "Empty service"]
    );
}

#[tokio::test]
async fn dashboard_without_data_still_answers() {
    let bot = TestBot::with_feed(StaticPriceFeed::unavailable());
    bot.text("/coinmarketcap").await;
    let actions = bot.messenger.visible_actions();
    let [SentAction::Text { message, .. }] = actions.as_slice() else {
        panic!("unexpected actions {actions:?}");
    };
    assert_eq!(message.text, "<pre>No market data available</pre>");
}

#[tokio::test]
async fn balance_is_sum_of_changes() -> anyhow::Result<()> {
    let bot = TestBot::new();
    let presses = [
        "ledger plus 1000",
        "ledger minus 100",
        "ledger minus 50",
        "ledger plus 25",
        "ledger minus 25",
    ];
    for data in presses {
        bot.press(data).await;
    }
    let history = bot.ledger.history(None, 0).await?;
    assert_eq!(history.len(), presses.len());
    assert_eq!(history.iter().map(|e| e.change).sum::<i64>(), 850);
    assert_eq!(bot.ledger.last_balance().await?, 850);
    // история от новых к старым, баланс каждой записи накопительный
    for pair in history.windows(2) {
        assert_eq!(pair[0].balance, pair[1].balance + pair[0].change);
    }
    Ok(())
}
