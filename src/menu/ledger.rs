use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, instrument};

use crate::models::{Document, InlineAction, Keyboard, LedgerEntry, MenuResponse, TextMessage};
use crate::storage::Ledger;
use crate::Result;

use super::MenuService;

const NAME: &str = "Balance tracker";
const COMMAND: &str = "ledger";
const MINUS: &str = "minus";
const PLUS: &str = "plus";
const HISTORY: &str = "history";
const EXPORT_HISTORY: &str = "export-history";
const MAIN_MENU: &str = "main-menu";
const STATS: &str = "stats";
const CLOSE: &str = "close";
const MAIN_MENU_HEADER: &str = "Choose action";
const HISTORY_HEADER: &str = "History";
const HISTORY_PAGE_SIZE: i64 = 5;
const EXPORT_FILE_TIME_FORMAT: &str = "%d.%m.%Y %H-%M";
/// кнопки списания и пороги баланса, с которых они видны
const MINUS_STEPS: [i64; 3] = [25, 50, 100];
const PLUS_STEPS: [i64; 3] = [25, 100, 1000];

/// Учет баланса поверх журнала [`Ledger`]
pub struct LedgerMenu {
    ledger: Arc<dyn Ledger>,
}

impl LedgerMenu {
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self { ledger }
    }

    fn build_command(&self, cmd: &str) -> String {
        format!("{COMMAND} {cmd}")
    }

    async fn last_entry(&self) -> Result<Option<LedgerEntry>> {
        Ok(self.ledger.history(Some(1), 0).await?.into_iter().next())
    }

    /// Клавиатура главного меню для состояния после `last`
    fn balance_keyboard(&self, last: Option<&LedgerEntry>) -> Keyboard {
        let balance = last.map(|e| e.balance).unwrap_or_default();
        let mut rows = Vec::new();
        let minus = MINUS_STEPS
            .iter()
            .filter(|step| balance >= **step)
            .map(|step| {
                InlineAction::new(format!("-{step}"), self.build_command(&format!("{MINUS} {step}")))
            })
            .collect::<Vec<_>>();
        if !minus.is_empty() {
            rows.push(minus);
        }
        rows.push(
            PLUS_STEPS
                .iter()
                .map(|step| {
                    InlineAction::new(format!("+{step}"), self.build_command(&format!("{PLUS} {step}")))
                })
                .collect(),
        );
        let mut last_row = Vec::new();
        if last.is_some() {
            last_row.push(InlineAction::new("History", self.build_command(HISTORY)));
            last_row.push(InlineAction::new("Stats", self.build_command(STATS)));
        }
        last_row.push(InlineAction::new("Close", self.build_command(CLOSE)));
        rows.push(last_row);
        Keyboard::new(rows)
    }

    fn main_menu_for(&self, last: Option<&LedgerEntry>) -> Result<TextMessage> {
        let message = TextMessage::builder()
            .text(MAIN_MENU_HEADER)
            .keyboard(self.balance_keyboard(last))
            .build()?;
        Ok(message)
    }

    async fn main_menu(&self) -> Result<TextMessage> {
        let last = self.last_entry().await?;
        self.main_menu_for(last.as_ref())
    }

    async fn change_balance(&self, sign: i64, tokens: &[&str]) -> Result<MenuResponse> {
        let Some(amount) = tokens.get(2).and_then(|v| v.parse::<u32>().ok()) else {
            return Ok(MenuResponse::answer(format!(
                "Received {}. Unrecognized {NAME} value",
                tokens.join(" ")
            )));
        };
        let before = self.last_entry().await?;
        let initial_buttons = self.balance_keyboard(before.as_ref()).button_count();
        let entry = self.ledger.create_entry(sign * i64::from(amount)).await?;
        info!("Баланс изменен на {}, теперь {}", entry.change, entry.balance);
        let announcement =
            TextMessage::plain(format!("Received {}. Balance {}", entry.change, entry.balance));
        let result_buttons = self.balance_keyboard(Some(&entry)).button_count();
        if initial_buttons != result_buttons {
            Ok(MenuResponse::send_and_edit(
                announcement,
                self.main_menu_for(Some(&entry))?,
            ))
        } else {
            Ok(MenuResponse::send(announcement))
        }
    }

    async fn history(&self) -> Result<MenuResponse> {
        let entries = self.ledger.history(Some(HISTORY_PAGE_SIZE), 0).await?;
        let mut rows = entries
            .iter()
            .map(|e| vec![InlineAction::new(e.history_line(), self.build_command(MAIN_MENU))])
            .collect::<Vec<_>>();
        rows.push(vec![
            InlineAction::new("Export history", self.build_command(EXPORT_HISTORY)),
            InlineAction::new("Back", self.build_command(MAIN_MENU)),
        ]);
        let message = TextMessage::builder()
            .text(HISTORY_HEADER)
            .keyboard(Keyboard::new(rows))
            .build()?;
        Ok(MenuResponse::edit(message))
    }

    async fn stats(&self) -> Result<MenuResponse> {
        let entries = self.ledger.history(None, 0).await?;
        let total_spent = entries
            .iter()
            .filter(|e| e.change < 0)
            .map(|e| -e.change)
            .sum::<i64>();
        Ok(MenuResponse::answer(format!("Total spent: {total_spent}")))
    }

    /// Выгрузка всей истории от старых записей к новым
    async fn export_history(&self) -> Result<MenuResponse> {
        let mut entries = self.ledger.history(None, 0).await?;
        entries.reverse();
        let text = entries
            .iter()
            .map(LedgerEntry::export_line)
            .collect::<Vec<_>>()
            .join("\r\n");
        let file_name = format!(
            "history {}.txt",
            Utc::now().format(EXPORT_FILE_TIME_FORMAT)
        );
        info!("Выгружаю {} записей в '{file_name}'", entries.len());
        Ok(MenuResponse::file(Document {
            file_name,
            data: text.into_bytes(),
        }))
    }
}

#[async_trait]
impl MenuService for LedgerMenu {
    fn name(&self) -> &str {
        NAME
    }
    fn command(&self) -> &str {
        COMMAND
    }
    async fn init(&self) -> Result<MenuResponse> {
        Ok(MenuResponse::send(self.main_menu().await?))
    }
    #[instrument(name = "ledger command", skip(self))]
    async fn process_command(&self, tokens: &[&str], is_admin: bool) -> Result<MenuResponse> {
        let Some(subcommand) = tokens.get(1) else {
            return Ok(MenuResponse::empty());
        };
        match *subcommand {
            MINUS => self.change_balance(-1, tokens).await,
            PLUS => self.change_balance(1, tokens).await,
            HISTORY => self.history().await,
            STATS => self.stats().await,
            EXPORT_HISTORY => self.export_history().await,
            MAIN_MENU => Ok(MenuResponse::edit(self.main_menu().await?)),
            CLOSE => Ok(MenuResponse::delete()),
            _ => Ok(MenuResponse::empty()),
        }
    }
}
