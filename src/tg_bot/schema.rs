use crate::dispatcher::{InboundUpdate, MessageRef, UpdateDispatcher};
use anyhow::Result;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::UpdateKind;
use tracing::instrument;

pub fn router() -> UpdateHandler<anyhow::Error> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(message_handler))
        .branch(Update::filter_edited_message().endpoint(message_handler))
        .branch(Update::filter_callback_query().endpoint(cb_handler))
        .branch(dptree::endpoint(other_handler))
}

#[instrument(
    name = "message handler",
    skip_all,
    fields(
        from = %msg.from.clone().map(|u| u.full_name()).unwrap_or_default(),
        id = %msg.from.clone().map(|u| u.id.0).unwrap_or_default(),
    )
)]
async fn message_handler(msg: Message, dispatcher: Arc<UpdateDispatcher>) -> Result<()> {
    let update = match msg.text() {
        Some(text) => InboundUpdate::Text {
            chat_id: msg.chat.id.0,
            text: text.to_string(),
        },
        None => InboundUpdate::Unsupported("message without text".to_string()),
    };
    dispatcher.handle(update).await;
    Ok(())
}

#[instrument(
    name = "callback handler",
    skip_all,
    fields(
        from = %q.from.full_name(),
        id = %q.from.id.0,
    )
)]
async fn cb_handler(q: CallbackQuery, dispatcher: Arc<UpdateDispatcher>) -> Result<()> {
    let origin = q.message.as_ref().map(|m| MessageRef {
        chat_id: m.chat().id.0,
        message_id: m.id().0,
    });
    dispatcher
        .handle(InboundUpdate::Callback {
            id: q.id.clone(),
            origin,
            user_id: q.from.id.0,
            data: q.data.clone(),
        })
        .await;
    Ok(())
}

async fn other_handler(update: Update, dispatcher: Arc<UpdateDispatcher>) -> Result<()> {
    dispatcher
        .handle(InboundUpdate::Unsupported(kind_name(&update.kind).to_string()))
        .await;
    Ok(())
}

fn kind_name(kind: &UpdateKind) -> &'static str {
    match kind {
        UpdateKind::ChannelPost(_) => "channel post",
        UpdateKind::EditedChannelPost(_) => "edited channel post",
        UpdateKind::InlineQuery(_) => "inline query",
        UpdateKind::ChosenInlineResult(_) => "chosen inline result",
        UpdateKind::Poll(_) => "poll",
        UpdateKind::PollAnswer(_) => "poll answer",
        UpdateKind::MyChatMember(_) => "my chat member",
        UpdateKind::ChatMember(_) => "chat member",
        UpdateKind::ChatJoinRequest(_) => "chat join request",
        _ => "other",
    }
}
