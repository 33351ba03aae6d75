//! Telegram update handlers.
//!
//! Converts a teloxide message into a core `IncomingUpdate` and hands it to the
//! command router. Non-text messages are ignored.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use rentbot_core::{
    domain::{ChatId, UserId},
    messaging::types::IncomingUpdate,
    router::process_update,
};

use crate::router::AppState;

pub async fn handle_message(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(update) = to_update(&msg) else {
        return Ok(());
    };

    // One update at a time: registry writes are read-modify-write on a plain file.
    let _guard = state.serial.lock().await;
    if let Err(e) = process_update(&state.router, state.messenger.as_ref(), update).await {
        tracing::warn!(chat_id = msg.chat.id.0, "failed to deliver reply: {e}");
    }

    Ok(())
}

fn to_update(msg: &Message) -> Option<IncomingUpdate> {
    let text = msg.text()?;
    let user_id = msg.from().map(|u| UserId(u.id.0 as i64));
    Some(IncomingUpdate::from_text(ChatId(msg.chat.id.0), user_id, text))
}
