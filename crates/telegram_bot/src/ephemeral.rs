//! Replies that remove themselves after a while.

use std::time::Duration;

use teloxide::{
    prelude::*,
    types::{InputFile, MessageId},
};

/// How long ephemeral replies stay in the chat. A zero duration keeps them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lifetimes {
    /// Summaries, charts and help.
    pub summary: Duration,
    /// Usage and error hints.
    pub hint: Duration,
}

impl Default for Lifetimes {
    fn default() -> Self {
        Self {
            summary: Duration::from_secs(60),
            hint: Duration::from_secs(30),
        }
    }
}

/// Schedules the deletion of a sent message. Best effort: a failure (the
/// message is already gone, the bot lost rights) is only logged.
pub(crate) fn expire(bot: &Bot, message: &Message, after: Duration) {
    if after.is_zero() {
        return;
    }

    let bot = bot.clone();
    let chat_id = message.chat.id;
    let message_id: MessageId = message.id;
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        if let Err(err) = bot.delete_message(chat_id, message_id).await {
            tracing::debug!("auto-delete of message {} failed: {err}", message_id.0);
        }
    });
}

/// Sends `text` and schedules its deletion.
pub(crate) async fn send_text(
    bot: &Bot,
    chat_id: ChatId,
    text: impl Into<String>,
    after: Duration,
) -> ResponseResult<()> {
    let sent = bot.send_message(chat_id, text).await?;
    expire(bot, &sent, after);
    Ok(())
}

/// Sends an in-memory document and schedules its deletion.
pub(crate) async fn send_document(
    bot: &Bot,
    chat_id: ChatId,
    name: &str,
    data: Vec<u8>,
    after: Duration,
) -> ResponseResult<()> {
    let sent = bot
        .send_document(chat_id, InputFile::memory(data).file_name(name.to_string()))
        .await?;
    expire(bot, &sent, after);
    Ok(())
}
