//! Destructive commands: point delete and the confirmed full clear.

use teloxide::{prelude::*, types::CallbackQuery};

use super::{refresh_mirror, report_error};
use crate::{ConfigParameters, ephemeral, ui};

pub(super) async fn delete(
    bot: &Bot,
    cfg: &ConfigParameters,
    chat_id: ChatId,
    arg: &str,
) -> ResponseResult<()> {
    let Some(token) = arg.split_whitespace().next() else {
        return ephemeral::send_text(bot, chat_id, ui::DELETE_USAGE, cfg.lifetimes.hint).await;
    };
    let id = match token.parse::<i64>() {
        Ok(id) if id > 0 => id,
        _ => return ephemeral::send_text(bot, chat_id, ui::INVALID_ID, cfg.lifetimes.hint).await,
    };

    match cfg.engine.delete(id).await {
        Ok(found) => {
            if found {
                refresh_mirror(cfg).await;
            }
            ephemeral::send_text(bot, chat_id, ui::delete_text(id, found), cfg.lifetimes.summary)
                .await
        }
        Err(err) => report_error(bot, cfg, chat_id, &err, ui::DELETE_USAGE).await,
    }
}

/// The clear itself only happens from the confirmation button.
pub(super) async fn ask_clear(bot: &Bot, chat_id: ChatId) -> ResponseResult<()> {
    bot.send_message(chat_id, ui::CLEAR_PROMPT)
        .reply_markup(ui::clear_keyboard())
        .await?;
    Ok(())
}

pub(super) async fn on_callback(
    bot: &Bot,
    cfg: &ConfigParameters,
    q: CallbackQuery,
) -> ResponseResult<()> {
    if let Err(err) = bot.answer_callback_query(q.id.clone()).await {
        tracing::debug!("callback answer failed: {err}");
    }

    let Some(message) = q.message.as_ref() else {
        return Ok(());
    };
    let (chat_id, message_id) = (message.chat().id, message.id());

    let text = match q.data.as_deref() {
        Some(ui::CLEAR_CONFIRM) => match cfg.engine.clear_with_policy().await {
            Ok(removed) => {
                tracing::info!("chat {} cleared {removed} entries", chat_id.0);
                refresh_mirror(cfg).await;
                ui::CLEARED
            }
            Err(err) => {
                tracing::error!("clear failed: {err}");
                ui::STORE_FAILURE
            }
        },
        Some(ui::CLEAR_CANCEL) => ui::CANCELLED,
        other => {
            tracing::debug!("ignored callback data {other:?}");
            return Ok(());
        }
    };

    bot.edit_message_text(chat_id, message_id, text).await?;
    Ok(())
}
