//! Update handlers. Each inbound message is handled on its own: ledger
//! failures become a reply, only transport errors bubble up to the
//! dispatcher.

use engine::{EngineError, Period};
use teloxide::{prelude::*, types::CallbackQuery};

use crate::{ConfigParameters, commands::Command, ephemeral, ui};

mod entries;
mod manage;
mod reports;

pub(crate) async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id;
    tracing::debug!("command {cmd:?} in chat {}", chat_id.0);

    match cmd {
        Command::Help | Command::Start => {
            ephemeral::send_text(
                &bot,
                chat_id,
                ui::help_text(cfg.engine.amount_policy()),
                cfg.lifetimes.summary,
            )
            .await
        }
        Command::Sum => reports::summary(&bot, &cfg, chat_id, Period::All).await,
        Command::Today => reports::summary(&bot, &cfg, chat_id, Period::Today).await,
        Command::Week => reports::summary(&bot, &cfg, chat_id, Period::Week).await,
        Command::Month => reports::summary(&bot, &cfg, chat_id, Period::Month).await,
        Command::Top => reports::top(&bot, &cfg, chat_id).await,
        Command::Detail(category) => reports::detail(&bot, &cfg, chat_id, &category).await,
        Command::Delete(arg) => manage::delete(&bot, &cfg, chat_id, &arg).await,
        Command::Clear => manage::ask_clear(&bot, chat_id).await,
        Command::Revenue(args) => entries::revenue(&bot, &cfg, chat_id, &args).await,
        Command::TotalRevenue => reports::total_revenue(&bot, &cfg, chat_id).await,
        Command::Export => reports::export(&bot, &cfg, chat_id).await,
    }
}

/// Free text is an expense line; anything that looks like a command reached
/// this point because no command matched it.
pub(crate) async fn handle_text(bot: Bot, msg: Message, cfg: ConfigParameters) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    if text.trim_start().starts_with('/') {
        return ephemeral::send_text(&bot, msg.chat.id, ui::UNKNOWN_COMMAND, cfg.lifetimes.hint)
            .await;
    }
    entries::record(&bot, &cfg, msg.chat.id, text).await
}

pub(crate) async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    manage::on_callback(&bot, &cfg, q).await
}

/// Replies to a failed ledger call: a hint for bad input, a generic notice
/// for store failures.
async fn report_error(
    bot: &Bot,
    cfg: &ConfigParameters,
    chat_id: ChatId,
    err: &EngineError,
    example: &str,
) -> ResponseResult<()> {
    if err.is_user_error() {
        tracing::debug!("rejected input in chat {}: {err}", chat_id.0);
        ephemeral::send_text(
            bot,
            chat_id,
            ui::user_error_text(err, example),
            cfg.lifetimes.hint,
        )
        .await
    } else {
        tracing::error!("ledger failure in chat {}: {err}", chat_id.0);
        ephemeral::send_text(bot, chat_id, ui::STORE_FAILURE, cfg.lifetimes.hint).await
    }
}

/// Rewrites the CSV mirror after a mutation, when one is configured.
async fn refresh_mirror(cfg: &ConfigParameters) {
    if let Some(path) = cfg.csv_mirror.as_deref()
        && let Err(err) = cfg.engine.mirror_csv(path).await
    {
        tracing::error!("csv mirror update failed: {err}");
    }
}
