use teloxide::prelude::*;

use super::{refresh_mirror, report_error};
use crate::{ConfigParameters, ephemeral, ui};

const REVENUE_EXAMPLE: &str = "Example: /revenue 1200 salary";

pub(super) async fn record(
    bot: &Bot,
    cfg: &ConfigParameters,
    chat_id: ChatId,
    text: &str,
) -> ResponseResult<()> {
    match cfg.engine.record_text(text).await {
        Ok(recorded) => {
            refresh_mirror(cfg).await;
            bot.send_message(
                chat_id,
                ui::recorded_text(&recorded, cfg.engine.amount_policy()),
            )
            .await?;
            Ok(())
        }
        Err(err) => report_error(bot, cfg, chat_id, &err, ui::ENTRY_EXAMPLE).await,
    }
}

pub(super) async fn revenue(
    bot: &Bot,
    cfg: &ConfigParameters,
    chat_id: ChatId,
    args: &str,
) -> ResponseResult<()> {
    if args.is_empty() {
        return ephemeral::send_text(bot, chat_id, ui::REVENUE_USAGE, cfg.lifetimes.hint).await;
    }

    match cfg.engine.record_revenue(args).await {
        Ok(recorded) => {
            refresh_mirror(cfg).await;
            bot.send_message(
                chat_id,
                ui::revenue_recorded_text(&recorded, cfg.engine.amount_policy()),
            )
            .await?;
            Ok(())
        }
        Err(err) => report_error(bot, cfg, chat_id, &err, REVENUE_EXAMPLE).await,
    }
}
