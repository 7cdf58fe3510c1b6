//! Read-only views: period summaries, charts, drill-downs and the export.

use engine::{Period, write_csv};
use teloxide::{prelude::*, types::InputFile};

use super::report_error;
use crate::{ConfigParameters, charts, ephemeral, ui};

pub(super) async fn summary(
    bot: &Bot,
    cfg: &ConfigParameters,
    chat_id: ChatId,
    period: Period,
) -> ResponseResult<()> {
    match cfg.engine.period_summary(period, cfg.engine.now()).await {
        Ok(totals) => {
            let text = ui::summary_text(period, &totals, cfg.engine.amount_policy());
            ephemeral::send_text(bot, chat_id, text, cfg.lifetimes.summary).await
        }
        Err(err) => report_error(bot, cfg, chat_id, &err, ui::ENTRY_EXAMPLE).await,
    }
}

pub(super) async fn top(bot: &Bot, cfg: &ConfigParameters, chat_id: ChatId) -> ResponseResult<()> {
    let totals = match cfg.engine.period_summary(Period::All, cfg.engine.now()).await {
        Ok(totals) => totals,
        Err(err) => return report_error(bot, cfg, chat_id, &err, ui::ENTRY_EXAMPLE).await,
    };
    if totals.is_empty() {
        return ephemeral::send_text(bot, chat_id, ui::NO_EXPENSES, cfg.lifetimes.summary).await;
    }

    let policy = cfg.engine.amount_policy();
    let lifetime = cfg.lifetimes.summary;
    ephemeral::send_document(
        bot,
        chat_id,
        "categories_bar.svg",
        charts::bar_chart_svg(&totals, policy).into_bytes(),
        lifetime,
    )
    .await?;
    if let Some(pie) = charts::pie_chart_svg(&totals) {
        ephemeral::send_document(bot, chat_id, "categories_pie.svg", pie.into_bytes(), lifetime)
            .await?;
    }
    ephemeral::send_text(
        bot,
        chat_id,
        ui::top_summary_text(&totals, policy),
        lifetime,
    )
    .await
}

pub(super) async fn detail(
    bot: &Bot,
    cfg: &ConfigParameters,
    chat_id: ChatId,
    category: &str,
) -> ResponseResult<()> {
    if category.is_empty() {
        return ephemeral::send_text(bot, chat_id, ui::DETAIL_USAGE, cfg.lifetimes.hint).await;
    }

    match cfg.engine.category_detail(category).await {
        Ok(detail) => {
            let text = ui::detail_text(&detail, cfg.engine.amount_policy());
            ephemeral::send_text(bot, chat_id, text, cfg.lifetimes.summary).await
        }
        Err(err) => report_error(bot, cfg, chat_id, &err, ui::DETAIL_USAGE).await,
    }
}

pub(super) async fn total_revenue(
    bot: &Bot,
    cfg: &ConfigParameters,
    chat_id: ChatId,
) -> ResponseResult<()> {
    match cfg.engine.revenue_total().await {
        Ok(total) => {
            let text = ui::total_revenue_text(total, cfg.engine.amount_policy());
            ephemeral::send_text(bot, chat_id, text, cfg.lifetimes.summary).await
        }
        Err(err) => report_error(bot, cfg, chat_id, &err, ui::REVENUE_USAGE).await,
    }
}

/// Sends the whole ledger as a CSV document. The document is kept.
pub(super) async fn export(
    bot: &Bot,
    cfg: &ConfigParameters,
    chat_id: ChatId,
) -> ResponseResult<()> {
    let data = match cfg.engine.all_entries().await {
        Ok(entries) if entries.is_empty() => {
            return ephemeral::send_text(
                bot,
                chat_id,
                ui::NO_ENTRIES_TO_EXPORT,
                cfg.lifetimes.hint,
            )
            .await;
        }
        Ok(entries) => write_csv(&entries, Vec::new()),
        Err(err) => Err(err),
    };

    match data {
        Ok(data) => {
            let name = format!("ledger_{}.csv", cfg.engine.now().format("%Y%m%d_%H%M%S"));
            bot.send_document(chat_id, InputFile::memory(data).file_name(name))
                .await?;
            Ok(())
        }
        Err(err) => report_error(bot, cfg, chat_id, &err, ui::ENTRY_EXAMPLE).await,
    }
}
