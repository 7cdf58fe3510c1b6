//! Reply texts and keyboards. Everything here is pure so it can be tested
//! without a bot.

use engine::{
    AmountPolicy, CategoryDetail, CategoryTotals, EngineError, Money, ParseError, Period, Recorded,
};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::charts::ascii_bar;

pub(crate) const CLEAR_CONFIRM: &str = "clear:confirm";
pub(crate) const CLEAR_CANCEL: &str = "clear:cancel";

pub(crate) const ENTRY_EXAMPLE: &str = "Example: Food 25 Lunch";
pub(crate) const STORE_FAILURE: &str = "⚠️ Something went wrong, nothing was changed. Please try again.";
pub(crate) const UNKNOWN_COMMAND: &str = "Unknown command. Send /help to see what I can do.";
pub(crate) const NO_EXPENSES: &str = "No expenses logged yet.";
pub(crate) const NO_ENTRIES_TO_EXPORT: &str = "Nothing to export yet.";

pub(crate) const DETAIL_USAGE: &str = "Usage: /detail <category>";
pub(crate) const DELETE_USAGE: &str = "Usage: /delete <id>";
pub(crate) const REVENUE_USAGE: &str = "Usage: /revenue <amount> [note]\nExample: /revenue 1200 salary";
pub(crate) const INVALID_ID: &str = "Invalid ID.";

pub(crate) const CLEAR_PROMPT: &str = "🗑️ This will permanently delete all data. Continue?";
pub(crate) const CLEARED: &str = "✅ All data cleared.";
pub(crate) const CANCELLED: &str = "❌ Cancelled.";

const BAR_WIDTH: usize = 10;
const DETAIL_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn help_text(policy: AmountPolicy) -> String {
    let amounts = match policy {
        AmountPolicy::Integer => "💡 Amounts are whole dollars, no need for the $ sign.",
        AmountPolicy::Decimal => "💡 Amounts may have cents (12.50), no need for the $ sign.",
    };
    format!(
        "💰 Welcome to your expense tracker!\n\
         To log an expense, simply type:\n\
         Category Amount [optional note]\n\
         {ENTRY_EXAMPLE}\n\n\
         ✨ Available commands:\n\
         📊 /sum  total expenses by category\n\
         🗓 /today  today's expenses\n\
         📅 /week  this week's expenses\n\
         📈 /month  this month's expenses\n\
         🏆 /top  expense charts\n\
         🔎 /detail <category>  total and entries of a category\n\
         ❌ /delete <id>  delete one entry\n\
         🗑️ /clear  delete all data\n\
         💵 /revenue <amount> [note]  log a revenue\n\
         💵 /totalrevenue  total revenue\n\
         📤 /export  download every entry as CSV\n\n\
         {amounts}"
    )
}

pub(crate) fn recorded_text(recorded: &Recorded, policy: AmountPolicy) -> String {
    format!(
        "✅ Your transaction has been logged (ID: {}).\n💰 {} All-Time Total: {}",
        recorded.id,
        recorded.label,
        recorded.category_total.format(policy)
    )
}

pub(crate) fn revenue_recorded_text(recorded: &Recorded, policy: AmountPolicy) -> String {
    format!(
        "✅ Revenue of {} logged (ID: {}).\n💵 Total Revenue: {}",
        recorded.amount.format(policy),
        recorded.id,
        recorded.category_total.format(policy)
    )
}

pub(crate) fn total_revenue_text(total: Money, policy: AmountPolicy) -> String {
    format!("💵 Total Revenue: {}", total.format(policy))
}

pub(crate) fn delete_text(id: i64, found: bool) -> String {
    if found {
        format!("❌ Entry {id} deleted.")
    } else {
        format!("No entry found with ID {id}.")
    }
}

fn period_title(period: Period) -> &'static str {
    match period {
        Period::Today => "Today",
        Period::Week => "Week",
        Period::Month => "Month",
        Period::All => "All-Time",
    }
}

/// Per-category listing for `/sum`, `/today`, `/week` and `/month`.
pub(crate) fn summary_text(period: Period, totals: &CategoryTotals, policy: AmountPolicy) -> String {
    if totals.is_empty() {
        return match period {
            Period::All => NO_EXPENSES.to_string(),
            other => format!("No {} expenses logged yet.", period_title(other).to_lowercase()),
        };
    }

    let mut text = match period {
        Period::All => String::from("💰 Total Expenses by Category:\n\n"),
        other => format!("📅 {} Expenses:\n\n", period_title(other)),
    };
    for row in totals.iter() {
        text.push_str(&format!("{}: {}\n", row.label, row.total.format(policy)));
    }
    text.push_str(&format!("\nTotal: {}", totals.grand_total.format(policy)));
    text
}

/// Text companion of the `/top` charts, with a gauge per category.
pub(crate) fn top_summary_text(totals: &CategoryTotals, policy: AmountPolicy) -> String {
    let max = totals
        .iter()
        .map(|row| gauge_value(row.total))
        .max()
        .unwrap_or(0);

    let mut text = String::from("🏆 Expense Charts Summary:\n");
    for row in totals.iter() {
        text.push_str(&format!(
            "\n{} {}: {}",
            ascii_bar(gauge_value(row.total), max, BAR_WIDTH),
            row.label,
            row.total.format(policy)
        ));
    }
    text.push_str(&format!("\n\nTotal: {}", totals.grand_total.format(policy)));
    text
}

fn gauge_value(total: Money) -> u64 {
    u64::try_from(total.minor()).unwrap_or(0)
}

pub(crate) fn detail_text(detail: &CategoryDetail, policy: AmountPolicy) -> String {
    let mut text = format!(
        "💰 {} · All-Time Total: {}\n",
        detail.label,
        detail.total.format(policy)
    );
    for entry in &detail.entries {
        text.push_str(&format!(
            "\n#{} · {} · {}",
            entry.id,
            entry.timestamp.format(DETAIL_TIMESTAMP),
            entry.amount.format(policy)
        ));
        if !entry.note.is_empty() {
            text.push_str(&format!(" · {}", entry.note));
        }
    }
    text
}

/// Hint for an input the ledger refused. Store failures never reach this.
pub(crate) fn user_error_text(err: &EngineError, example: &str) -> String {
    match err {
        EngineError::Parse(ParseError::Empty) | EngineError::MissingArguments(_) => {
            format!("❌ Please enter Category and Amount.\n{example}")
        }
        EngineError::Parse(ParseError::NotAnInteger) => {
            format!("❌ Amount must be a whole number.\n{example}")
        }
        EngineError::Parse(ParseError::NotANumber) => {
            format!("❌ Amount must be a number.\n{example}")
        }
        EngineError::Parse(ParseError::TooManyDecimals) => {
            format!("❌ Amount can have at most two decimals.\n{example}")
        }
        EngineError::Parse(ParseError::OutOfRange) => "❌ Amount is too large.".to_string(),
        EngineError::NotFound(label) => format!("No entries for {label}."),
        other => format!("❌ {other}"),
    }
}

pub(crate) fn clear_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("✅ Confirm", CLEAR_CONFIRM),
        InlineKeyboardButton::callback("❌ Cancel", CLEAR_CANCEL),
    ]])
}
