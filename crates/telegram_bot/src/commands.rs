//! Command structs

use teloxide::utils::command::{BotCommands, ParseError};

/// Hands the whole argument text to the command, empty when absent.
pub fn rest(input: String) -> Result<(String,), ParseError> {
    Ok((input.trim().to_string(),))
}

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Commands to manage your expenses:")]
pub enum Command {
    #[command(description = "show this message.")]
    Help,
    #[command(hide)]
    Start,
    #[command(description = "total expenses by category.")]
    Sum,
    #[command(description = "today's expenses.")]
    Today,
    #[command(description = "this week's expenses.")]
    Week,
    #[command(description = "this month's expenses.")]
    Month,
    #[command(description = "expense charts.")]
    Top,
    #[command(description = "total and entries of a category.", parse_with = rest)]
    Detail(String),
    #[command(description = "delete one entry by id.", parse_with = rest)]
    Delete(String),
    #[command(description = "delete all data.")]
    Clear,
    #[command(description = "log a revenue: amount and optional note.", parse_with = rest)]
    Revenue(String),
    #[command(description = "total revenue.")]
    TotalRevenue,
    #[command(description = "download every entry as CSV.")]
    Export,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_are_kept_whole() {
        assert_eq!(
            Command::parse("/detail eating out", "ledger_bot").unwrap(),
            Command::Detail("eating out".to_string())
        );
        assert_eq!(
            Command::parse("/revenue 1200 monthly salary", "ledger_bot").unwrap(),
            Command::Revenue("1200 monthly salary".to_string())
        );
    }

    #[test]
    fn missing_arguments_parse_as_empty() {
        assert_eq!(
            Command::parse("/delete", "ledger_bot").unwrap(),
            Command::Delete(String::new())
        );
    }

    #[test]
    fn names_are_lowercase() {
        assert_eq!(
            Command::parse("/totalrevenue", "ledger_bot").unwrap(),
            Command::TotalRevenue
        );
        assert!(Command::parse("/unknown", "ledger_bot").is_err());
    }

    #[test]
    fn start_is_not_advertised() {
        let names: Vec<String> = Command::bot_commands()
            .into_iter()
            .map(|cmd| cmd.command.trim_start_matches('/').to_string())
            .collect();
        assert!(names.iter().any(|name| name == "sum"));
        assert!(!names.iter().any(|name| name == "start"));
    }
}
