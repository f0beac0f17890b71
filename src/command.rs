use teloxide::{
    macros::BotCommands,
    prelude::Requester,
    types::BotCommand,
    Bot,
};

use crate::error::HandlerResult;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "snake_case", parse_with = "split")]
pub enum Command {
    Start,
    Help,
    AddHandle { handle: String, timezone: String },
    ListHandles,
    UserStats,
    AllUserStats,
}

impl Command {
    pub fn user_commands() -> Vec<BotCommand> {
        vec![
            BotCommand::new("start", t!("commands.description.start")),
            BotCommand::new("help", t!("commands.description.help")),
            BotCommand::new("add_handle", t!("commands.description.add_handle")),
            BotCommand::new("list_handles", t!("commands.description.list_handles")),
            BotCommand::new("user_stats", t!("commands.description.user_stats")),
            BotCommand::new("all_user_stats", t!("commands.description.all_user_stats")),
        ]
    }
}

pub async fn setup_user_commands(bot: &Bot) -> HandlerResult<()> {
    bot.delete_my_commands().await?;
    bot.set_my_commands(Command::user_commands()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use teloxide::utils::command::BotCommands;

    use super::*;

    #[test]
    fn test_parse_add_handle() {
        let cmd = Command::parse("/add_handle alice IST", "leetstash_bot").unwrap();
        assert_eq!(
            cmd,
            Command::AddHandle {
                handle: "alice".to_string(),
                timezone: "IST".to_string()
            }
        );
    }

    #[test]
    fn test_parse_add_handle_requires_both_arguments() {
        assert!(Command::parse("/add_handle alice", "leetstash_bot").is_err());
        assert!(Command::parse("/add_handle", "leetstash_bot").is_err());
    }

    #[test]
    fn test_parse_stats_commands() {
        assert_eq!(Command::parse("/user_stats", "leetstash_bot").unwrap(), Command::UserStats);
        assert_eq!(
            Command::parse("/all_user_stats@leetstash_bot", "leetstash_bot").unwrap(),
            Command::AllUserStats
        );
        assert_eq!(Command::parse("/list_handles", "leetstash_bot").unwrap(), Command::ListHandles);
    }

    #[test]
    fn test_user_commands_match_parser() {
        for command in Command::user_commands() {
            let text = match command.command.as_str() {
                "add_handle" => "/add_handle alice IST".to_string(),
                other => format!("/{}", other),
            };
            assert!(Command::parse(&text, "leetstash_bot").is_ok(), "{} should parse", text);
        }
    }
}
