mod command;
mod delivery;

use command::{get_command_handler, handle_unknown_command};
use teloxide::{
    dispatching::{UpdateFilterExt, UpdateHandler},
    dptree,
    types::{Me, Message, Update},
};

use crate::error::HandlerResult;

pub fn get_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    Update::filter_message()
        .branch(get_command_handler())
        .branch(dptree::filter(is_command_for_me).endpoint(handle_unknown_command))
        .branch(dptree::endpoint(handle_message_unknown))
}

/// `/cmd` or `/cmd@this_bot`. Commands for other bots in the group are not ours.
fn is_command_for_me(msg: Message, me: Me) -> bool {
    let Some(command) = msg.text().and_then(|text| text.split_whitespace().next()) else {
        return false;
    };

    if !command.starts_with('/') {
        return false;
    }

    match command.split_once('@') {
        Some((_, username)) => username.eq_ignore_ascii_case(me.username()),
        None => true,
    }
}

// Plain chatter in a group is none of the bot's business.
async fn handle_message_unknown(msg: Message) -> HandlerResult<()> {
    debug!("Ignoring message {} in chat {}", msg.id.0, msg.chat.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use teloxide_tests::{MockMe, MockMessageText};

    use super::*;

    fn is_for_me(text: &str) -> bool {
        is_command_for_me(MockMessageText::new().text(text).build(), MockMe::new().build())
    }

    #[test]
    fn test_is_command_for_me() {
        assert!(is_for_me("/help"));
        assert!(is_for_me("/add_handle alice"));
        assert!(is_for_me("/help@test_bot"));
        assert!(is_for_me("/help@Test_Bot"));

        assert!(!is_for_me("/help@some_other_bot"));
        assert!(!is_for_me("hello /help"));
        assert!(!is_for_me("hello"));
    }
}
