use teloxide::dispatching::{HandlerExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{Message, User};
use teloxide::Bot;

use crate::command::Command;
use crate::error::HandlerResult;
use crate::runtime::{StatsScope, StatsTask, TaskContext};
use crate::service::timezone::{valid_abbreviations, TimezoneError};
use crate::service::RegistryError;
use crate::state::AppState;

use super::delivery::deliver;

fn display_name(user: &User) -> String {
    user.username.clone().unwrap_or_else(|| user.full_name())
}

fn help_text() -> String {
    t!("commands.help", timezones = valid_abbreviations().join(", ")).to_string()
}

async fn handle_start(bot: Bot, msg: Message) -> HandlerResult<()> {
    let first_name = msg
        .from
        .as_ref()
        .map(|user| user.first_name.clone())
        .unwrap_or_default();

    bot.send_message(msg.chat.id, t!("commands.start", first_name = first_name))
        .await?;

    Ok(())
}

async fn handle_help(bot: Bot, msg: Message) -> HandlerResult<()> {
    bot.send_message(msg.chat.id, help_text()).await?;
    Ok(())
}

pub(super) async fn handle_unknown_command(bot: Bot, msg: Message) -> HandlerResult<()> {
    bot.send_message(msg.chat.id, t!("commands.unknown_command", help = help_text()))
        .await?;
    Ok(())
}

async fn handle_add_handle(
    bot: Bot,
    msg: Message,
    user: &User,
    handle: String,
    timezone: String,
    state: &AppState,
) -> HandlerResult<()> {
    let name = display_name(user);
    let registry = &state.service_registry.registry;

    let reply = match registry
        .register(&user.id.to_string(), &name, &handle, &timezone)
        .await
    {
        Ok(registered) => t!(
            "commands.add_handle.success",
            name = name,
            handle = registered.registration.handle,
            timezone = timezone.trim().to_uppercase()
        ),
        Err(RegistryError::Timezone(TimezoneError::UnknownTimezone { valid, .. })) => {
            t!("commands.add_handle.invalid_timezone", timezones = valid.join(", "))
        }
        Err(RegistryError::InvalidHandle(reason)) => {
            info!("Rejected handle {:?} from {}: {}", handle, user.id, reason);
            t!("commands.add_handle.invalid_handle")
        }
        Err(e) => {
            error!("Failed to register handle {} for {}: {}", handle, user.id, e);
            t!("commands.add_handle.failed")
        }
    };

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

async fn handle_list_handles(bot: Bot, msg: Message, state: &AppState) -> HandlerResult<()> {
    let users = state.service_registry.registry.list().await;

    if users.is_empty() {
        bot.send_message(msg.chat.id, t!("commands.list_handles.empty")).await?;
        return Ok(());
    }

    let lines = users
        .iter()
        .map(|user| {
            t!(
                "commands.list_handles.entry",
                name = user.display_name(),
                handle = user.registration.handle,
                timezone = user.registration.timezone.name()
            )
            .to_string()
        })
        .collect::<Vec<_>>();

    bot.send_message(
        msg.chat.id,
        format!("{}\n{}", t!("commands.list_handles.header"), lines.join("\n")),
    )
    .await?;

    Ok(())
}

async fn handle_user_stats(bot: Bot, msg: Message, user: &User, state: &AppState) -> HandlerResult<()> {
    let registered = match state.service_registry.registry.get(&user.id.to_string()).await {
        Ok(registered) => registered,
        Err(RegistryError::NoRegistration(_)) => {
            bot.send_message(msg.chat.id, t!("commands.user_stats.not_registered"))
                .await?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    submit_stats(
        bot,
        msg,
        user,
        vec![registered],
        StatsScope::Requester,
        state,
        t!("commands.user_stats.processing").to_string(),
    )
    .await
}

async fn handle_all_user_stats(bot: Bot, msg: Message, user: &User, state: &AppState) -> HandlerResult<()> {
    let users = state.service_registry.registry.all_handles().await;

    if users.is_empty() {
        bot.send_message(msg.chat.id, t!("commands.list_handles.empty")).await?;
        return Ok(());
    }

    submit_stats(
        bot,
        msg,
        user,
        users,
        StatsScope::Everyone,
        state,
        t!("commands.all_user_stats.processing").to_string(),
    )
    .await
}

async fn submit_stats(
    bot: Bot,
    msg: Message,
    user: &User,
    targets: Vec<crate::service::RegisteredUser>,
    scope: StatsScope,
    state: &AppState,
    processing_text: String,
) -> HandlerResult<()> {
    let task = StatsTask::new(
        targets,
        TaskContext {
            user_id: user.id.0,
            chat_id: msg.chat.id.0,
            scope,
        },
    );

    let result_rx = match state.runtime.submit(task) {
        Ok(result_rx) => result_rx,
        Err(e) => {
            warn!("Could not queue stats for {}: {}", user.id, e);
            bot.send_message(msg.chat.id, t!("commands.busy")).await?;
            return Ok(());
        }
    };

    bot.send_message(msg.chat.id, processing_text).await?;

    deliver(
        &bot,
        state.service_registry.formatter.as_ref(),
        result_rx,
        msg.chat.id,
        scope,
    )
    .await
}

async fn handle_command(bot: Bot, msg: Message, cmd: Command, state: AppState) -> HandlerResult<()> {
    let Some(user) = msg.from.clone() else {
        warn!("Ignoring {:?} without a sender in chat {}", cmd, msg.chat.id);
        return Ok(());
    };

    info!("Command {:?} from user {} in chat {}", cmd, user.id, msg.chat.id);

    match cmd {
        Command::Start => handle_start(bot, msg).await?,
        Command::Help => handle_help(bot, msg).await?,
        Command::AddHandle { handle, timezone } => {
            handle_add_handle(bot, msg, &user, handle, timezone, &state).await?
        }
        Command::ListHandles => handle_list_handles(bot, msg, &state).await?,
        Command::UserStats => handle_user_stats(bot, msg, &user, &state).await?,
        Command::AllUserStats => handle_all_user_stats(bot, msg, &user, &state).await?,
    }

    Ok(())
}

pub fn get_command_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync>> {
    dptree::entry()
        .filter_command::<Command>()
        .endpoint(handle_command)
}
