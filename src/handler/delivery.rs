use teloxide::{
    payloads::SendMessageSetters,
    prelude::Requester,
    types::{ChatId, ParseMode},
    Bot,
};
use tokio::sync::oneshot;

use crate::{
    error::HandlerResult,
    runtime::{RuntimeError, StatsReport, StatsScope},
    service::{
        digest::{split_message, MESSAGE_LIMIT},
        DaySummary, DigestFormatter, RenderedMessage,
    },
};

fn failure_text(scope: StatsScope) -> String {
    match scope {
        StatsScope::Requester => t!("commands.user_stats.failed").to_string(),
        StatsScope::Everyone => t!("commands.all_user_stats.failed").to_string(),
    }
}

/// Waits for the worker's report and posts the digests to the chat the
/// command came from.
pub(super) async fn deliver(
    bot: &Bot,
    formatter: &dyn DigestFormatter,
    result_rx: oneshot::Receiver<StatsReport>,
    chat_id: ChatId,
    scope: StatsScope,
) -> HandlerResult<()> {
    let report = match result_rx.await.map_err(|e| RuntimeError::RecvError(e.to_string())) {
        Ok(report) => report,
        Err(e) => {
            error!("Stats report for chat {} never arrived: {}", chat_id, e);
            bot.send_message(chat_id, failure_text(scope)).await?;
            return Ok(());
        }
    };

    info!(
        "Delivering stats task {}: {} of {} succeeded",
        report.task_id,
        report.successes().count(),
        report.outcomes.len()
    );

    let mut sent = 0;
    for (user, summary) in report.successes() {
        match send_digest(bot, chat_id, formatter, user.display_name(), summary).await {
            Ok(()) => sent += 1,
            Err(e) => error!("Failed to send digest for {} to chat {}: {}", user.user_id, chat_id, e),
        }
    }

    if sent == 0 {
        bot.send_message(chat_id, failure_text(scope)).await?;
    }

    Ok(())
}

async fn send_digest(
    bot: &Bot,
    chat_id: ChatId,
    formatter: &dyn DigestFormatter,
    display_name: &str,
    summary: &DaySummary,
) -> HandlerResult<()> {
    let (body, parse_mode) = match formatter.format(display_name, summary) {
        RenderedMessage::Panel(panel) => (panel.to_html(), Some(ParseMode::Html)),
        RenderedMessage::Text(text) => (text, None),
    };

    for chunk in split_message(&body, MESSAGE_LIMIT) {
        let request = bot.send_message(chat_id, chunk);
        match parse_mode {
            Some(mode) => request.parse_mode(mode).await?,
            None => request.await?,
        };
    }

    Ok(())
}
