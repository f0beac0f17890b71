use std::time::Duration;

use teloxide::prelude::*;
use teloxide::Bot;

use crate::command;
use crate::config::AppConfig;
use crate::error::{BotResult, HandlerResult};
use crate::handler::get_handler;
use crate::state::AppState;

const TELEGRAM_USER_AGENT: &str = "TelegramBot/1.0";

pub struct BotService {
    pub bot: Bot,
    pub state: AppState,
}

impl BotService {
    pub async fn new(config: AppConfig) -> BotResult<Self> {
        info!("Initializing AppState...");
        let state = AppState::new(&config).await?;
        info!("AppState initialized");

        // Must be teloxide's own reqwest, not the judge client's.
        let client = teloxide::net::default_reqwest_settings()
            .pool_idle_timeout(Duration::from_secs(60))
            .tcp_keepalive(Duration::from_secs(30))
            .user_agent(TELEGRAM_USER_AGENT)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build Telegram client: {}", e))?;

        let bot = Bot::with_client(config.telegram.0.clone(), client);

        Ok(Self { bot, state })
    }

    pub async fn start(&self) -> HandlerResult<()> {
        info!("Testing connection to Telegram API...");
        match self.bot.get_me().await {
            Ok(_) => info!("Successfully connected to Telegram API"),
            Err(e) => {
                error!("Failed to connect to Telegram API: {:?}", e);
                return Err(anyhow::anyhow!("Failed to connect to Telegram API: {}", e).into());
            }
        }

        let bot = self.bot.clone();

        command::setup_user_commands(&bot).await?;

        // Stats handlers await their report, so updates are not serialized per chat.
        Dispatcher::builder(bot, get_handler())
            .distribution_function(|_| None::<()>)
            .dependencies(dptree::deps![self.state.clone()])
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("Dispatcher stopped, shutting down stats workers");
        self.state.runtime.stop().await?;

        Ok(())
    }
}
