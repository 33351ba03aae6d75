use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*, types::BotCommand};

use tokio::sync::Mutex;

use rentbot_core::{
    config::Config,
    messaging::port::MessagingPort,
    registry::{FileLinkRepository, LinkRepository},
    router::CommandRouter,
};

use crate::handlers;
use crate::TelegramMessenger;

pub struct AppState {
    pub router: CommandRouter,
    pub messenger: Arc<dyn MessagingPort>,
    /// Held for the whole processing of one update.
    pub serial: Mutex<()>,
}

pub async fn run_polling(cfg: Arc<Config>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    match bot.get_me().await {
        Ok(me) => tracing::info!("rentbot started: @{}", me.username()),
        Err(e) => tracing::warn!("getMe failed: {e}"),
    }
    tracing::info!("Admin id: {}", cfg.admin_id);
    tracing::info!("Links file: {}", cfg.links_file.display());

    let commands = vec![
        BotCommand::new("start", "Приветствие"),
        BotCommand::new("addlink", "Ссылка на инструкцию: /addlink месяц=ссылка"),
        BotCommand::new("looklinks", "Показать сохранённые ссылки"),
    ];
    if let Err(e) = bot.set_my_commands(commands).await {
        tracing::warn!("Failed to set bot commands: {e}");
    }

    let repo: Arc<dyn LinkRepository> = Arc::new(FileLinkRepository::new(cfg.links_file.clone()));
    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));

    let state = Arc::new(AppState {
        router: CommandRouter::new(&cfg, repo),
        messenger,
        serial: Mutex::new(()),
    });

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error from the update listener",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
