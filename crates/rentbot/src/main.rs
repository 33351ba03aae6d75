use std::sync::Arc;

use rentbot_core::config::Config;

#[tokio::main]
async fn main() -> Result<(), rentbot_core::Error> {
    rentbot_core::logging::init("rentbot")?;

    let cfg = Arc::new(Config::load()?);

    rentbot_telegram::router::run_polling(cfg)
        .await
        .map_err(|e| rentbot_core::Error::External(format!("telegram bot failed: {e}")))?;

    tracing::info!("rentbot stopped");
    Ok(())
}
