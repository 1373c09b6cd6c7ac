use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};
use tracing::{debug, info};

use relay_core::{
    config::Config, diagnostics::check_startup, messaging::port::RelayPort, relay::Relay,
};

use crate::{convert, TelegramRelay};

pub struct AppState {
    pub relay: Relay,
}

/// Long-poll Telegram and run every update through the relay, one at a time.
///
/// Returns when the dispatcher stops (Ctrl-C).
pub async fn run_polling(cfg: Arc<Config>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.bot_token.clone());
    let port: Arc<dyn RelayPort> = Arc::new(TelegramRelay::new(bot.clone()));

    check_startup(&cfg, port.as_ref())
        .await
        .map_err(|e| anyhow::anyhow!("startup check failed: {e}"))?;

    let state = Arc::new(AppState {
        relay: Relay::new(cfg, port),
    });

    let handler = dptree::entry().endpoint(handle_update);

    info!("polling for updates");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        // One key for every update: strictly sequential, in arrival order.
        .distribution_function(|_| Some(()))
        .enable_ctrlc_handler()
        .error_handler(LoggingErrorHandler::with_custom_text("relay"))
        .build()
        .dispatch()
        .await;

    info!("polling stopped");
    Ok(())
}

async fn handle_update(upd: Update, state: Arc<AppState>) -> ResponseResult<()> {
    let update = convert::update(&upd);
    let outcome = state.relay.handle(&update).await;
    debug!(update_id = ?upd.id, ?outcome, "update handled");
    Ok(())
}
