//! ChessBuddy Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::Update;
use teloxide::utils::command::BotCommands as TeloxideBotCommands;
use tracing::{error, info, warn};

use ChessBuddy::{
    config::Settings,
    handlers::{
        callbacks::handle_callback_query,
        commands::{admin, help, start},
        messages::handle_message,
    },
    services::ServiceFactory,
    state::StateStorage,
    storage::StorageService,
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must stay alive for the file appender
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting ChessBuddy Telegram Bot...");

    // Initialize flat-file storage
    info!(data_dir = %settings.storage.data_dir, "Opening record store...");
    let storage = StorageService::new(&settings.storage).await;

    // Initialize state management
    let state_storage = StateStorage::new();

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(bot.clone(), settings, storage);

    info!("Setting up bot handlers...");

    let services_arc = Arc::new(services);
    let state_storage_arc = Arc::new(state_storage);

    let handler = create_handler();

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![services_arc, state_storage_arc])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("ChessBuddy bot is ready!");
    dispatcher.dispatch().await;

    info!("ChessBuddy bot has been shut down.");
    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<BotCommands>()
                        .endpoint(handle_commands),
                )
                .branch(dptree::endpoint(handle_messages)),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callbacks))
}

#[derive(TeloxideBotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "ChessBuddy Bot Commands")]
enum BotCommands {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Show the main menu")]
    Menu,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Operator panel (operator only)")]
    Admin,
    #[command(description = "Message all registered users (operator only)")]
    Broadcast,
}

/// Handle bot commands
async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: BotCommands,
    services: Arc<ServiceFactory>,
    state_storage: Arc<StateStorage>,
) -> HandlerResult {
    let services = (*services).clone();
    let state_storage = (*state_storage).clone();

    let result = match cmd {
        BotCommands::Start => {
            // A command always abandons any wizard in progress.
            if let Some(user) = msg.from.as_ref() {
                state_storage.clear(user.id.0 as i64).await;
            }
            start::handle_start(bot, msg).await
        }
        BotCommands::Menu => {
            if let Some(user) = msg.from.as_ref() {
                state_storage.clear(user.id.0 as i64).await;
            }
            start::handle_menu(bot, msg.chat.id).await
        }
        BotCommands::Help => help::handle_help(bot, msg).await,
        BotCommands::Admin => admin::handle_admin_panel(bot, msg, services).await,
        BotCommands::Broadcast => admin::handle_broadcast_command(bot, msg, services).await,
    };

    if let Err(e) = result {
        error!(error = %e, "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(
    bot: Bot,
    msg: Message,
    services: Arc<ServiceFactory>,
    state_storage: Arc<StateStorage>,
) -> HandlerResult {
    let services = (*services).clone();
    let state_storage = (*state_storage).clone();

    if let Err(e) = handle_message(bot, msg, services, state_storage).await {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }

    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(
    bot: Bot,
    query: teloxide::types::CallbackQuery,
    services: Arc<ServiceFactory>,
    state_storage: Arc<StateStorage>,
) -> HandlerResult {
    let user_id = query.from.id.0 as i64;
    let services = (*services).clone();
    let state_storage = (*state_storage).clone();

    if let Err(e) = handle_callback_query(bot, query, services, state_storage).await {
        error!(user_id = user_id, error = %e, "Error handling callback query");
        return Err(e.into());
    }

    Ok(())
}
