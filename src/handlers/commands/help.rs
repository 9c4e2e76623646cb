//! Help command handler

use teloxide::prelude::*;
use teloxide::types::Message;

use crate::utils::errors::Result;

const HELP_TEXT: &str = "♟️ ChessBuddy commands:\n\n\
/start - Greeting and the menu shortcut\n\
/menu - Open the main menu\n\
/help - This message\n\n\
Use the menu buttons to register, book a class, manage your profile \
or contact support.";

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, HELP_TEXT).await?;
    Ok(())
}
