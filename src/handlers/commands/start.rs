//! Start and menu command handlers

use teloxide::prelude::*;
use teloxide::types::{ChatId, Message};
use tracing::debug;

use crate::handlers::keyboards;
use crate::utils::errors::Result;

const WELCOME_TEXT: &str = "🤩 Chess classes are waiting for you! 🏆\n\n\
✅ Sharpen your strategic thinking\n\
✅ Train your memory and concentration\n\
✅ Meet like-minded players\n\n\
♟️ Sign up right now!";

const MENU_TEXT: &str = "🎖️ Your perfect companion in the world of chess";

/// Handle /start - greeting plus the persistent "Menu" shortcut.
pub async fn handle_start(bot: Bot, msg: Message) -> Result<()> {
    debug!(chat_id = ?msg.chat.id, "Processing /start command");

    bot.send_message(msg.chat.id, WELCOME_TEXT)
        .reply_markup(keyboards::menu_reply())
        .await?;
    Ok(())
}

/// Handle /menu and the "Menu" reply-keyboard shortcut.
pub async fn handle_menu(bot: Bot, chat_id: ChatId) -> Result<()> {
    bot.send_message(chat_id, MENU_TEXT)
        .reply_markup(keyboards::main_menu())
        .await?;
    Ok(())
}
