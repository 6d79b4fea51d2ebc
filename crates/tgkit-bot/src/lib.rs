//! # tgkit-bot
//!
//! Typed request builders for the Telegram Bot API and a long-poll update
//! loop that yields decoded [`Update`]s one at a time.
//!
//! ```no_run
//! use tgkit_bot::{Bot, PollingConfig, TextOptions};
//!
//! # async fn run() -> Result<(), tgkit_core::error::TgError> {
//! let bot = Bot::new("123456:ABC-DEF");
//! let mut updates = bot.poller(PollingConfig::default()).spawn();
//! while let Some(update) = updates.next().await {
//!     if let Some(msg) = update.message() {
//!         if let Some(text) = msg.text.as_deref() {
//!             bot.reply_text(msg, text, TextOptions::default()).await?;
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod bot;
pub mod polling;

#[cfg(test)]
mod testing;

pub use bot::*;
pub use polling::{ConnectionState, Poller, UpdateStream};
pub use tgkit_core::config::PollingConfig;
pub use tgkit_core::error::TgError;
pub use tgkit_core::types;
pub use tgkit_core::update::{Update, UpdateContent, UpdateKind};
pub use tgkit_transport::{HttpTransport, InputFile, Transport};
