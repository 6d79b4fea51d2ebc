//! Bot API data types.
//!
//! Passive records deserialized from (and, for request-side types,
//! serialized into) the Bot API's snake_case JSON.
//! Docs: <https://core.telegram.org/bots/api#available-types>

mod chat;
mod inline;
mod markup;
mod media;
mod message;
mod payment;
mod poll;
mod sticker;
mod user;

#[cfg(test)]
mod tests;

pub use chat::*;
pub use inline::*;
pub use markup::*;
pub use media::*;
pub use message::*;
pub use payment::*;
pub use poll::*;
pub use sticker::*;
pub use user::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target chat: a numeric id or a channel `@username`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ChatId {
    fn from(username: &str) -> Self {
        Self::Username(username.to_string())
    }
}

impl From<String> for ChatId {
    fn from(username: String) -> Self {
        Self::Username(username)
    }
}

impl From<&ChatId> for ChatId {
    fn from(id: &ChatId) -> Self {
        id.clone()
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Username(name) => f.write_str(name),
        }
    }
}

/// Text formatting mode for messages and captions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
    Markdown,
    MarkdownV2,
}

/// Status shown to the chat while the bot prepares a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    RecordVideo,
    UploadVideo,
    RecordAudio,
    UploadAudio,
    UploadDocument,
    FindLocation,
    RecordVideoNote,
    UploadVideoNote,
}

/// A bot command shown in the client's command menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommand {
    pub command: String,
    pub description: String,
}

impl BotCommand {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}

/// Result of an edit call: the edited message, or `true` for inline messages.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EditResult {
    Message(Box<Message>),
    Inline(bool),
}

impl EditResult {
    pub fn message(&self) -> Option<&Message> {
        match self {
            Self::Message(m) => Some(m),
            Self::Inline(_) => None,
        }
    }
}
