//! Editing messages already sent.
//!
//! Edits address either a chat message or a message sent via inline mode.
//! The API answers with the edited [`Message`] for the former and `true`
//! for the latter, hence [`EditResult`].

use serde::Serialize;
use serde_json::{json, Value};
use tgkit_core::error::TgError;
use tgkit_core::types::{ChatId, EditResult, InlineKeyboardMarkup, Message, ParseMode};

use super::{with_options, Bot, InputMedia};

/// The message an edit applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageTarget {
    Chat { chat_id: ChatId, message_id: i64 },
    Inline(String),
}

impl MessageTarget {
    pub fn chat(chat_id: impl Into<ChatId>, message_id: i64) -> Self {
        Self::Chat {
            chat_id: chat_id.into(),
            message_id,
        }
    }

    pub fn inline(inline_message_id: impl Into<String>) -> Self {
        Self::Inline(inline_message_id.into())
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Chat {
                chat_id,
                message_id,
            } => json!({ "chat_id": chat_id, "message_id": message_id }),
            Self::Inline(id) => json!({ "inline_message_id": id }),
        }
    }
}

impl From<&Message> for MessageTarget {
    fn from(message: &Message) -> Self {
        Self::chat(message.chat_id(), message.message_id)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EditTextOptions {
    pub parse_mode: Option<ParseMode>,
    pub disable_web_page_preview: Option<bool>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EditCaptionOptions {
    pub parse_mode: Option<ParseMode>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl Bot {
    pub async fn edit_message_text(
        &self,
        target: impl Into<MessageTarget>,
        text: &str,
        options: EditTextOptions,
    ) -> Result<EditResult, TgError> {
        let mut body = MessageTarget::to_json(&target.into());
        body["text"] = text.into();
        self.call("editMessageText", with_options(body, &options)?)
            .await
    }

    /// Replace the caption. `None` removes it.
    pub async fn edit_message_caption(
        &self,
        target: impl Into<MessageTarget>,
        caption: Option<&str>,
        options: EditCaptionOptions,
    ) -> Result<EditResult, TgError> {
        let mut body = MessageTarget::to_json(&target.into());
        if let Some(caption) = caption {
            body["caption"] = caption.into();
        }
        self.call("editMessageCaption", with_options(body, &options)?)
            .await
    }

    /// Replace the animation, audio, document, photo, or video of a message.
    pub async fn edit_message_media(
        &self,
        target: impl Into<MessageTarget>,
        media: InputMedia,
        reply_markup: Option<InlineKeyboardMarkup>,
    ) -> Result<EditResult, TgError> {
        let mut uploads = Vec::new();
        let mut body = MessageTarget::to_json(&target.into());
        body["media"] = media.into_wire(&mut uploads);
        if let Some(markup) = reply_markup {
            body["reply_markup"] = serde_json::to_value(markup)?;
        }
        self.call_with_files("editMessageMedia", body, uploads).await
    }

    /// Replace or, with `None`, remove the inline keyboard.
    pub async fn edit_message_reply_markup(
        &self,
        target: impl Into<MessageTarget>,
        reply_markup: Option<InlineKeyboardMarkup>,
    ) -> Result<EditResult, TgError> {
        let mut body = MessageTarget::to_json(&target.into());
        if let Some(markup) = reply_markup {
            body["reply_markup"] = serde_json::to_value(markup)?;
        }
        self.call("editMessageReplyMarkup", body).await
    }

    /// Move a live location until its `live_period` expires.
    pub async fn edit_message_live_location(
        &self,
        target: impl Into<MessageTarget>,
        latitude: f64,
        longitude: f64,
        reply_markup: Option<InlineKeyboardMarkup>,
    ) -> Result<EditResult, TgError> {
        let mut body = MessageTarget::to_json(&target.into());
        body["latitude"] = latitude.into();
        body["longitude"] = longitude.into();
        if let Some(markup) = reply_markup {
            body["reply_markup"] = serde_json::to_value(markup)?;
        }
        self.call("editMessageLiveLocation", body).await
    }

    pub async fn stop_message_live_location(
        &self,
        target: impl Into<MessageTarget>,
        reply_markup: Option<InlineKeyboardMarkup>,
    ) -> Result<EditResult, TgError> {
        let mut body = MessageTarget::to_json(&target.into());
        if let Some(markup) = reply_markup {
            body["reply_markup"] = serde_json::to_value(markup)?;
        }
        self.call("stopMessageLiveLocation", body).await
    }
}
