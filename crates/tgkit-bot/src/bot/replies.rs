//! Shortcuts for answering what was just received.

use tgkit_core::error::TgError;
use tgkit_core::types::{CallbackQuery, Message};
use tgkit_transport::InputFile;

use super::{Bot, CallbackAnswerOptions, PhotoOptions, SendOptions, TextOptions};

impl Bot {
    /// Send `text` to the message's chat as a reply to it.
    pub async fn reply_text(
        &self,
        to: &Message,
        text: &str,
        mut options: TextOptions,
    ) -> Result<Message, TgError> {
        options.send.reply_to_message_id = Some(to.message_id);
        self.send_text(to.chat_id(), text, options).await
    }

    pub async fn reply_photo(
        &self,
        to: &Message,
        photo: InputFile,
        mut options: PhotoOptions,
    ) -> Result<Message, TgError> {
        options.send.reply_to_message_id = Some(to.message_id);
        self.send_photo(to.chat_id(), photo, options).await
    }

    /// Answer a callback query, optionally with a notification text.
    pub async fn answer_callback(
        &self,
        query: &CallbackQuery,
        text: Option<&str>,
    ) -> Result<bool, TgError> {
        let options = match text {
            Some(text) => CallbackAnswerOptions::text(text),
            None => CallbackAnswerOptions::default(),
        };
        self.answer_callback_query(&query.id, options).await
    }
}

impl TextOptions {
    /// Plain options replying to `message_id`.
    pub fn reply_to(message_id: i64) -> Self {
        Self {
            send: SendOptions::reply_to(message_id),
            ..Default::default()
        }
    }
}
