//! Sending messages of every kind.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tgkit_core::error::TgError;
use tgkit_core::types::{
    ChatAction, ChatId, Message, ParseMode, PollType, ReplyMarkup, User,
};
use tgkit_transport::InputFile;

use super::{file_field, with_options, Bot, InputMedia};

/// Options shared by every send method.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SendOptions {
    /// Deliver without sound.
    pub disable_notification: Option<bool>,
    pub reply_to_message_id: Option<i64>,
    pub reply_markup: Option<ReplyMarkup>,
}

impl SendOptions {
    pub fn reply_to(message_id: i64) -> Self {
        Self {
            reply_to_message_id: Some(message_id),
            ..Default::default()
        }
    }

    pub fn silent(mut self) -> Self {
        self.disable_notification = Some(true);
        self
    }

    pub fn markup(mut self, markup: impl Into<ReplyMarkup>) -> Self {
        self.reply_markup = Some(markup.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TextOptions {
    pub parse_mode: Option<ParseMode>,
    pub disable_web_page_preview: Option<bool>,
    #[serde(flatten)]
    pub send: SendOptions,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PollOptions {
    /// Defaults to true on the server.
    pub is_anonymous: Option<bool>,
    #[serde(rename = "type")]
    pub poll_type: Option<PollType>,
    pub allows_multiple_answers: Option<bool>,
    /// Required for quizzes.
    pub correct_option_id: Option<i64>,
    pub explanation: Option<String>,
    pub explanation_parse_mode: Option<ParseMode>,
    /// 5-600 seconds. Excludes `close_date`.
    pub open_period: Option<i64>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub close_date: Option<DateTime<Utc>>,
    pub is_closed: Option<bool>,
    #[serde(flatten)]
    pub send: SendOptions,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PhotoOptions {
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    #[serde(flatten)]
    pub send: SendOptions,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnimationOptions {
    pub duration: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    #[serde(skip)]
    pub thumb: Option<InputFile>,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    #[serde(flatten)]
    pub send: SendOptions,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VideoOptions {
    pub duration: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    #[serde(skip)]
    pub thumb: Option<InputFile>,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    pub supports_streaming: Option<bool>,
    #[serde(flatten)]
    pub send: SendOptions,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VideoNoteOptions {
    pub duration: Option<i64>,
    /// Diameter of the round video.
    pub length: Option<i64>,
    #[serde(skip)]
    pub thumb: Option<InputFile>,
    #[serde(flatten)]
    pub send: SendOptions,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentOptions {
    #[serde(skip)]
    pub thumb: Option<InputFile>,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    #[serde(flatten)]
    pub send: SendOptions,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AudioOptions {
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    pub duration: Option<i64>,
    pub performer: Option<String>,
    pub title: Option<String>,
    #[serde(skip)]
    pub thumb: Option<InputFile>,
    #[serde(flatten)]
    pub send: SendOptions,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VoiceOptions {
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
    pub duration: Option<i64>,
    #[serde(flatten)]
    pub send: SendOptions,
}

/// Media groups take no reply markup.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MediaGroupOptions {
    pub disable_notification: Option<bool>,
    pub reply_to_message_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LocationOptions {
    /// Seconds the live location will be updated, 60-86400.
    pub live_period: Option<i64>,
    #[serde(flatten)]
    pub send: SendOptions,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VenueOptions {
    pub foursquare_id: Option<String>,
    pub foursquare_type: Option<String>,
    #[serde(flatten)]
    pub send: SendOptions,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactOptions {
    pub last_name: Option<String>,
    pub vcard: Option<String>,
    #[serde(flatten)]
    pub send: SendOptions,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DiceOptions {
    /// "🎲" (default), "🎯", or "🏀".
    pub emoji: Option<String>,
    #[serde(flatten)]
    pub send: SendOptions,
}

impl Bot {
    /// Basic information about the bot. Useful to check the token.
    pub async fn get_me(&self) -> Result<User, TgError> {
        self.call("getMe", json!({})).await
    }

    /// Send a text message, 1-4096 characters.
    pub async fn send_text(
        &self,
        chat_id: impl Into<ChatId>,
        text: &str,
        options: TextOptions,
    ) -> Result<Message, TgError> {
        let body = with_options(json!({ "chat_id": chat_id.into(), "text": text }), &options)?;
        self.call("sendMessage", body).await
    }

    /// Send a native poll with 2-10 answer options.
    pub async fn send_poll(
        &self,
        chat_id: impl Into<ChatId>,
        question: &str,
        answers: &[&str],
        options: PollOptions,
    ) -> Result<Message, TgError> {
        let body = with_options(
            json!({ "chat_id": chat_id.into(), "question": question, "options": answers }),
            &options,
        )?;
        self.call("sendPoll", body).await
    }

    pub async fn send_photo(
        &self,
        chat_id: impl Into<ChatId>,
        photo: InputFile,
        options: PhotoOptions,
    ) -> Result<Message, TgError> {
        let body = with_options(json!({ "chat_id": chat_id.into() }), &options)?;
        self.call_with_files("sendPhoto", body, vec![file_field("photo", photo)])
            .await
    }

    /// GIF or H.264/MPEG-4 AVC video without sound, up to 50 MB.
    pub async fn send_animation(
        &self,
        chat_id: impl Into<ChatId>,
        animation: InputFile,
        options: AnimationOptions,
    ) -> Result<Message, TgError> {
        let body = with_options(json!({ "chat_id": chat_id.into() }), &options)?;
        let mut files = vec![file_field("animation", animation)];
        files.extend(options.thumb.map(|t| file_field("thumb", t)));
        self.call_with_files("sendAnimation", body, files).await
    }

    pub async fn send_video(
        &self,
        chat_id: impl Into<ChatId>,
        video: InputFile,
        options: VideoOptions,
    ) -> Result<Message, TgError> {
        let body = with_options(json!({ "chat_id": chat_id.into() }), &options)?;
        let mut files = vec![file_field("video", video)];
        files.extend(options.thumb.map(|t| file_field("thumb", t)));
        self.call_with_files("sendVideo", body, files).await
    }

    pub async fn send_video_note(
        &self,
        chat_id: impl Into<ChatId>,
        video_note: InputFile,
        options: VideoNoteOptions,
    ) -> Result<Message, TgError> {
        let body = with_options(json!({ "chat_id": chat_id.into() }), &options)?;
        let mut files = vec![file_field("video_note", video_note)];
        files.extend(options.thumb.map(|t| file_field("thumb", t)));
        self.call_with_files("sendVideoNote", body, files).await
    }

    pub async fn send_document(
        &self,
        chat_id: impl Into<ChatId>,
        document: InputFile,
        options: DocumentOptions,
    ) -> Result<Message, TgError> {
        let body = with_options(json!({ "chat_id": chat_id.into() }), &options)?;
        let mut files = vec![file_field("document", document)];
        files.extend(options.thumb.map(|t| file_field("thumb", t)));
        self.call_with_files("sendDocument", body, files).await
    }

    /// Audio shown in the music player (.mp3 or .m4a).
    pub async fn send_audio(
        &self,
        chat_id: impl Into<ChatId>,
        audio: InputFile,
        options: AudioOptions,
    ) -> Result<Message, TgError> {
        let body = with_options(json!({ "chat_id": chat_id.into() }), &options)?;
        let mut files = vec![file_field("audio", audio)];
        files.extend(options.thumb.map(|t| file_field("thumb", t)));
        self.call_with_files("sendAudio", body, files).await
    }

    /// Playable voice message (OGG encoded with OPUS).
    pub async fn send_voice(
        &self,
        chat_id: impl Into<ChatId>,
        voice: InputFile,
        options: VoiceOptions,
    ) -> Result<Message, TgError> {
        let body = with_options(json!({ "chat_id": chat_id.into() }), &options)?;
        self.call_with_files("sendVoice", body, vec![file_field("voice", voice)])
            .await
    }

    /// Static .WEBP or animated .TGS sticker.
    pub async fn send_sticker(
        &self,
        chat_id: impl Into<ChatId>,
        sticker: InputFile,
        options: SendOptions,
    ) -> Result<Message, TgError> {
        let body = with_options(json!({ "chat_id": chat_id.into() }), &options)?;
        self.call_with_files("sendSticker", body, vec![file_field("sticker", sticker)])
            .await
    }

    /// Send 2-10 photos and videos as an album.
    pub async fn send_media_group(
        &self,
        chat_id: impl Into<ChatId>,
        media: Vec<InputMedia>,
        options: MediaGroupOptions,
    ) -> Result<Vec<Message>, TgError> {
        let mut uploads = Vec::new();
        let media: Vec<_> = media
            .into_iter()
            .map(|m| m.into_wire(&mut uploads))
            .collect();

        let body = with_options(json!({ "chat_id": chat_id.into(), "media": media }), &options)?;
        self.call_with_files("sendMediaGroup", body, uploads).await
    }

    pub async fn send_location(
        &self,
        chat_id: impl Into<ChatId>,
        latitude: f64,
        longitude: f64,
        options: LocationOptions,
    ) -> Result<Message, TgError> {
        let body = with_options(
            json!({ "chat_id": chat_id.into(), "latitude": latitude, "longitude": longitude }),
            &options,
        )?;
        self.call("sendLocation", body).await
    }

    pub async fn send_venue(
        &self,
        chat_id: impl Into<ChatId>,
        latitude: f64,
        longitude: f64,
        title: &str,
        address: &str,
        options: VenueOptions,
    ) -> Result<Message, TgError> {
        let body = with_options(
            json!({
                "chat_id": chat_id.into(),
                "latitude": latitude,
                "longitude": longitude,
                "title": title,
                "address": address,
            }),
            &options,
        )?;
        self.call("sendVenue", body).await
    }

    pub async fn send_contact(
        &self,
        chat_id: impl Into<ChatId>,
        phone_number: &str,
        first_name: &str,
        options: ContactOptions,
    ) -> Result<Message, TgError> {
        let body = with_options(
            json!({
                "chat_id": chat_id.into(),
                "phone_number": phone_number,
                "first_name": first_name,
            }),
            &options,
        )?;
        self.call("sendContact", body).await
    }

    /// Animated emoji with a random value.
    pub async fn send_dice(
        &self,
        chat_id: impl Into<ChatId>,
        options: DiceOptions,
    ) -> Result<Message, TgError> {
        let body = with_options(json!({ "chat_id": chat_id.into() }), &options)?;
        self.call("sendDice", body).await
    }

    /// Show a status such as "typing…" for up to 5 seconds.
    pub async fn send_chat_action(
        &self,
        chat_id: impl Into<ChatId>,
        action: ChatAction,
    ) -> Result<bool, TgError> {
        self.call(
            "sendChatAction",
            json!({ "chat_id": chat_id.into(), "action": action }),
        )
        .await
    }

    pub async fn forward_message(
        &self,
        chat_id: impl Into<ChatId>,
        from_chat_id: impl Into<ChatId>,
        message_id: i64,
        disable_notification: Option<bool>,
    ) -> Result<Message, TgError> {
        let mut body = json!({
            "chat_id": chat_id.into(),
            "from_chat_id": from_chat_id.into(),
            "message_id": message_id,
        });
        if let Some(silent) = disable_notification {
            body["disable_notification"] = silent.into();
        }
        self.call("forwardMessage", body).await
    }

    /// Delete a message, including service messages, sent less than 48 hours ago.
    pub async fn delete_message(
        &self,
        chat_id: impl Into<ChatId>,
        message_id: i64,
    ) -> Result<bool, TgError> {
        self.call(
            "deleteMessage",
            json!({ "chat_id": chat_id.into(), "message_id": message_id }),
        )
        .await
    }
}
