//! Inline queries, callback answers, commands, and profile photos.

use serde::Serialize;
use serde_json::{json, Value};
use tgkit_core::error::TgError;
use tgkit_core::types::{BotCommand, UserProfilePhotos};

use super::{with_options, Bot};

#[derive(Debug, Clone, Default, Serialize)]
pub struct InlineQueryOptions {
    /// Seconds the result may be cached on the server. Defaults to 300.
    pub cache_time: Option<i64>,
    pub is_personal: Option<bool>,
    /// Offset the client sends back to fetch more results.
    pub next_offset: Option<String>,
    pub switch_pm_text: Option<String>,
    pub switch_pm_parameter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CallbackAnswerOptions {
    /// Notification text, 0-200 characters.
    pub text: Option<String>,
    pub show_alert: Option<bool>,
    pub url: Option<String>,
    pub cache_time: Option<i64>,
}

impl CallbackAnswerOptions {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

impl Bot {
    /// Answer an inline query with up to 50 results.
    ///
    /// Results are passed as raw `InlineQueryResult` JSON objects.
    pub async fn answer_inline_query(
        &self,
        inline_query_id: &str,
        results: &[Value],
        options: InlineQueryOptions,
    ) -> Result<bool, TgError> {
        let body = with_options(
            json!({ "inline_query_id": inline_query_id, "results": results }),
            &options,
        )?;
        self.call("answerInlineQuery", body).await
    }

    /// Answer a callback query. Clients show a progress bar until answered.
    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        options: CallbackAnswerOptions,
    ) -> Result<bool, TgError> {
        let body = with_options(json!({ "callback_query_id": callback_query_id }), &options)?;
        self.call("answerCallbackQuery", body).await
    }

    pub async fn set_my_commands(&self, commands: &[BotCommand]) -> Result<bool, TgError> {
        self.call("setMyCommands", json!({ "commands": commands }))
            .await
    }

    pub async fn get_my_commands(&self) -> Result<Vec<BotCommand>, TgError> {
        self.call("getMyCommands", json!({})).await
    }

    /// `offset` is the index of the first photo; `limit` is 1-100.
    pub async fn get_user_profile_photos(
        &self,
        user_id: i64,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> Result<UserProfilePhotos, TgError> {
        let mut body = json!({ "user_id": user_id });
        if let Some(offset) = offset {
            body["offset"] = offset.into();
        }
        if let Some(limit) = limit {
            body["limit"] = limit.into();
        }
        self.call("getUserProfilePhotos", body).await
    }
}
