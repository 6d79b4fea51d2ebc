//! Telegram Bot API client.
//!
//! Every method builds a JSON body from its arguments and options, sends it
//! through the [`Transport`], and decodes `result`. An `ok: false` answer
//! becomes [`TgError::Api`]; nothing is retried.
//! Docs: <https://core.telegram.org/bots/api#available-methods>

mod chats;
mod edit;
mod files;
mod inline;
mod media;
mod messages;
mod replies;
mod stickers;
mod updates;


pub use chats::*;
pub use edit::*;
pub use files::*;
pub use inline::*;
pub use media::*;
pub use messages::*;
pub use stickers::*;
pub use updates::*;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tgkit_core::config::{BotConfig, PollingConfig};
use tgkit_core::error::TgError;
use tgkit_transport::{HttpTransport, InputFile, MultipartBody, Transport};
use tracing::debug;

use crate::polling::Poller;

/// A bot identified by its token. Cheap to clone.
#[derive(Clone)]
pub struct Bot {
    token: String,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Bot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bot")
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl Bot {
    /// Bot talking to the public Bot API.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_transport(token, Arc::new(HttpTransport::default()))
    }

    /// Bot from config. The token must be set.
    pub fn from_config(config: &BotConfig) -> Result<Self, TgError> {
        if config.token.trim().is_empty() {
            return Err(TgError::Config(
                "bot token is empty. Set bot.token in config.toml or TELEGRAM_BOT_TOKEN".into(),
            ));
        }
        Ok(Self::with_transport(
            config.token.trim(),
            Arc::new(HttpTransport::new(&config.api_url)),
        ))
    }

    pub fn with_transport(token: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            token: token.into(),
            transport,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Long-poll update loop for this bot.
    pub fn poller(&self, config: PollingConfig) -> Poller {
        Poller::new(self.clone(), config)
    }

    /// Call `method` with a JSON body and decode the result.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: Value,
    ) -> Result<T, TgError> {
        debug!("calling {method}");
        self.transport
            .call_json(&self.token, method, &body)
            .await?
            .into_result(method)
    }

    /// Call `method` with file arguments.
    ///
    /// Ids and URLs are inlined into the JSON body. If any file is an upload
    /// the whole call switches to a multipart body.
    pub(crate) async fn call_with_files<T: DeserializeOwned>(
        &self,
        method: &str,
        mut body: Value,
        files: Vec<(String, InputFile)>,
    ) -> Result<T, TgError> {
        let mut uploads = Vec::new();
        for (key, file) in files {
            match file.as_reference() {
                Some(reference) => body[key.as_str()] = Value::String(reference.to_string()),
                None => uploads.push((key, file)),
            }
        }

        if uploads.is_empty() {
            return self.call(method, body).await;
        }

        let mut form = MultipartBody::from_json(&body)?;
        for (key, file) in uploads {
            form.push_input(key, file);
        }

        debug!("calling {method} with uploads");
        self.transport
            .call_multipart(&self.token, method, form)
            .await?
            .into_result(method)
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}

/// Merge the non-null fields of `options` into the `base` object.
pub(crate) fn with_options(mut base: Value, options: &impl Serialize) -> Result<Value, TgError> {
    if let (Value::Object(target), Value::Object(extra)) = (&mut base, serde_json::to_value(options)?)
    {
        for (key, value) in extra {
            if !value.is_null() {
                target.insert(key, value);
            }
        }
    }
    Ok(base)
}

/// Pair a file argument with its field name.
pub(crate) fn file_field(key: &str, file: InputFile) -> (String, InputFile) {
    (key.to_string(), file)
}
