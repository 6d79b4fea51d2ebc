//! Incoming updates and their decoding into a single payload kind.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use tracing::warn;

use crate::error::TgError;
use crate::types::{CallbackQuery, ChosenInlineResult, InlineQuery, Message, Poll};

/// A decoded update handed to the consumer.
#[derive(Debug, Clone)]
pub struct Update {
    /// Server-assigned, strictly increasing identifier.
    pub id: i64,
    pub kind: UpdateKind,
}

/// The one payload an update carries.
#[derive(Debug, Clone)]
pub enum UpdateKind {
    Message(Box<Message>),
    EditedMessage(Box<Message>),
    InlineQuery(InlineQuery),
    Poll(Poll),
    CallbackQuery(CallbackQuery),
    ChosenInlineResult(ChosenInlineResult),
    /// A payload kind this crate does not model, or one that failed to decode.
    Unknown,
}

/// Discriminant of [`UpdateKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateContent {
    Message,
    EditedMessage,
    InlineQuery,
    Poll,
    CallbackQuery,
    ChosenInlineResult,
    Unknown,
}

impl UpdateContent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::EditedMessage => "edited_message",
            Self::InlineQuery => "inline_query",
            Self::Poll => "poll",
            Self::CallbackQuery => "callback_query",
            Self::ChosenInlineResult => "chosen_inline_result",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UpdateContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Update {
    /// Decode one element of a `getUpdates` result.
    ///
    /// The first payload present in the order message, edited message,
    /// inline query, poll, callback query, chosen inline result is decoded
    /// and the rest are ignored. The server populates at most one.
    ///
    /// A winning payload that fails to decode still yields an `Unknown`
    /// update so the cursor can move past it. Only a missing `update_id` is
    /// an error.
    pub fn from_value(mut value: Value) -> Result<Self, TgError> {
        let update_id = value
            .get("update_id")
            .and_then(Value::as_i64)
            .ok_or_else(|| TgError::Decode("update without update_id".into()))?;

        let kind = match decode_kind(&mut value) {
            Ok(kind) => kind,
            Err((key, e)) => {
                warn!("update {update_id}: undecodable {key}, delivering as unknown: {e}");
                UpdateKind::Unknown
            }
        };

        Ok(Self {
            id: update_id,
            kind,
        })
    }

    pub fn content(&self) -> UpdateContent {
        match self.kind {
            UpdateKind::Message(_) => UpdateContent::Message,
            UpdateKind::EditedMessage(_) => UpdateContent::EditedMessage,
            UpdateKind::InlineQuery(_) => UpdateContent::InlineQuery,
            UpdateKind::Poll(_) => UpdateContent::Poll,
            UpdateKind::CallbackQuery(_) => UpdateContent::CallbackQuery,
            UpdateKind::ChosenInlineResult(_) => UpdateContent::ChosenInlineResult,
            UpdateKind::Unknown => UpdateContent::Unknown,
        }
    }

    pub fn message(&self) -> Option<&Message> {
        match &self.kind {
            UpdateKind::Message(m) => Some(m),
            _ => None,
        }
    }

    pub fn edited_message(&self) -> Option<&Message> {
        match &self.kind {
            UpdateKind::EditedMessage(m) => Some(m),
            _ => None,
        }
    }

    pub fn inline_query(&self) -> Option<&InlineQuery> {
        match &self.kind {
            UpdateKind::InlineQuery(q) => Some(q),
            _ => None,
        }
    }

    pub fn poll(&self) -> Option<&Poll> {
        match &self.kind {
            UpdateKind::Poll(p) => Some(p),
            _ => None,
        }
    }

    pub fn callback_query(&self) -> Option<&CallbackQuery> {
        match &self.kind {
            UpdateKind::CallbackQuery(q) => Some(q),
            _ => None,
        }
    }

    pub fn chosen_inline_result(&self) -> Option<&ChosenInlineResult> {
        match &self.kind {
            UpdateKind::ChosenInlineResult(r) => Some(r),
            _ => None,
        }
    }
}

type KindResult = Result<UpdateKind, (&'static str, serde_json::Error)>;

fn decode_kind(value: &mut Value) -> KindResult {
    if let Some(m) = take_payload::<Message>(value, "message") {
        return m.map(|m| UpdateKind::Message(Box::new(m)));
    }
    if let Some(m) = take_payload::<Message>(value, "edited_message") {
        return m.map(|m| UpdateKind::EditedMessage(Box::new(m)));
    }
    if let Some(q) = take_payload::<InlineQuery>(value, "inline_query") {
        return q.map(UpdateKind::InlineQuery);
    }
    if let Some(p) = take_payload::<Poll>(value, "poll") {
        return p.map(UpdateKind::Poll);
    }
    if let Some(q) = take_payload::<CallbackQuery>(value, "callback_query") {
        return q.map(UpdateKind::CallbackQuery);
    }
    if let Some(r) = take_payload::<ChosenInlineResult>(value, "chosen_inline_result") {
        return r.map(UpdateKind::ChosenInlineResult);
    }
    Ok(UpdateKind::Unknown)
}

/// `None` when `key` is absent or null.
fn take_payload<T: DeserializeOwned>(
    value: &mut Value,
    key: &'static str,
) -> Option<Result<T, (&'static str, serde_json::Error)>> {
    let payload = value.get_mut(key)?.take();
    if payload.is_null() {
        return None;
    }
    Some(serde_json::from_value(payload).map_err(|e| (key, e)))
}
