//! # tgkit-transport
//!
//! Performs single RPC calls against the Bot API and returns the parsed
//! response envelope. Two encodings: JSON bodies and multipart forms for
//! file uploads. An `ok: false` envelope is data at this layer, not an error.

mod envelope;
mod form;
mod http;

pub use envelope::{ApiResponse, ResponseParameters};
pub use form::{attachment_name, FormValue, InputFile, MultipartBody};
pub use http::{HttpTransport, DEFAULT_API_URL};

use async_trait::async_trait;
use serde_json::Value;
use tgkit_core::error::TgError;

/// Outbound calls to the Bot API.
///
/// Implementations are stateless with respect to bots: the token is passed
/// with every call, so one transport can serve several bots.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as JSON to `method`.
    async fn call_json(&self, token: &str, method: &str, body: &Value)
        -> Result<ApiResponse, TgError>;

    /// POST `body` as `multipart/form-data` to `method`.
    async fn call_multipart(
        &self,
        token: &str,
        method: &str,
        body: MultipartBody,
    ) -> Result<ApiResponse, TgError>;

    /// Fetch the bytes of a file previously resolved with `getFile`.
    async fn download(&self, token: &str, file_path: &str) -> Result<Vec<u8>, TgError>;

    /// Direct link to a file previously resolved with `getFile`.
    /// The link embeds the token; do not hand it to untrusted parties.
    fn file_url(&self, token: &str, file_path: &str) -> String;
}
