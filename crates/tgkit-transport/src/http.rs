//! reqwest-backed [`Transport`].

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tgkit_core::error::TgError;
use tracing::debug;

use crate::envelope::ApiResponse;
use crate::form::{FormValue, MultipartBody};
use crate::Transport;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Bot API transport over HTTPS.
///
/// No client-side timeout is set: long polls rely on the server returning
/// within the requested `timeout`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_url: String,
}

impl HttpTransport {
    pub fn new(api_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Reuse an existing client (connection pool, proxy settings).
    pub fn with_client(client: reqwest::Client, api_url: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn method_url(&self, token: &str, method: &str) -> String {
        format!("{}/bot{token}/{method}", self.api_url)
    }

    async fn parse(method: &str, resp: reqwest::Response) -> Result<ApiResponse, TgError> {
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| TgError::Transport(format!("{method} read failed: {}", e.without_url())))?;

        serde_json::from_str(&text).map_err(|e| {
            TgError::Transport(format!("{method} returned non-JSON body ({status}): {e}"))
        })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call_json(
        &self,
        token: &str,
        method: &str,
        body: &Value,
    ) -> Result<ApiResponse, TgError> {
        debug!("telegram: POST {method} (json)");

        // reqwest errors embed the URL, which carries the token.
        let resp = self
            .client
            .post(self.method_url(token, method))
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| TgError::Transport(format!("{method} failed: {}", e.without_url())))?;

        Self::parse(method, resp).await
    }

    async fn call_multipart(
        &self,
        token: &str,
        method: &str,
        body: MultipartBody,
    ) -> Result<ApiResponse, TgError> {
        debug!(
            "telegram: POST {method} (multipart, {} fields)",
            body.fields().len()
        );

        let mut form = Form::new();
        for (key, value) in body.into_fields() {
            form = match value {
                FormValue::Text(text) => form.text(key, text),
                FormValue::File { file_name, data } => {
                    form.part(key, Part::bytes(data).file_name(file_name))
                }
            };
        }

        let resp = self
            .client
            .post(self.method_url(token, method))
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|e| TgError::Transport(format!("{method} failed: {}", e.without_url())))?;

        Self::parse(method, resp).await
    }

    async fn download(&self, token: &str, file_path: &str) -> Result<Vec<u8>, TgError> {
        let resp = self
            .client
            .get(self.file_url(token, file_path))
            .send()
            .await
            .map_err(|e| TgError::Transport(format!("file download failed: {}", e.without_url())))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TgError::Transport(format!(
                "file download failed ({status}): {file_path}"
            )));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| TgError::Transport(format!("file read failed: {}", e.without_url())))?;

        Ok(bytes.to_vec())
    }

    fn file_url(&self, token: &str, file_path: &str) -> String {
        format!("{}/file/bot{token}/{file_path}", self.api_url)
    }
}
