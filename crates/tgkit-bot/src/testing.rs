//! Scripted in-memory transport for tests.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tgkit_core::error::TgError;
use tgkit_transport::{ApiResponse, MultipartBody, Transport};

use crate::Bot;

pub(crate) const TOKEN: &str = "123:test";

/// One request seen by the mock.
#[derive(Debug, Clone)]
pub(crate) struct Call {
    pub method: String,
    pub body: Value,
    pub form: Option<MultipartBody>,
}

/// Answers calls from a script, in order. Once the script runs out,
/// calls never complete, like a long poll with nothing to deliver.
#[derive(Default)]
pub(crate) struct MockTransport {
    replies: Mutex<VecDeque<Result<ApiResponse, TgError>>>,
    calls: Mutex<Vec<Call>>,
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_ok(&self, result: Value) {
        self.push(Ok(ApiResponse::success(result)));
    }

    pub fn push_api_error(&self, code: i64, description: &str) {
        self.push(Ok(ApiResponse::failure(code, description)));
    }

    pub fn push_err(&self, message: &str) {
        self.push(Err(TgError::Transport(message.to_string())));
    }

    /// Script a successful `getUpdates` returning text messages with these ids.
    pub fn push_updates(&self, ids: &[i64]) {
        let batch: Vec<Value> = ids.iter().map(|&id| text_update(id, "hi")).collect();
        self.push_ok(Value::Array(batch));
    }

    pub fn add_file(&self, path: &str, data: &[u8]) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), data.to_vec());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Call {
        self.calls.lock().unwrap().last().cloned().unwrap()
    }

    /// `timeout` of every `getUpdates` request so far.
    pub fn poll_timeouts(&self) -> Vec<u64> {
        self.poll_bodies()
            .iter()
            .map(|b| b["timeout"].as_u64().unwrap())
            .collect()
    }

    /// `offset` of every `getUpdates` request so far.
    pub fn poll_offsets(&self) -> Vec<Option<i64>> {
        self.poll_bodies()
            .iter()
            .map(|b| b.get("offset").and_then(Value::as_i64))
            .collect()
    }

    fn poll_bodies(&self) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == "getUpdates")
            .map(|c| c.body)
            .collect()
    }

    fn push(&self, reply: Result<ApiResponse, TgError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    fn record(&self, method: &str, body: Value, form: Option<MultipartBody>) {
        self.calls.lock().unwrap().push(Call {
            method: method.to_string(),
            body,
            form,
        });
    }

    async fn next_reply(&self) -> Result<ApiResponse, TgError> {
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(reply) => reply,
            None => std::future::pending().await,
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn call_json(
        &self,
        _token: &str,
        method: &str,
        body: &Value,
    ) -> Result<ApiResponse, TgError> {
        self.record(method, body.clone(), None);
        self.next_reply().await
    }

    async fn call_multipart(
        &self,
        _token: &str,
        method: &str,
        body: MultipartBody,
    ) -> Result<ApiResponse, TgError> {
        self.record(method, Value::Null, Some(body));
        self.next_reply().await
    }

    async fn download(&self, _token: &str, file_path: &str) -> Result<Vec<u8>, TgError> {
        self.files
            .lock()
            .unwrap()
            .get(file_path)
            .cloned()
            .ok_or_else(|| TgError::Transport(format!("no such file: {file_path}")))
    }

    fn file_url(&self, token: &str, file_path: &str) -> String {
        format!("https://files.test/file/bot{token}/{file_path}")
    }
}

pub(crate) fn bot(transport: &Arc<MockTransport>) -> Bot {
    Bot::with_transport(TOKEN, transport.clone())
}

pub(crate) fn text_update(id: i64, text: &str) -> Value {
    json!({
        "update_id": id,
        "message": {
            "message_id": id * 10,
            "date": 1_600_000_000,
            "chat": {"id": 42, "type": "private", "first_name": "Ann"},
            "from": {"id": 7, "is_bot": false, "first_name": "Ann"},
            "text": text
        }
    })
}
