//! Multipart bodies and the files that can travel in them.

use serde_json::Value;
use std::path::Path;
use tgkit_core::error::TgError;
use uuid::Uuid;

/// A file argument: something already on Telegram's servers, a URL for
/// Telegram to fetch, or bytes to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputFile {
    FileId(String),
    Url(String),
    Memory { file_name: String, data: Vec<u8> },
}

impl InputFile {
    pub fn file_id(id: impl Into<String>) -> Self {
        Self::FileId(id.into())
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    pub fn memory(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self::Memory {
            file_name: file_name.into(),
            data,
        }
    }

    /// Read a local file for upload. The attachment is named after the
    /// file's name, or a generated name when the path has none.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, TgError> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(attachment_name);
        Ok(Self::Memory { file_name, data })
    }

    /// Whether sending this file requires a multipart body.
    pub fn is_upload(&self) -> bool {
        matches!(self, Self::Memory { .. })
    }

    /// The string form for ids and URLs; `None` for uploads.
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Self::FileId(s) | Self::Url(s) => Some(s),
            Self::Memory { .. } => None,
        }
    }
}

/// Unique part name for files referenced as `attach://<name>`.
pub fn attachment_name() -> String {
    format!("file_{}", Uuid::new_v4().simple())
}

/// One field of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File { file_name: String, data: Vec<u8> },
}

/// Ordered `multipart/form-data` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartBody {
    fields: Vec<(String, FormValue)>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a JSON object of parameters.
    ///
    /// Null values are skipped, strings are sent verbatim, and everything
    /// else (numbers, booleans, nested objects) as its JSON text.
    pub fn from_json(params: &Value) -> Result<Self, TgError> {
        let obj = params
            .as_object()
            .ok_or_else(|| TgError::Decode("multipart parameters must be a JSON object".into()))?;

        let mut body = Self::new();
        for (key, value) in obj {
            if let Some(text) = json_to_text(value) {
                body.fields.push((key.clone(), FormValue::Text(text)));
            }
        }
        Ok(body)
    }

    pub fn text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), FormValue::Text(value.into())));
        self
    }

    pub fn file(mut self, key: impl Into<String>, file_name: impl Into<String>, data: Vec<u8>) -> Self {
        self.fields.push((
            key.into(),
            FormValue::File {
                file_name: file_name.into(),
                data,
            },
        ));
        self
    }

    /// Add a file argument: ids and URLs as text, uploads as file parts.
    pub fn push_input(&mut self, key: impl Into<String>, file: InputFile) {
        let value = match file {
            InputFile::FileId(s) | InputFile::Url(s) => FormValue::Text(s),
            InputFile::Memory { file_name, data } => FormValue::File { file_name, data },
        };
        self.fields.push((key.into(), value));
    }

    pub fn fields(&self) -> &[(String, FormValue)] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn into_fields(self) -> Vec<(String, FormValue)> {
        self.fields
    }
}

fn json_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
