//! Downloading files sent to the bot (up to 20 MB).

use serde_json::json;
use tgkit_core::error::TgError;
use tgkit_core::types::File;
use tracing::debug;

use super::Bot;

/// File contents plus the extension of the server-side path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub data: Vec<u8>,
    pub file_extension: Option<String>,
}

/// Direct download URL. Embeds the bot token: do not share it.
#[derive(Clone, PartialEq, Eq)]
pub struct FileLink {
    pub link: String,
    pub file_extension: Option<String>,
}

impl std::fmt::Debug for FileLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileLink")
            .field("link", &"<redacted>")
            .field("file_extension", &self.file_extension)
            .finish()
    }
}

impl Bot {
    /// Basic info about a file and a path to download it from.
    pub async fn get_file(&self, file_id: &str) -> Result<File, TgError> {
        self.call("getFile", json!({ "file_id": file_id })).await
    }

    pub async fn download_file(&self, file_id: &str) -> Result<DownloadedFile, TgError> {
        let file = self.get_file(file_id).await?;
        let path = file_path(&file)?;
        debug!("downloading {path}");

        let data = self.transport().download(self.token(), path).await?;
        Ok(DownloadedFile {
            data,
            file_extension: file.extension().map(str::to_string),
        })
    }

    pub async fn file_download_link(&self, file_id: &str) -> Result<FileLink, TgError> {
        let file = self.get_file(file_id).await?;
        let link = self.transport().file_url(self.token(), file_path(&file)?);
        Ok(FileLink {
            link,
            file_extension: file.extension().map(str::to_string),
        })
    }
}

fn file_path(file: &File) -> Result<&str, TgError> {
    file.file_path
        .as_deref()
        .ok_or_else(|| TgError::Decode(format!("getFile returned no file_path for {}", file.file_id)))
}
