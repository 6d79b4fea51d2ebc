use serde::{Deserialize, Serialize};

use super::PhotoSize;

/// A Telegram user or bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
    /// Only returned by `getMe`.
    pub can_join_groups: Option<bool>,
    /// Only returned by `getMe`.
    pub can_read_all_group_messages: Option<bool>,
    /// Only returned by `getMe`.
    pub supports_inline_queries: Option<bool>,
}

impl User {
    /// `@username` if set, otherwise the full name.
    pub fn display_name(&self) -> String {
        if let Some(ref un) = self.username {
            format!("@{un}")
        } else if let Some(ref ln) = self.last_name {
            format!("{} {ln}", self.first_name)
        } else {
            self.first_name.clone()
        }
    }
}

/// A user's profile pictures, each in several sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfilePhotos {
    pub total_count: i64,
    pub photos: Vec<Vec<PhotoSize>>,
}
