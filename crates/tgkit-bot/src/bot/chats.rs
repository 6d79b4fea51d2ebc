//! Chat administration. Most of these need the bot to be an administrator
//! with the matching rights.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tgkit_core::error::TgError;
use tgkit_core::types::{Chat, ChatId, ChatMember, ChatPermissions};
use tgkit_transport::InputFile;

use super::{file_field, with_options, Bot};

/// Rights granted by `promoteChatMember`. Pass all `false` to demote.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminRights {
    pub can_change_info: Option<bool>,
    /// Channels only.
    pub can_post_messages: Option<bool>,
    /// Channels only.
    pub can_edit_messages: Option<bool>,
    pub can_delete_messages: Option<bool>,
    pub can_invite_users: Option<bool>,
    pub can_restrict_members: Option<bool>,
    /// Supergroups only.
    pub can_pin_messages: Option<bool>,
    pub can_promote_members: Option<bool>,
}

#[derive(Serialize)]
struct UntilDate {
    #[serde(with = "chrono::serde::ts_seconds_option")]
    until_date: Option<DateTime<Utc>>,
}

impl Bot {
    /// Up-to-date information about a chat.
    pub async fn get_chat(&self, chat_id: impl Into<ChatId>) -> Result<Chat, TgError> {
        self.call("getChat", json!({ "chat_id": chat_id.into() }))
            .await
    }

    /// Ban a user until `until_date`, or forever when `None`.
    pub async fn kick_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
        until_date: Option<DateTime<Utc>>,
    ) -> Result<bool, TgError> {
        let body = with_options(
            json!({ "chat_id": chat_id.into(), "user_id": user_id }),
            &UntilDate { until_date },
        )?;
        self.call("kickChatMember", body).await
    }

    pub async fn unban_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
    ) -> Result<bool, TgError> {
        self.call(
            "unbanChatMember",
            json!({ "chat_id": chat_id.into(), "user_id": user_id }),
        )
        .await
    }

    /// Restrict a supergroup member. Pass all permissions to lift restrictions.
    pub async fn restrict_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
        permissions: &ChatPermissions,
        until_date: Option<DateTime<Utc>>,
    ) -> Result<bool, TgError> {
        let body = with_options(
            json!({
                "chat_id": chat_id.into(),
                "user_id": user_id,
                "permissions": permissions,
            }),
            &UntilDate { until_date },
        )?;
        self.call("restrictChatMember", body).await
    }

    pub async fn promote_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
        rights: AdminRights,
    ) -> Result<bool, TgError> {
        let body = with_options(
            json!({ "chat_id": chat_id.into(), "user_id": user_id }),
            &rights,
        )?;
        self.call("promoteChatMember", body).await
    }

    /// Custom title (0-16 characters, no emoji) for an administrator the bot promoted.
    pub async fn set_chat_administrator_custom_title(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
        custom_title: &str,
    ) -> Result<bool, TgError> {
        self.call(
            "setChatAdministratorCustomTitle",
            json!({ "chat_id": chat_id.into(), "user_id": user_id, "custom_title": custom_title }),
        )
        .await
    }

    /// Default permissions for all members.
    pub async fn set_chat_permissions(
        &self,
        chat_id: impl Into<ChatId>,
        permissions: &ChatPermissions,
    ) -> Result<bool, TgError> {
        self.call(
            "setChatPermissions",
            json!({ "chat_id": chat_id.into(), "permissions": permissions }),
        )
        .await
    }

    /// Generate a new primary invite link. The previous one is revoked.
    pub async fn export_chat_invite_link(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<String, TgError> {
        self.call("exportChatInviteLink", json!({ "chat_id": chat_id.into() }))
            .await
    }

    /// New chat photo. Must be an upload.
    pub async fn set_chat_photo(
        &self,
        chat_id: impl Into<ChatId>,
        photo: InputFile,
    ) -> Result<bool, TgError> {
        if !photo.is_upload() {
            return Err(TgError::Config(
                "setChatPhoto requires an uploaded file, not an id or URL".into(),
            ));
        }
        self.call_with_files(
            "setChatPhoto",
            json!({ "chat_id": chat_id.into() }),
            vec![file_field("photo", photo)],
        )
        .await
    }

    pub async fn delete_chat_photo(&self, chat_id: impl Into<ChatId>) -> Result<bool, TgError> {
        self.call("deleteChatPhoto", json!({ "chat_id": chat_id.into() }))
            .await
    }

    pub async fn pin_chat_message(
        &self,
        chat_id: impl Into<ChatId>,
        message_id: i64,
        disable_notification: Option<bool>,
    ) -> Result<bool, TgError> {
        let mut body = json!({ "chat_id": chat_id.into(), "message_id": message_id });
        if let Some(silent) = disable_notification {
            body["disable_notification"] = silent.into();
        }
        self.call("pinChatMessage", body).await
    }

    pub async fn unpin_chat_message(&self, chat_id: impl Into<ChatId>) -> Result<bool, TgError> {
        self.call("unpinChatMessage", json!({ "chat_id": chat_id.into() }))
            .await
    }

    /// 1-255 characters. Not available in private chats.
    pub async fn set_chat_title(
        &self,
        chat_id: impl Into<ChatId>,
        title: &str,
    ) -> Result<bool, TgError> {
        self.call(
            "setChatTitle",
            json!({ "chat_id": chat_id.into(), "title": title }),
        )
        .await
    }

    /// 0-255 characters.
    pub async fn set_chat_description(
        &self,
        chat_id: impl Into<ChatId>,
        description: &str,
    ) -> Result<bool, TgError> {
        self.call(
            "setChatDescription",
            json!({ "chat_id": chat_id.into(), "description": description }),
        )
        .await
    }

    pub async fn leave_chat(&self, chat_id: impl Into<ChatId>) -> Result<bool, TgError> {
        self.call("leaveChat", json!({ "chat_id": chat_id.into() }))
            .await
    }

    pub async fn get_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
    ) -> Result<ChatMember, TgError> {
        self.call(
            "getChatMember",
            json!({ "chat_id": chat_id.into(), "user_id": user_id }),
        )
        .await
    }

    pub async fn get_chat_members_count(&self, chat_id: impl Into<ChatId>) -> Result<i64, TgError> {
        self.call("getChatMembersCount", json!({ "chat_id": chat_id.into() }))
            .await
    }

    /// All administrators except other bots.
    pub async fn get_chat_administrators(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<Vec<ChatMember>, TgError> {
        self.call("getChatAdministrators", json!({ "chat_id": chat_id.into() }))
            .await
    }

    /// Group sticker set for a supergroup. Check `can_set_sticker_set` from `get_chat` first.
    pub async fn set_chat_sticker_set(
        &self,
        chat_id: impl Into<ChatId>,
        sticker_set_name: &str,
    ) -> Result<bool, TgError> {
        self.call(
            "setChatStickerSet",
            json!({ "chat_id": chat_id.into(), "sticker_set_name": sticker_set_name }),
        )
        .await
    }

    pub async fn delete_chat_sticker_set(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<bool, TgError> {
        self.call("deleteChatStickerSet", json!({ "chat_id": chat_id.into() }))
            .await
    }
}
