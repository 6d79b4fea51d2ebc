//! Sticker sets owned by users and managed by the bot.

use serde_json::json;
use tgkit_core::error::TgError;
use tgkit_core::types::{File, MaskPosition, StickerSet};
use tgkit_transport::InputFile;

use super::{file_field, Bot};

/// Sticker image for `createNewStickerSet` and `addStickerToSet`.
#[derive(Debug, Clone)]
pub enum StickerImage {
    /// PNG up to 512 KB, one side exactly 512 px.
    Png(InputFile),
    /// TGS animation. Must be uploaded.
    Tgs(InputFile),
}

impl StickerImage {
    fn into_field(self) -> (String, InputFile) {
        match self {
            Self::Png(file) => file_field("png_sticker", file),
            Self::Tgs(file) => file_field("tgs_sticker", file),
        }
    }
}

/// A sticker to put into a set.
#[derive(Debug, Clone)]
pub struct NewSticker {
    pub image: StickerImage,
    /// One or more emoji for the sticker.
    pub emojis: String,
    pub mask_position: Option<MaskPosition>,
}

impl NewSticker {
    pub fn png(file: InputFile, emojis: impl Into<String>) -> Self {
        Self {
            image: StickerImage::Png(file),
            emojis: emojis.into(),
            mask_position: None,
        }
    }

    pub fn tgs(file: InputFile, emojis: impl Into<String>) -> Self {
        Self {
            image: StickerImage::Tgs(file),
            emojis: emojis.into(),
            mask_position: None,
        }
    }
}

impl Bot {
    pub async fn get_sticker_set(&self, name: &str) -> Result<StickerSet, TgError> {
        self.call("getStickerSet", json!({ "name": name })).await
    }

    /// Upload a PNG for later use in sticker set methods.
    pub async fn upload_sticker_file(
        &self,
        user_id: i64,
        png_sticker: InputFile,
    ) -> Result<File, TgError> {
        self.call_with_files(
            "uploadStickerFile",
            json!({ "user_id": user_id }),
            vec![file_field("png_sticker", png_sticker)],
        )
        .await
    }

    /// Create a set owned by `user_id`. `name` must end in `_by_<bot username>`.
    pub async fn create_new_sticker_set(
        &self,
        user_id: i64,
        name: &str,
        title: &str,
        sticker: NewSticker,
        contains_masks: Option<bool>,
    ) -> Result<bool, TgError> {
        let mut body = json!({
            "user_id": user_id,
            "name": name,
            "title": title,
            "emojis": sticker.emojis,
        });
        if let Some(masks) = contains_masks {
            body["contains_masks"] = masks.into();
        }
        if let Some(position) = sticker.mask_position {
            body["mask_position"] = serde_json::to_value(position)?;
        }
        self.call_with_files(
            "createNewStickerSet",
            body,
            vec![sticker.image.into_field()],
        )
        .await
    }

    pub async fn add_sticker_to_set(
        &self,
        user_id: i64,
        name: &str,
        sticker: NewSticker,
    ) -> Result<bool, TgError> {
        let mut body = json!({
            "user_id": user_id,
            "name": name,
            "emojis": sticker.emojis,
        });
        if let Some(position) = sticker.mask_position {
            body["mask_position"] = serde_json::to_value(position)?;
        }
        self.call_with_files("addStickerToSet", body, vec![sticker.image.into_field()])
            .await
    }

    /// Move a sticker to a zero-based `position` in its set.
    pub async fn set_sticker_position_in_set(
        &self,
        sticker: &str,
        position: u32,
    ) -> Result<bool, TgError> {
        self.call(
            "setStickerPositionInSet",
            json!({ "sticker": sticker, "position": position }),
        )
        .await
    }

    pub async fn delete_sticker_from_set(&self, sticker: &str) -> Result<bool, TgError> {
        self.call("deleteStickerFromSet", json!({ "sticker": sticker }))
            .await
    }

    /// Thumbnail for a set. `None` drops it and the first sticker is used.
    pub async fn set_sticker_set_thumb(
        &self,
        name: &str,
        user_id: i64,
        thumb: Option<InputFile>,
    ) -> Result<bool, TgError> {
        let body = json!({ "name": name, "user_id": user_id });
        let files = thumb.map(|t| file_field("thumb", t)).into_iter().collect();
        self.call_with_files("setStickerSetThumb", body, files)
            .await
    }
}
