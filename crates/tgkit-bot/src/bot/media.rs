//! Media descriptions for albums and `editMessageMedia`.

use serde_json::{json, Value};
use tgkit_core::types::ParseMode;
use tgkit_transport::{attachment_name, InputFile};

/// Kind-specific fields of an [`InputMedia`].
#[derive(Debug, Clone, Default)]
pub enum InputMediaKind {
    #[default]
    Photo,
    Video {
        width: Option<i64>,
        height: Option<i64>,
        duration: Option<i64>,
        supports_streaming: Option<bool>,
    },
    Animation {
        width: Option<i64>,
        height: Option<i64>,
        duration: Option<i64>,
    },
    Audio {
        duration: Option<i64>,
        performer: Option<String>,
        title: Option<String>,
    },
    Document,
}

impl InputMediaKind {
    fn wire_type(&self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Video { .. } => "video",
            Self::Animation { .. } => "animation",
            Self::Audio { .. } => "audio",
            Self::Document => "document",
        }
    }
}

/// One photo, video, or other file in a media group or media edit.
#[derive(Debug, Clone)]
pub struct InputMedia {
    pub kind: InputMediaKind,
    pub media: InputFile,
    pub thumb: Option<InputFile>,
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
}

impl InputMedia {
    pub fn photo(media: InputFile) -> Self {
        Self::new(InputMediaKind::Photo, media)
    }

    pub fn video(media: InputFile) -> Self {
        Self::new(
            InputMediaKind::Video {
                width: None,
                height: None,
                duration: None,
                supports_streaming: None,
            },
            media,
        )
    }

    pub fn document(media: InputFile) -> Self {
        Self::new(InputMediaKind::Document, media)
    }

    pub fn new(kind: InputMediaKind, media: InputFile) -> Self {
        Self {
            kind,
            media,
            thumb: None,
            caption: None,
            parse_mode: None,
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// JSON description for the request. Uploads are replaced by
    /// `attach://<name>` and pushed onto `uploads` under that name.
    pub(crate) fn into_wire(self, uploads: &mut Vec<(String, InputFile)>) -> Value {
        let mut wire = json!({
            "type": self.kind.wire_type(),
            "media": reference(self.media, uploads),
        });

        if let Some(thumb) = self.thumb {
            wire["thumb"] = reference(thumb, uploads);
        }
        if let Some(caption) = self.caption {
            wire["caption"] = caption.into();
        }
        if let Some(mode) = self.parse_mode {
            wire["parse_mode"] = json!(mode);
        }

        let extra = match self.kind {
            InputMediaKind::Video {
                width,
                height,
                duration,
                supports_streaming,
            } => json!({
                "width": width,
                "height": height,
                "duration": duration,
                "supports_streaming": supports_streaming,
            }),
            InputMediaKind::Animation {
                width,
                height,
                duration,
            } => json!({ "width": width, "height": height, "duration": duration }),
            InputMediaKind::Audio {
                duration,
                performer,
                title,
            } => json!({ "duration": duration, "performer": performer, "title": title }),
            InputMediaKind::Photo | InputMediaKind::Document => json!({}),
        };

        if let (Some(target), Value::Object(extra)) = (wire.as_object_mut(), extra) {
            target.extend(extra.into_iter().filter(|(_, v)| !v.is_null()));
        }
        wire
    }
}

fn reference(file: InputFile, uploads: &mut Vec<(String, InputFile)>) -> Value {
    match file.as_reference() {
        Some(reference) => Value::String(reference.to_string()),
        None => {
            let name = attachment_name();
            let wire = Value::String(format!("attach://{name}"));
            uploads.push((name, file));
            wire
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_media_inlined() {
        let mut uploads = Vec::new();
        let wire = InputMedia::photo(InputFile::file_id("AgAD"))
            .caption("first")
            .into_wire(&mut uploads);

        assert!(uploads.is_empty());
        assert_eq!(wire["type"], "photo");
        assert_eq!(wire["media"], "AgAD");
        assert_eq!(wire["caption"], "first");
        assert!(wire.get("width").is_none());
    }

    #[test]
    fn test_uploads_become_attachments() {
        let mut uploads = Vec::new();
        let mut media = InputMedia::video(InputFile::memory("clip.mp4", vec![0; 4]));
        media.thumb = Some(InputFile::memory("thumb.jpg", vec![1]));
        media.kind = InputMediaKind::Video {
            width: Some(640),
            height: None,
            duration: Some(3),
            supports_streaming: Some(true),
        };
        let wire = media.into_wire(&mut uploads);

        assert_eq!(uploads.len(), 2);
        assert_eq!(wire["media"], format!("attach://{}", uploads[0].0));
        assert_eq!(wire["thumb"], format!("attach://{}", uploads[1].0));
        assert_eq!(wire["width"], 640);
        assert_eq!(wire["supports_streaming"], true);
        assert!(wire.get("height").is_none());
    }
}
