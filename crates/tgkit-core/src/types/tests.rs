//! Tests for Bot API type (de)serialization.

use super::*;

#[test]
fn test_chat_group_detection() {
    let group: Chat = serde_json::from_str(r#"{"id": -100123, "type": "group"}"#).unwrap();
    assert!(group.is_group());

    let supergroup: Chat =
        serde_json::from_str(r#"{"id": -100456, "type": "supergroup"}"#).unwrap();
    assert!(supergroup.is_group());

    let private: Chat = serde_json::from_str(r#"{"id": 789, "type": "private"}"#).unwrap();
    assert!(!private.is_group());
    assert!(private.is_private());
}

#[test]
fn test_chat_type_defaults_when_missing() {
    let chat: Chat = serde_json::from_str(r#"{"id": 123}"#).unwrap();
    assert_eq!(chat.chat_type, "");
    assert!(!chat.is_group());
}

#[test]
fn test_message_with_photo() {
    let json = r#"{
        "message_id": 3,
        "date": 1600000000,
        "chat": {"id": 100, "type": "private"},
        "photo": [
            {"file_id": "small", "file_unique_id": "s", "width": 90, "height": 90, "file_size": 1000},
            {"file_id": "large", "file_unique_id": "l", "width": 800, "height": 800, "file_size": 20000},
            {"file_id": "medium", "file_unique_id": "m", "width": 320, "height": 320}
        ],
        "caption": "Check this out"
    }"#;
    let msg: Message = serde_json::from_str(json).unwrap();
    assert!(msg.text.is_none());
    assert_eq!(msg.photo.as_ref().unwrap().len(), 3);
    assert_eq!(msg.largest_photo().unwrap().file_id, "large");
    assert_eq!(msg.caption.as_deref(), Some("Check this out"));
    assert_eq!(msg.sent_at().unwrap().timestamp(), 1_600_000_000);
    assert!(msg.edited_at().is_none());
}

#[test]
fn test_message_with_voice_and_sender() {
    let json = r#"{
        "message_id": 1,
        "date": 1600000000,
        "from": {"id": 42, "is_bot": false, "first_name": "Ada", "last_name": "Lovelace"},
        "chat": {"id": 100, "type": "private"},
        "voice": {
            "file_id": "abc123",
            "file_unique_id": "u1",
            "duration": 5,
            "mime_type": "audio/ogg",
            "file_size": 12345
        }
    }"#;
    let msg: Message = serde_json::from_str(json).unwrap();
    let voice = msg.voice.as_ref().unwrap();
    assert_eq!(voice.file_id, "abc123");
    assert_eq!(voice.duration, 5);
    assert_eq!(msg.from.as_ref().unwrap().display_name(), "Ada Lovelace");
    assert_eq!(msg.chat_id(), ChatId::Id(100));
}

#[test]
fn test_message_service_flags_default_false() {
    let json = r#"{
        "message_id": 9,
        "date": 1600000000,
        "chat": {"id": -5, "type": "group", "title": "club"},
        "new_chat_title": "new club"
    }"#;
    let msg: Message = serde_json::from_str(json).unwrap();
    assert!(!msg.delete_chat_photo);
    assert!(!msg.group_chat_created);
    assert_eq!(msg.new_chat_title.as_deref(), Some("new club"));
}

#[test]
fn test_message_command() {
    let mut msg: Message = serde_json::from_str(
        r#"{"message_id": 1, "date": 0, "chat": {"id": 1}, "text": "/start@my_bot now"}"#,
    )
    .unwrap();
    assert_eq!(msg.command(), Some("start"));

    msg.text = Some("plain text".into());
    assert_eq!(msg.command(), None);

    msg.text = Some("/".into());
    assert_eq!(msg.command(), None);
}

#[test]
fn test_text_mention_entity_carries_user() {
    let msg: Message = serde_json::from_str(
        r#"{"message_id": 1, "date": 0, "chat": {"id": 1}, "text": "hi Ada",
            "entities": [{"type": "text_mention", "offset": 3, "length": 3,
                          "user": {"id": 5, "first_name": "Ada"}}]}"#,
    )
    .unwrap();
    let entities = msg.entities.unwrap();
    let expected = MessageEntity {
        entity_type: "text_mention".into(),
        offset: 3,
        length: 3,
        url: None,
        user: Some(serde_json::from_str(r#"{"id": 5, "first_name": "Ada"}"#).unwrap()),
        language: None,
    };
    assert_eq!(entities, vec![expected]);
    assert_eq!(entities[0].user.as_ref().map(User::display_name).as_deref(), Some("Ada"));
}

#[test]
fn test_user_display_name_prefers_username() {
    let user: User =
        serde_json::from_str(r#"{"id": 1, "first_name": "Ada", "username": "ada"}"#).unwrap();
    assert_eq!(user.display_name(), "@ada");
    assert!(!user.is_bot);
}

#[test]
fn test_chat_id_serializes_untagged() {
    assert_eq!(serde_json::to_value(ChatId::from(-100i64)).unwrap(), -100);
    assert_eq!(
        serde_json::to_value(ChatId::from("@channel")).unwrap(),
        "@channel"
    );
    assert_eq!(ChatId::from("@channel").to_string(), "@channel");
}

#[test]
fn test_parse_mode_and_chat_action_wire_names() {
    assert_eq!(serde_json::to_value(ParseMode::Html).unwrap(), "HTML");
    assert_eq!(serde_json::to_value(ParseMode::MarkdownV2).unwrap(), "MarkdownV2");
    assert_eq!(
        serde_json::to_value(ChatAction::UploadDocument).unwrap(),
        "upload_document"
    );
}

#[test]
fn test_inline_keyboard_skips_unset_fields() {
    let markup: ReplyMarkup = InlineKeyboardMarkup::default()
        .row(vec![
            InlineKeyboardButton::callback("Yes", "vote:yes"),
            InlineKeyboardButton::url("Docs", "https://core.telegram.org"),
        ])
        .into();
    let value = serde_json::to_value(&markup).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "inline_keyboard": [[
                {"text": "Yes", "callback_data": "vote:yes"},
                {"text": "Docs", "url": "https://core.telegram.org"}
            ]]
        })
    );
}

#[test]
fn test_remove_keyboard_and_force_reply_defaults() {
    let remove = serde_json::to_value(ReplyMarkup::from(ReplyKeyboardRemove::default())).unwrap();
    assert_eq!(remove, serde_json::json!({"remove_keyboard": true}));

    let force = serde_json::to_value(ReplyMarkup::from(ForceReply::default())).unwrap();
    assert_eq!(force, serde_json::json!({"force_reply": true}));
}

#[test]
fn test_keyboard_button_poll_type() {
    let button = KeyboardButton {
        request_poll: Some(KeyboardButtonPollType {
            poll_type: Some(PollType::Quiz),
        }),
        ..KeyboardButton::text("Make a quiz")
    };
    let value = serde_json::to_value(&button).unwrap();
    assert_eq!(value["request_poll"]["type"], "quiz");
    assert!(value.get("request_contact").is_none());
}

#[test]
fn test_edit_result_message_or_true() {
    let inline: EditResult = serde_json::from_str("true").unwrap();
    assert!(inline.message().is_none());

    let edited: EditResult = serde_json::from_str(
        r#"{"message_id": 5, "date": 0, "chat": {"id": 1}, "text": "edited"}"#,
    )
    .unwrap();
    assert_eq!(edited.message().unwrap().message_id, 5);
}

#[test]
fn test_file_extension() {
    let file: File = serde_json::from_str(
        r#"{"file_id": "f", "file_unique_id": "u", "file_path": "photos/file_0.jpg"}"#,
    )
    .unwrap();
    assert_eq!(file.extension(), Some("jpg"));

    let bare = File {
        file_path: Some("voice/file_1".into()),
        ..file.clone()
    };
    assert_eq!(bare.extension(), None);

    let missing = File {
        file_path: None,
        ..file
    };
    assert_eq!(missing.extension(), None);
}

#[test]
fn test_chat_member_admin_status() {
    let member: ChatMember = serde_json::from_str(
        r#"{"user": {"id": 1, "first_name": "Ada"}, "status": "creator"}"#,
    )
    .unwrap();
    assert!(member.is_admin());
}

#[test]
fn test_sticker_set_decodes() {
    let set: StickerSet = serde_json::from_str(
        r#"{
            "name": "cats_by_bot",
            "title": "Cats",
            "is_animated": false,
            "contains_masks": false,
            "stickers": [{
                "file_id": "s1", "file_unique_id": "u1", "width": 512, "height": 512,
                "emoji": "🐱",
                "mask_position": {"point": "eyes", "x_shift": 0.0, "y_shift": -1.0, "scale": 1.5}
            }]
        }"#,
    )
    .unwrap();
    assert_eq!(set.stickers.len(), 1);
    assert_eq!(set.stickers[0].mask_position.as_ref().unwrap().point, "eyes");
}
