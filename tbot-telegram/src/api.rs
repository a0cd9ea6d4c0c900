//! Outbound Bot API methods: each is a thin parameter-to-payload mapping over
//! [`TelegramApi::call_method`]. Optional parameters go in per-method options structs
//! that are merged into the base payload.

use serde::Serialize;
use serde_json::{json, Value};

use tbot_core::{
    BotError, ChatAction, FileInfo, Message, ParseMode, Result, User, UserProfilePhotos,
};

use crate::bot::TeleBot;

/// Optional sendMessage parameters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SendMessageOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_web_page_preview: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
}

/// Optional sendLocation parameters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SendLocationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
}

/// Optional sendVenue parameters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SendVenueOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foursquare_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
}

/// Optional sendContact parameters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SendContactOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
}

/// Optional getUserProfilePhotos parameters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetUserProfilePhotosOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Merges serialized options into the base payload object.
fn merge_options(mut payload: Value, options: Option<impl Serialize>) -> Result<Value> {
    if let Some(options) = options {
        let extra = serde_json::to_value(options)
            .map_err(|e| BotError::Unknown(format!("options serialization failed: {}", e)))?;
        if let (Some(base), Some(map)) = (payload.as_object_mut(), extra.as_object()) {
            for (key, value) in map {
                base.insert(key.clone(), value.clone());
            }
        }
    }
    Ok(payload)
}

impl TeleBot {
    /// Returns the bot's own user record.
    pub async fn get_me(&self) -> Result<User> {
        self.api.call_method("getMe", json!({})).await
    }

    /// Sends a text message to the given chat.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        options: Option<SendMessageOptions>,
    ) -> Result<Message> {
        let payload = merge_options(json!({ "chat_id": chat_id, "text": text }), options)?;
        self.api.call_method("sendMessage", payload).await
    }

    /// Forwards a message from one chat to another.
    pub async fn forward_message(
        &self,
        chat_id: i64,
        from_chat_id: i64,
        message_id: i64,
        disable_notification: Option<bool>,
    ) -> Result<Message> {
        let mut payload = json!({
            "chat_id": chat_id,
            "from_chat_id": from_chat_id,
            "message_id": message_id,
        });
        if let (Some(base), Some(disable)) = (payload.as_object_mut(), disable_notification) {
            base.insert("disable_notification".to_string(), json!(disable));
        }
        self.api.call_method("forwardMessage", payload).await
    }

    /// Sends a location point.
    pub async fn send_location(
        &self,
        chat_id: i64,
        latitude: f64,
        longitude: f64,
        options: Option<SendLocationOptions>,
    ) -> Result<Message> {
        let payload = merge_options(
            json!({ "chat_id": chat_id, "latitude": latitude, "longitude": longitude }),
            options,
        )?;
        self.api.call_method("sendLocation", payload).await
    }

    /// Sends a venue (location with title and address).
    pub async fn send_venue(
        &self,
        chat_id: i64,
        latitude: f64,
        longitude: f64,
        title: &str,
        address: &str,
        options: Option<SendVenueOptions>,
    ) -> Result<Message> {
        let payload = merge_options(
            json!({
                "chat_id": chat_id,
                "latitude": latitude,
                "longitude": longitude,
                "title": title,
                "address": address,
            }),
            options,
        )?;
        self.api.call_method("sendVenue", payload).await
    }

    /// Sends a phone contact.
    pub async fn send_contact(
        &self,
        chat_id: i64,
        phone_number: &str,
        first_name: &str,
        options: Option<SendContactOptions>,
    ) -> Result<Message> {
        let payload = merge_options(
            json!({
                "chat_id": chat_id,
                "phone_number": phone_number,
                "first_name": first_name,
            }),
            options,
        )?;
        self.api.call_method("sendContact", payload).await
    }

    /// Shows a chat action (typing, uploading, ...) to the peer.
    pub async fn send_chat_action(&self, chat_id: i64, action: ChatAction) -> Result<bool> {
        self.api
            .call_method("sendChatAction", json!({ "chat_id": chat_id, "action": action }))
            .await
    }

    /// Lists a user's profile photos.
    pub async fn get_user_profile_photos(
        &self,
        user_id: i64,
        options: Option<GetUserProfilePhotosOptions>,
    ) -> Result<UserProfilePhotos> {
        let payload = merge_options(json!({ "user_id": user_id }), options)?;
        self.api.call_method("getUserProfilePhotos", payload).await
    }

    /// Fetches file metadata for a download.
    pub async fn get_file(&self, file_id: &str) -> Result<FileInfo> {
        self.api
            .call_method("getFile", json!({ "file_id": file_id }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_options_overlays_base_payload() {
        let options = SendMessageOptions {
            parse_mode: Some(ParseMode::MarkdownV2),
            reply_to_message_id: Some(55),
            ..Default::default()
        };
        let merged = merge_options(json!({ "chat_id": 1, "text": "hi" }), Some(options)).unwrap();
        assert_eq!(merged["chat_id"], 1);
        assert_eq!(merged["text"], "hi");
        assert_eq!(merged["parse_mode"], "MarkdownV2");
        assert_eq!(merged["reply_to_message_id"], 55);
        assert!(merged.get("disable_notification").is_none());
    }

    #[test]
    fn test_merge_options_none_is_identity() {
        let merged =
            merge_options(json!({ "chat_id": 1 }), None::<SendMessageOptions>).unwrap();
        assert_eq!(merged, json!({ "chat_id": 1 }));
    }
}
