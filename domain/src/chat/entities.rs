//! Chat session domain entities

use crate::chat::image::ImageData;
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a chat session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Author of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Authored on-device by the user
    User,
    /// Authored by the remote assistant
    System,
}

/// A single turn in a conversation (Entity)
///
/// Carries optional text and/or a compressed photo. The text body is stored
/// under the wire key `message`; both optional fields are omitted from JSON
/// when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    #[serde(rename = "message", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageData>,
}

impl Message {
    fn new(role: Role, text: Option<String>, image: Option<ImageData>) -> Self {
        Self {
            id: MessageId::new(),
            role,
            text,
            image,
        }
    }

    pub fn user(text: Option<String>, image: Option<ImageData>) -> Self {
        Self::new(Role::User, text, image)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, Some(text.into()), None)
    }

    /// True when the turn carries neither text nor an image.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.image.is_none()
    }
}

/// One conversation thread (Entity)
///
/// Owns its ordered message history; message order is insertion order and
/// chronological. `is_sending` marks an in-flight request. It is process
/// state: the stored record keeps whatever value was current at save time,
/// but loading always reads it back as `false`, since no process survives a
/// restart to resolve a pending request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    id: SessionId,
    messages: Vec<Message>,
    #[serde(rename = "isSending", default, skip_deserializing)]
    is_sending: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    date: DateTime<Utc>,
}

impl ChatSession {
    /// Create an empty session: fresh id, no title, last activity = now.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            messages: Vec::new(),
            is_sending: false,
            title: None,
            date: Utc::now(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Timestamp of the most recent append.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_sending(&self) -> bool {
        self.is_sending
    }

    /// Flip the in-flight marker. Driven by the send flow.
    pub fn set_sending(&mut self, sending: bool) {
        self.is_sending = sending;
    }

    /// Append a turn with a fresh id and advance the activity timestamp.
    ///
    /// A turn must carry text, an image, or both; appending an empty turn is
    /// rejected rather than silently permitted.
    pub fn append_message(
        &mut self,
        role: Role,
        text: Option<String>,
        image: Option<ImageData>,
    ) -> Result<(), DomainError> {
        if text.is_none() && image.is_none() {
            return Err(DomainError::EmptyMessage);
        }
        // The activity timestamp never moves backwards, even under clock skew
        self.date = self.date.max(Utc::now());
        self.messages.push(Message::new(role, text, image));
        Ok(())
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = ChatSession::new();
        assert!(session.messages().is_empty());
        assert!(session.title().is_none());
        assert!(!session.is_sending());
    }

    #[test]
    fn test_append_grows_history_by_one_and_advances_date() {
        let mut session = ChatSession::new();
        let before = session.date();

        session
            .append_message(Role::User, Some("What is this?".to_string()), None)
            .unwrap();

        assert_eq!(session.messages().len(), 1);
        assert!(session.date() >= before);

        session.append_message(Role::System, Some("A vase".to_string()), None).unwrap();
        assert_eq!(session.messages().len(), 2);
    }

    #[test]
    fn test_append_rejects_empty_turn() {
        let mut session = ChatSession::new();
        let result = session.append_message(Role::User, None, None);
        assert!(matches!(result, Err(DomainError::EmptyMessage)));
        assert!(session.messages().is_empty());
    }

    #[test]
    fn test_messages_get_distinct_ids() {
        let mut session = ChatSession::new();
        session.append_message(Role::User, Some("a".to_string()), None).unwrap();
        session.append_message(Role::User, Some("b".to_string()), None).unwrap();
        assert_ne!(session.messages()[0].id, session.messages()[1].id);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
    }

    #[test]
    fn test_record_shape_matches_storage_format() {
        let mut session = ChatSession::new();
        session
            .append_message(Role::User, Some("hello".to_string()), None)
            .unwrap();

        let value: serde_json::Value = serde_json::to_value(&session).unwrap();
        assert!(value.get("id").is_some());
        assert_eq!(value["isSending"], false);
        assert!(value.get("title").is_none(), "unset title must be omitted");
        assert!(value.get("date").is_some());
        assert_eq!(value["messages"][0]["message"], "hello");
        assert_eq!(value["messages"][0]["role"], "user");
        assert!(
            value["messages"][0].get("image").is_none(),
            "absent image must be omitted"
        );
    }

    #[test]
    fn test_is_sending_reads_back_as_false() {
        let mut session = ChatSession::new();
        session.append_message(Role::User, Some("hi".to_string()), None).unwrap();
        session.set_sending(true);

        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"isSending\":true"));

        let loaded: ChatSession = serde_json::from_str(&json).unwrap();
        assert!(!loaded.is_sending());
    }

    #[test]
    fn test_image_bytes_survive_the_record_round_trip() {
        let mut session = ChatSession::new();
        let photo = ImageData::new(vec![0xFF, 0xD8, 0xFF, 0xE0]);
        session
            .append_message(Role::User, None, Some(photo.clone()))
            .unwrap();

        let json = serde_json::to_string(&session).unwrap();
        let loaded: ChatSession = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.messages()[0].image, Some(photo));
        assert!(loaded.messages()[0].text.is_none());
    }

    #[test]
    fn test_title_round_trip() {
        let mut session = ChatSession::new();
        session.append_message(Role::User, Some("x".to_string()), None).unwrap();
        session.set_title("Ming vase");

        let json = serde_json::to_string(&session).unwrap();
        let loaded: ChatSession = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.title(), Some("Ming vase"));
        assert_eq!(loaded.id(), session.id());
    }
}
