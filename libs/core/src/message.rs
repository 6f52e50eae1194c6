//! Protocol-side message content as seen by the underlying client, plus the default
//! normalisation and content-type resolution used by the classifier.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::interactive::InteractiveMessage;

const MAX_UNWRAP_DEPTH: usize = 5;

/// Message content in the client's camelCase JSON shape.
///
/// Typed fields cover what this layer builds or inspects; any other content key lives in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactive_message: Option<InteractiveMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons_message: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_message: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_once_message: Option<FutureProofMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_once_message_v2: Option<FutureProofMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_once_message_v2_extension: Option<FutureProofMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral_message: Option<FutureProofMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_with_caption_message: Option<FutureProofMessage>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wrapper container (`{ "message": { ... } }`) used by view-once and ephemeral messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FutureProofMessage {
    pub message: Box<WaMessage>,
}

impl FutureProofMessage {
    pub fn new(message: WaMessage) -> Self {
        Self {
            message: Box::new(message),
        }
    }
}

impl WaMessage {
    pub fn conversation(text: impl Into<String>) -> Self {
        Self {
            conversation: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn interactive(message: InteractiveMessage) -> Self {
        Self {
            interactive_message: Some(message),
            ..Self::default()
        }
    }

    /// Wraps `inner` in a `viewOnceMessage` container.
    pub fn view_once(inner: WaMessage) -> Self {
        Self {
            view_once_message: Some(FutureProofMessage::new(inner)),
            ..Self::default()
        }
    }

    fn wrapped(&self) -> Option<&WaMessage> {
        [
            &self.ephemeral_message,
            &self.view_once_message,
            &self.view_once_message_v2,
            &self.view_once_message_v2_extension,
            &self.document_with_caption_message,
        ]
        .into_iter()
        .find_map(|wrapper| wrapper.as_ref().map(|w| w.message.as_ref()))
    }
}

/// Resolved content type of a (normalised) message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentType {
    Conversation,
    Interactive,
    Buttons,
    List,
    Other(String),
}

impl ContentType {
    pub fn from_key(key: &str) -> Self {
        match key {
            "conversation" => ContentType::Conversation,
            "interactiveMessage" => ContentType::Interactive,
            "buttonsMessage" => ContentType::Buttons,
            "listMessage" => ContentType::List,
            other => ContentType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Conversation => "conversation",
            ContentType::Interactive => "interactiveMessage",
            ContentType::Buttons => "buttonsMessage",
            ContentType::List => "listMessage",
            ContentType::Other(key) => key,
        }
    }
}

/// Strips ephemeral / view-once / document-with-caption wrappers.
///
/// ```
/// use wai_core::{normalize_message_content, InteractiveMessage, WaMessage};
///
/// let wrapped = WaMessage::view_once(WaMessage::interactive(InteractiveMessage::default()));
/// assert!(normalize_message_content(&wrapped).interactive_message.is_some());
/// ```
pub fn normalize_message_content(message: &WaMessage) -> WaMessage {
    let mut current = message;
    for _ in 0..MAX_UNWRAP_DEPTH {
        match current.wrapped() {
            Some(inner) => current = inner,
            None => return current.clone(),
        }
    }
    debug!(
        target = "wai.core",
        depth = MAX_UNWRAP_DEPTH,
        "message wrapper nesting exceeded; using innermost reached content"
    );
    current.clone()
}

/// Returns the content type of an already normalised message.
pub fn get_content_type(message: &WaMessage) -> Option<ContentType> {
    if message.conversation.is_some() {
        return Some(ContentType::Conversation);
    }
    if message.interactive_message.is_some() {
        return Some(ContentType::Interactive);
    }
    if message.buttons_message.is_some() {
        return Some(ContentType::Buttons);
    }
    if message.list_message.is_some() {
        return Some(ContentType::List);
    }
    message
        .extra
        .keys()
        .find(|key| {
            key.as_str() == "conversation"
                || (key.contains("Message") && key.as_str() != "senderKeyDistributionMessage")
        })
        .map(|key| ContentType::from_key(key))
}
