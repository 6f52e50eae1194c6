//! Contract of the underlying socket client and the value types exchanged with it.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::descriptors::OutgoingContent;
use crate::message::{ContentType, WaMessage, get_content_type, normalize_message_content};
use crate::node::Node;

pub type ClientResult<T> = Result<T, ClientError>;

/// Failure reported by the underlying client. Passed through this layer untouched.
#[derive(Debug, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ClientError {
    code: String,
    message: String,
    retryable: bool,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl ClientError {
    /// Creates a non-retryable error with the provided code and message.
    pub fn permanent(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            retryable: false,
            source: None,
        }
    }

    /// Creates an error the caller may choose to retry.
    pub fn retryable(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            retryable: true,
            ..Self::permanent(code, message)
        }
    }

    pub fn with_source(mut self, source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }
}

/// Presence state announced to a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Available,
    Unavailable,
    Composing,
    Recording,
    Paused,
}

impl Presence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Presence::Available => "available",
            Presence::Unavailable => "unavailable",
            Presence::Composing => "composing",
            Presence::Recording => "recording",
            Presence::Paused => "paused",
        }
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Presence {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Presence::Available),
            "unavailable" => Ok(Presence::Unavailable),
            "composing" => Ok(Presence::Composing),
            "recording" => Ok(Presence::Recording),
            "paused" => Ok(Presence::Paused),
            other => Err(format!("unknown presence `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// Options of a relay call. Unknown keys are forwarded verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_nodes: Option<Vec<Node>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RelayOptions {
    pub fn with_message_id(message_id: impl Into<String>) -> Self {
        Self {
            message_id: Some(message_id.into()),
            ..Self::default()
        }
    }

    /// Appends a node, creating the list when absent.
    pub fn push_node(&mut self, node: Node) {
        self.additional_nodes.get_or_insert_with(Vec::new).push(node);
    }

    pub fn nodes(&self) -> &[Node] {
        self.additional_nodes.as_deref().unwrap_or_default()
    }
}

/// Options of a send call. `quoted` is the message being replied to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SendOptions {
    pub fn quoting(quoted: Value) -> Self {
        Self {
            quoted: Some(quoted),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageKey {
    pub remote_jid: String,
    pub from_me: bool,
    pub id: String,
}

/// Envelope produced by [`MessagingClient::generate_message`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMessage {
    pub key: MessageKey,
    pub message: WaMessage,
    pub message_timestamp: i64,
}

impl GeneratedMessage {
    /// Outgoing envelope stamped with the current time.
    pub fn outgoing(jid: &str, id: impl Into<String>, message: WaMessage) -> Self {
        Self {
            key: MessageKey {
                remote_jid: jid.to_string(),
                from_me: true,
                id: id.into(),
            },
            message,
            message_timestamp: OffsetDateTime::now_utc().unix_timestamp(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

/// Capabilities of the connected socket client this layer builds on.
///
/// Protocol encoding, transport, sessions and media upload all live behind this trait. The
/// normaliser and content-type resolver have defaults matching the client's usual behaviour.
#[async_trait]
pub trait MessagingClient: Send + Sync {
    async fn relay_message(
        &self,
        jid: &str,
        message: WaMessage,
        opts: RelayOptions,
    ) -> ClientResult<SendResult>;

    async fn send_message(
        &self,
        jid: &str,
        content: OutgoingContent,
        opts: SendOptions,
    ) -> ClientResult<SendResult>;

    async fn send_presence_update(&self, presence: Presence, jid: &str) -> ClientResult<()>;

    /// Uploads the media behind `url` and returns the protocol media message
    /// (`imageMessage` / `videoMessage` payload).
    async fn upload_media(&self, kind: MediaKind, url: &str) -> ClientResult<Value>;

    fn generate_message(
        &self,
        jid: &str,
        content: WaMessage,
        opts: GenerateOptions,
    ) -> ClientResult<GeneratedMessage>;

    fn normalize_content(&self, message: &WaMessage) -> WaMessage {
        normalize_message_content(message)
    }

    fn content_type(&self, message: &WaMessage) -> Option<ContentType> {
        get_content_type(message)
    }
}
