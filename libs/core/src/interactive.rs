use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::descriptors::NativeFlowButton;

/// Nested interactive payload (body, footer, header, native-flow buttons).
///
/// Every text field is always present; empty inputs produce empty strings.
///
/// ```
/// use wai_core::InteractiveMessage;
/// use serde_json::json;
///
/// let message = InteractiveMessage::default();
/// assert_eq!(
///     serde_json::to_value(&message).unwrap(),
///     json!({
///         "header": { "title": "", "hasMediaAttachment": false },
///         "body": { "text": "" },
///         "footer": { "text": "" },
///         "nativeFlowMessage": { "buttons": [], "messageParamsJson": "" }
///     })
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractiveMessage {
    pub header: Header,
    pub body: Body,
    pub footer: Footer,
    pub native_flow_message: NativeFlowMessage,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Body {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Footer {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Header {
    pub title: String,
    pub has_media_attachment: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_message: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_message: Option<Value>,
}

impl Header {
    pub fn text(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_image(title: impl Into<String>, image_message: Value) -> Self {
        Self {
            title: title.into(),
            has_media_attachment: true,
            image_message: Some(image_message),
            video_message: None,
        }
    }

    pub fn with_video(title: impl Into<String>, video_message: Value) -> Self {
        Self {
            title: title.into(),
            has_media_attachment: true,
            image_message: None,
            video_message: Some(video_message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NativeFlowMessage {
    pub buttons: Vec<NativeFlowButton>,
    pub message_params_json: String,
}
