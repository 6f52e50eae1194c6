//! Caller-facing descriptors: outgoing content, legacy buttons, native-flow entries and list
//! sections.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Native-flow name that turns an entry into a selection list.
pub const SINGLE_SELECT: &str = "single_select";
/// Legacy button `type` marking a selection-list button.
pub const SELECTION_BUTTON_TYPE: u32 = 4;

/// Media reference given either as a bare URL or as `{ "url": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaRef {
    Url(String),
    Object { url: String },
}

impl MediaRef {
    pub fn url(&self) -> &str {
        match self {
            MediaRef::Url(url) | MediaRef::Object { url } => url,
        }
    }
}

impl From<&str> for MediaRef {
    fn from(url: &str) -> Self {
        MediaRef::Url(url.to_string())
    }
}

impl From<String> for MediaRef {
    fn from(url: String) -> Self {
        MediaRef::Url(url)
    }
}

/// Content handed to `send_message`.
///
/// Keys this layer does not interpret are kept in `extra` and reach the inner client untouched.
///
/// ```
/// use wai_core::{Button, OutgoingContent};
///
/// let content = OutgoingContent::text("Pick one")
///     .with_buttons(vec![Button::reply("a", "Yes"), Button::reply("b", "No")]);
/// assert!(content.has_buttons());
/// assert!(!OutgoingContent::text("plain").has_buttons());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<MediaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<MediaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OutgoingContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_buttons(mut self, buttons: Vec<Button>) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn has_buttons(&self) -> bool {
        !self.buttons.is_empty()
    }

    /// Body text: the caption when present, else the text.
    pub fn body_text(&self) -> &str {
        self.caption
            .as_deref()
            .filter(|caption| !caption.is_empty())
            .or(self.text.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonText {
    pub display_text: String,
}

/// Pre-built native-flow pair carried by a legacy button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeFlowInfo {
    pub name: String,
    #[serde(default)]
    pub params_json: String,
}

/// Legacy button entry found in [`OutgoingContent::buttons`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<ButtonText>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub button_type: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_flow_info: Option<NativeFlowInfo>,
}

impl Button {
    pub fn reply(id: impl Into<String>, display_text: impl Into<String>) -> Self {
        Self {
            button_id: Some(id.into()),
            button_text: Some(ButtonText {
                display_text: display_text.into(),
            }),
            button_type: None,
            native_flow_info: None,
        }
    }

    /// Reply button carrying the selection marker.
    pub fn selection(id: impl Into<String>, display_text: impl Into<String>) -> Self {
        Self {
            button_type: Some(SELECTION_BUTTON_TYPE),
            ..Self::reply(id, display_text)
        }
    }

    pub fn native_flow(name: impl Into<String>, params_json: impl Into<String>) -> Self {
        Self {
            native_flow_info: Some(NativeFlowInfo {
                name: name.into(),
                params_json: params_json.into(),
            }),
            ..Self::default()
        }
    }

    pub fn display_text(&self) -> Option<&str> {
        self.button_text
            .as_ref()
            .map(|text| text.display_text.as_str())
            .filter(|text| !text.is_empty())
    }

    pub fn is_selection(&self) -> bool {
        self.button_type == Some(SELECTION_BUTTON_TYPE)
            || self
                .native_flow_info
                .as_ref()
                .is_some_and(|info| info.name == SINGLE_SELECT)
    }
}

/// Translated native-flow entry: a name plus an opaque JSON parameter blob.
///
/// ```
/// use wai_core::NativeFlowButton;
/// use serde_json::json;
///
/// let button = NativeFlowButton::new("quick_reply", json!({ "display_text": "Yes", "id": "a" }));
/// assert_eq!(button.params().unwrap()["id"], "a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeFlowButton {
    pub name: String,
    pub button_params_json: String,
}

impl NativeFlowButton {
    pub fn new(name: impl Into<String>, params: Value) -> Self {
        Self {
            name: name.into(),
            button_params_json: params.to_string(),
        }
    }

    pub fn raw(name: impl Into<String>, button_params_json: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            button_params_json: button_params_json.into(),
        }
    }

    /// Decodes `buttonParamsJson`.
    pub fn params(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.button_params_json)
    }
}

/// Row as supplied by callers; a bare string is accepted as the row title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RowInput")]
pub struct RowSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl RowSpec {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }
}

impl From<&str> for RowSpec {
    fn from(title: &str) -> Self {
        RowSpec::new(title)
    }
}

impl From<String> for RowSpec {
    fn from(title: String) -> Self {
        RowSpec::new(title)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RowInput {
    Title(String),
    Full {
        #[serde(default)]
        header: Option<String>,
        title: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        id: Option<String>,
    },
}

impl From<RowInput> for RowSpec {
    fn from(input: RowInput) -> Self {
        match input {
            RowInput::Title(title) => RowSpec::new(title),
            RowInput::Full {
                header,
                title,
                description,
                id,
            } => RowSpec {
                header,
                title,
                description,
                id,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub title: String,
    #[serde(default)]
    pub rows: Vec<RowSpec>,
}

/// Fully defaulted list row as embedded in `single_select` params.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub header: String,
    pub title: String,
    pub description: String,
    pub id: String,
}

impl From<RowSpec> for Row {
    fn from(spec: RowSpec) -> Self {
        let id = spec
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| spec.title.clone());
        Row {
            header: spec.header.unwrap_or_default(),
            title: spec.title,
            description: spec.description.unwrap_or_default(),
            id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub rows: Vec<Row>,
}

impl From<SectionSpec> for Section {
    fn from(spec: SectionSpec) -> Self {
        Section {
            title: spec.title,
            rows: spec.rows.into_iter().map(Row::from).collect(),
        }
    }
}

/// Structured list: `title` doubles as the list button text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
}
