//! Button constructors and the legacy-button → native-flow translation.

use serde_json::json;
use tracing::warn;
use wai_core::{Button, NativeFlowButton, SINGLE_SELECT};

const QUICK_REPLY: &str = "quick_reply";
const SELECTION_SECTION_TITLE: &str = "Options";

/// Supported native-flow button kinds for [`create_button`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    QuickReply,
    Url,
    Call,
    Copy,
    Location,
}

impl ButtonKind {
    /// Accepts the short alias or the native-flow name.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "reply" | "quick_reply" => Some(ButtonKind::QuickReply),
            "url" | "cta_url" => Some(ButtonKind::Url),
            "call" | "cta_call" => Some(ButtonKind::Call),
            "copy" | "cta_copy" => Some(ButtonKind::Copy),
            "location" | "send_location" => Some(ButtonKind::Location),
            _ => None,
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            ButtonKind::QuickReply => QUICK_REPLY,
            ButtonKind::Url => "cta_url",
            ButtonKind::Call => "cta_call",
            ButtonKind::Copy => "cta_copy",
            ButtonKind::Location => "send_location",
        }
    }

    pub fn button(&self, text: &str, data: &str) -> NativeFlowButton {
        let params = match self {
            ButtonKind::QuickReply => json!({ "display_text": text, "id": data }),
            ButtonKind::Url => json!({ "display_text": text, "url": data, "merchant_url": data }),
            ButtonKind::Call => json!({ "display_text": text, "phone_number": data }),
            ButtonKind::Copy => json!({ "display_text": text, "copy_code": data }),
            ButtonKind::Location => json!({ "display_text": text }),
        };
        NativeFlowButton::new(self.native_name(), params)
    }
}

/// Builds a native-flow button from a kind string.
///
/// Unknown kinds fall back to a `quick_reply` whose id is `data`, or `text` when `data` is empty.
///
/// ```
/// use wai_translator::create_button;
///
/// let url = create_button("url", "Docs", "https://example.com");
/// assert_eq!(url.name, "cta_url");
/// assert_eq!(url.params().unwrap()["merchant_url"], "https://example.com");
///
/// let fallback = create_button("mystery", "Hello", "");
/// assert_eq!(fallback.name, "quick_reply");
/// assert_eq!(fallback.params().unwrap()["id"], "Hello");
/// ```
pub fn create_button(kind: &str, text: &str, data: &str) -> NativeFlowButton {
    match ButtonKind::parse(kind) {
        Some(kind) => kind.button(text, data),
        None => {
            let id = if data.is_empty() { text } else { data };
            ButtonKind::QuickReply.button(text, id)
        }
    }
}

/// How a set of legacy buttons was translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonMode {
    Reply,
    Selection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonTranslation {
    pub mode: ButtonMode,
    pub buttons: Vec<NativeFlowButton>,
    pub warnings: Vec<String>,
}

/// Translates legacy buttons into native-flow entries.
///
/// A single selection-marked button switches the whole set into selection mode, where each
/// plain reply becomes its own one-row `single_select` list. Entries without a button id, and
/// native-flow pairs with an empty name or params blob, are skipped and reported in `warnings`.
pub fn translate_buttons(buttons: &[Button]) -> ButtonTranslation {
    let mode = if buttons.iter().any(Button::is_selection) {
        ButtonMode::Selection
    } else {
        ButtonMode::Reply
    };

    let mut translated = Vec::with_capacity(buttons.len());
    let mut warnings = Vec::new();
    for (index, button) in buttons.iter().enumerate() {
        if let Some(info) = &button.native_flow_info {
            match native_flow_defect(&info.name, &info.params_json) {
                Some(reason) => skip(&mut warnings, index, reason),
                None => translated.push(NativeFlowButton::raw(&info.name, &info.params_json)),
            }
            continue;
        }

        let Some(id) = button.button_id.as_deref().filter(|id| !id.is_empty()) else {
            skip(&mut warnings, index, "missing buttonId");
            continue;
        };

        translated.push(match mode {
            ButtonMode::Selection => selection_entry(id, button.display_text()),
            ButtonMode::Reply => NativeFlowButton::new(
                QUICK_REPLY,
                json!({
                    "display_text": button.display_text().unwrap_or("Button"),
                    "id": id,
                }),
            ),
        });
    }

    ButtonTranslation {
        mode,
        buttons: translated,
        warnings,
    }
}

fn selection_entry(id: &str, display_text: Option<&str>) -> NativeFlowButton {
    NativeFlowButton::new(
        SINGLE_SELECT,
        json!({
            "title": display_text.unwrap_or("Select"),
            "sections": [{
                "title": SELECTION_SECTION_TITLE,
                "rows": [{
                    "title": display_text.unwrap_or("Option"),
                    "id": id,
                }]
            }]
        }),
    )
}

/// Why a native-flow `name`/`buttonParamsJson` pair cannot be sent, if it cannot.
pub fn native_flow_defect(name: &str, params_json: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("native flow entry without a name")
    } else if params_json.trim().is_empty() {
        Some("native flow entry without buttonParamsJson")
    } else {
        None
    }
}

pub(crate) fn skip(warnings: &mut Vec<String>, index: usize, reason: &str) {
    warn!(
        target = "wai.translator.buttons",
        index, reason, "skipping unsupported button descriptor"
    );
    warnings.push(format!("buttons[{index}]: {reason}"));
}
