use wai_core::{
    Body, Button, Footer, Header, InteractiveMessage, NativeFlowButton, NativeFlowMessage, Section,
    WaMessage,
};

use crate::buttons::{native_flow_defect, skip, translate_buttons};
use crate::list::list_button;

/// Built interactive payload plus the warnings collected while translating actions.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutput {
    pub message: InteractiveMessage,
    pub warnings: Vec<String>,
}

impl BuildOutput {
    /// The payload wrapped in a view-once container, ready for envelope generation.
    pub fn into_view_once(self) -> WaMessage {
        WaMessage::view_once(WaMessage::interactive(self.message))
    }
}

/// Fluent builder for [`InteractiveMessage`].
///
/// ```
/// use wai_core::{Button, Header};
/// use wai_translator::InteractiveBuilder;
///
/// let out = InteractiveBuilder::default()
///     .body("Continue?")
///     .footer("Reply below")
///     .header(Header::text("Checkout"))
///     .buttons(&[Button::reply("yes", "Yes"), Button::reply("no", "No")])
///     .build();
/// assert_eq!(out.message.body.text, "Continue?");
/// assert_eq!(out.message.native_flow_message.buttons.len(), 2);
/// assert!(out.warnings.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InteractiveBuilder {
    body: String,
    footer: String,
    header: Header,
    buttons: Vec<NativeFlowButton>,
    warnings: Vec<String>,
}

impl InteractiveBuilder {
    pub fn body(mut self, text: impl Into<String>) -> Self {
        self.body = text.into();
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = text.into();
        self
    }

    pub fn header(mut self, header: Header) -> Self {
        self.header = header;
        self
    }

    /// Translates legacy buttons and appends the result.
    pub fn buttons(mut self, buttons: &[Button]) -> Self {
        let translation = translate_buttons(buttons);
        self.buttons.extend(translation.buttons);
        self.warnings.extend(translation.warnings);
        self
    }

    /// Appends pre-built native-flow entries; entries with an empty name or params are dropped
    /// and reported in the warnings.
    pub fn native_flow(mut self, buttons: impl IntoIterator<Item = NativeFlowButton>) -> Self {
        for (index, button) in buttons.into_iter().enumerate() {
            match native_flow_defect(&button.name, &button.button_params_json) {
                Some(reason) => skip(&mut self.warnings, index, reason),
                None => self.buttons.push(button),
            }
        }
        self
    }

    /// Appends one `single_select` entry holding `sections`.
    pub fn list(mut self, button_text: &str, sections: &[Section]) -> Self {
        self.buttons.push(list_button(button_text, sections));
        self
    }

    pub fn build(self) -> BuildOutput {
        BuildOutput {
            message: InteractiveMessage {
                header: self.header,
                body: Body { text: self.body },
                footer: Footer { text: self.footer },
                native_flow_message: NativeFlowMessage {
                    buttons: self.buttons,
                    message_params_json: String::new(),
                },
            },
            warnings: self.warnings,
        }
    }
}
