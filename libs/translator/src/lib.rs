//! Helpers for turning simplified button and list descriptions into native-flow interactive
//! payloads, and for classifying outgoing content before relay.
//!
//! The main entry point is [`InteractiveBuilder`], which assembles an
//! [`InteractiveMessage`](wai_core::InteractiveMessage) from a body, footer, header and one of
//! the supported action shapes. [`classify`] decides which metadata node a relayed message needs.

pub mod buttons;
pub mod classifier;
pub mod header;
pub mod interactive;
pub mod list;
pub mod telemetry;

pub use buttons::{
    ButtonKind, ButtonMode, ButtonTranslation, create_button, native_flow_defect, translate_buttons,
};
pub use classifier::{bot_marker_node, classify, classify_message, native_flow_node, product_list_node};
pub use header::{HeaderSpec, resolve_header};
pub use interactive::{BuildOutput, InteractiveBuilder};
pub use list::{DEFAULT_LIST_BUTTON_TEXT, create_section, list_button, normalize_sections};
