//! Core contracts for the interactive native-flow messaging helpers.
//!
//! This crate holds the message model shared by the payload builder and the dispatch adapter:
//! outgoing content descriptors, the protocol-side message shape, metadata nodes attached on
//! relay, and the [`MessagingClient`] trait implemented by the underlying socket client.
pub mod client;
pub mod descriptors;
pub mod interactive;
pub mod message;
pub mod node;

pub use client::*;
pub use descriptors::*;
pub use interactive::*;
pub use message::*;
pub use node::*;

/// Suffix carried by group chat identifiers.
pub const GROUP_JID_SUFFIX: &str = "@g.us";

/// Returns true when the recipient identifier addresses a group chat.
///
/// ```
/// use wai_core::is_group_jid;
///
/// assert!(is_group_jid("12036302@g.us"));
/// assert!(!is_group_jid("15551234567@s.whatsapp.net"));
/// ```
pub fn is_group_jid(jid: &str) -> bool {
    jid.ends_with(GROUP_JID_SUFFIX)
}
