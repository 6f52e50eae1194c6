//! Dispatch adapter for interactive native-flow messages.
//!
//! [`InteractiveClient`] wraps an already connected [`MessagingClient`](wai_core::MessagingClient)
//! and implements the same contract. Relayed messages get the biz metadata node their content
//! needs; `send_message` calls that carry buttons are rebuilt as view-once interactive messages;
//! and the wrapper adds button, list and structured-list senders on top.
//!
//! ```
//! use wai_dispatch::{DispatchConfig, InteractiveClient};
//! use wai_testutil::RecordingClient;
//!
//! let client = InteractiveClient::builder()
//!     .client(RecordingClient::new())
//!     .config(DispatchConfig::default())
//!     .build()
//!     .expect("client supplied");
//! assert_eq!(client.config().typing_delay.as_millis(), 300);
//! ```

mod client;
mod config;
mod delay;
mod error;
mod observer;
mod structured;

pub use client::{InteractiveClient, InteractiveClientBuilder, InteractiveOptions};
pub use config::{BotMarkerPolicy, DEFAULT_TYPING_DELAY, DispatchConfig};
pub use delay::{delay, delay_ms};
pub use error::DispatchError;
pub use observer::{DispatchEvent, DispatchObserver, NullObserver, TracingObserver};
pub use structured::send_list_from_data;

pub use wai_translator::{classify, classify_message, create_button, create_section};
