//! Test doubles for the [`MessagingClient`] contract.
//!
//! [`RecordingClient`] stands in for a connected socket: it records every call in order (with the
//! tokio clock instant it happened at), answers with deterministic ids and can be told to fail
//! uploads, relays or sends.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::time::Instant;
use wai_core::{
    ClientError, ClientResult, GenerateOptions, GeneratedMessage, MediaKind, MessagingClient,
    OutgoingContent, Presence, RelayOptions, SendOptions, SendResult, WaMessage,
};

pub mod assertions;

type FailureFn = Box<dyn Fn() -> ClientError + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Relay {
        jid: String,
        message: WaMessage,
        opts: RelayOptions,
    },
    Send {
        jid: String,
        content: OutgoingContent,
        opts: SendOptions,
    },
    Presence {
        presence: Presence,
        jid: String,
    },
    Upload {
        kind: MediaKind,
        url: String,
    },
    Generate {
        jid: String,
        content: WaMessage,
        opts: GenerateOptions,
    },
}

impl RecordedCall {
    pub fn name(&self) -> &'static str {
        match self {
            RecordedCall::Relay { .. } => "relay",
            RecordedCall::Send { .. } => "send",
            RecordedCall::Presence { .. } => "presence",
            RecordedCall::Upload { .. } => "upload",
            RecordedCall::Generate { .. } => "generate",
        }
    }
}

#[derive(Default)]
struct Failures {
    relay: Option<FailureFn>,
    send: Option<FailureFn>,
    upload: Option<FailureFn>,
}

#[derive(Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<(Instant, RecordedCall)>>,
    failures: Mutex<Failures>,
    counter: AtomicUsize,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_relays_with(&self, f: impl Fn() -> ClientError + Send + Sync + 'static) {
        self.failures.lock().unwrap().relay = Some(Box::new(f));
    }

    pub fn fail_sends_with(&self, f: impl Fn() -> ClientError + Send + Sync + 'static) {
        self.failures.lock().unwrap().send = Some(Box::new(f));
    }

    pub fn fail_uploads_with(&self, f: impl Fn() -> ClientError + Send + Sync + 'static) {
        self.failures.lock().unwrap().upload = Some(Box::new(f));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, call)| call.clone())
            .collect()
    }

    /// Call names with the instant each one was recorded.
    pub fn timeline(&self) -> Vec<(Instant, &'static str)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(at, call)| (*at, call.name()))
            .collect()
    }

    pub fn call_names(&self) -> Vec<&'static str> {
        self.timeline().into_iter().map(|(_, name)| name).collect()
    }

    pub fn relays(&self) -> Vec<(String, WaMessage, RelayOptions)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::Relay { jid, message, opts } => Some((jid, message, opts)),
                _ => None,
            })
            .collect()
    }

    pub fn sends(&self) -> Vec<(String, OutgoingContent, SendOptions)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::Send { jid, content, opts } => Some((jid, content, opts)),
                _ => None,
            })
            .collect()
    }

    pub fn presences(&self) -> Vec<(Presence, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::Presence { presence, jid } => Some((presence, jid)),
                _ => None,
            })
            .collect()
    }

    pub fn uploads(&self) -> Vec<(MediaKind, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::Upload { kind, url } => Some((kind, url)),
                _ => None,
            })
            .collect()
    }

    pub fn generated(&self) -> Vec<(String, WaMessage, GenerateOptions)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::Generate { jid, content, opts } => Some((jid, content, opts)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push((Instant::now(), call));
    }

    fn next(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{prefix}-{n}")
    }

    fn failure(&self, pick: impl Fn(&Failures) -> Option<&FailureFn>) -> Option<ClientError> {
        let failures = self.failures.lock().unwrap();
        pick(&failures).map(|f| f())
    }
}

#[async_trait]
impl MessagingClient for RecordingClient {
    async fn relay_message(
        &self,
        jid: &str,
        message: WaMessage,
        opts: RelayOptions,
    ) -> ClientResult<SendResult> {
        let message_id = opts.message_id.clone();
        self.record(RecordedCall::Relay {
            jid: jid.to_string(),
            message,
            opts,
        });
        if let Some(err) = self.failure(|f| f.relay.as_ref()) {
            return Err(err);
        }
        Ok(SendResult {
            message_id: Some(message_id.unwrap_or_else(|| self.next("relay"))),
            raw: None,
        })
    }

    async fn send_message(
        &self,
        jid: &str,
        content: OutgoingContent,
        opts: SendOptions,
    ) -> ClientResult<SendResult> {
        self.record(RecordedCall::Send {
            jid: jid.to_string(),
            content,
            opts,
        });
        if let Some(err) = self.failure(|f| f.send.as_ref()) {
            return Err(err);
        }
        Ok(SendResult {
            message_id: Some(self.next("send")),
            raw: Some(json!({ "status": "sent" })),
        })
    }

    async fn send_presence_update(&self, presence: Presence, jid: &str) -> ClientResult<()> {
        self.record(RecordedCall::Presence {
            presence,
            jid: jid.to_string(),
        });
        Ok(())
    }

    async fn upload_media(&self, kind: MediaKind, url: &str) -> ClientResult<Value> {
        self.record(RecordedCall::Upload {
            kind,
            url: url.to_string(),
        });
        if let Some(err) = self.failure(|f| f.upload.as_ref()) {
            return Err(err);
        }
        let mimetype = match kind {
            MediaKind::Image => "image/jpeg",
            MediaKind::Video => "video/mp4",
        };
        Ok(json!({ "url": url, "mimetype": mimetype }))
    }

    fn generate_message(
        &self,
        jid: &str,
        content: WaMessage,
        opts: GenerateOptions,
    ) -> ClientResult<GeneratedMessage> {
        self.record(RecordedCall::Generate {
            jid: jid.to_string(),
            content: content.clone(),
            opts,
        });
        Ok(GeneratedMessage::outgoing(jid, self.next("MSG"), content))
    }
}
