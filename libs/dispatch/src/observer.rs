use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchEvent {
    /// A client was wrapped with interactive support.
    Wrapped,
    BizNodeAttached {
        jid: String,
        content_type: String,
    },
    BotMarkerAttached {
        jid: String,
    },
    /// A button descriptor was dropped during translation.
    ButtonSkipped {
        jid: String,
        warning: String,
    },
    InteractiveSent {
        jid: String,
        kind: &'static str,
        message_id: String,
    },
    /// `send_message` without buttons went straight to the inner client.
    Forwarded {
        jid: String,
    },
}

pub trait DispatchObserver: Send + Sync {
    fn emit(&self, event: DispatchEvent);
}

#[derive(Debug, Default)]
pub struct NullObserver;

impl DispatchObserver for NullObserver {
    fn emit(&self, _event: DispatchEvent) {}
}

/// Default observer: writes each event to `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl DispatchObserver for TracingObserver {
    fn emit(&self, event: DispatchEvent) {
        match event {
            DispatchEvent::Wrapped => {
                info!(target = "wai.dispatch", "client wrapped with interactive message support")
            }
            DispatchEvent::BizNodeAttached { jid, content_type } => {
                debug!(target = "wai.dispatch", %jid, %content_type, "biz node attached")
            }
            DispatchEvent::BotMarkerAttached { jid } => {
                debug!(target = "wai.dispatch", %jid, "bot marker attached")
            }
            DispatchEvent::ButtonSkipped { jid, warning } => {
                warn!(target = "wai.dispatch", %jid, %warning, "button descriptor skipped")
            }
            DispatchEvent::InteractiveSent {
                jid,
                kind,
                message_id,
            } => info!(
                target = "wai.dispatch",
                %jid, kind, %message_id, "interactive message relayed"
            ),
            DispatchEvent::Forwarded { jid } => {
                debug!(target = "wai.dispatch", %jid, "send forwarded unchanged")
            }
        }
    }
}
