use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{Instrument, Span};
use wai_core::{
    ClientResult, ContentType, GenerateOptions, GeneratedMessage, MediaKind, MessagingClient,
    NativeFlowButton, OutgoingContent, Presence, RelayOptions, Section, SendOptions, SendResult,
    WaMessage, is_group_jid,
};
use wai_telemetry::{
    TelemetryLabels, record_counter, record_histogram, telemetry_enabled, with_common_fields,
};
use wai_translator::telemetry::translate_with_span;
use wai_translator::{HeaderSpec, InteractiveBuilder, bot_marker_node, classify, resolve_header};

use crate::config::DispatchConfig;
use crate::delay::delay;
use crate::error::DispatchError;
use crate::observer::{DispatchEvent, DispatchObserver, TracingObserver};

const DISPATCH_SPAN_NAME: &str = "dispatch.send";
const SENT_COUNTER: &str = "interactive_messages_sent";
const BIZ_NODE_COUNTER: &str = "biz_nodes_attached";
const DISPATCH_LATENCY: &str = "interactive_dispatch_ms";

/// Options shared by the button and list senders.
///
/// `title` wins over `header` for the header text; `video` wins over `image`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractiveOptions {
    pub title: Option<String>,
    pub header: Option<String>,
    pub body: Option<String>,
    pub caption: Option<String>,
    pub footer: Option<String>,
    pub image: Option<String>,
    pub video: Option<String>,
    pub button_text: Option<String>,
}

impl InteractiveOptions {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn video(mut self, url: impl Into<String>) -> Self {
        self.video = Some(url.into());
        self
    }

    pub fn button_text(mut self, text: impl Into<String>) -> Self {
        self.button_text = Some(text.into());
        self
    }

    pub fn header_spec(&self) -> HeaderSpec {
        HeaderSpec {
            title: first_non_empty(&self.title, &self.header).map(str::to_string),
            image: self.image.clone(),
            video: self.video.clone(),
        }
    }

    fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    fn footer_text(&self) -> &str {
        self.footer.as_deref().unwrap_or_default()
    }
}

pub(crate) fn first_non_empty<'a>(a: &'a Option<String>, b: &'a Option<String>) -> Option<&'a str> {
    a.as_deref()
        .filter(|v| !v.is_empty())
        .or_else(|| b.as_deref().filter(|v| !v.is_empty()))
}

/// Wraps a connected client and adds native-flow button and list support.
///
/// Implements [`MessagingClient`] itself, so it can be used wherever the inner client was.
pub struct InteractiveClient<C: ?Sized> {
    inner: Arc<C>,
    config: DispatchConfig,
    observer: Arc<dyn DispatchObserver>,
}

impl<C: ?Sized> Clone for InteractiveClient<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            config: self.config.clone(),
            observer: Arc::clone(&self.observer),
        }
    }
}

impl<C> InteractiveClient<C>
where
    C: MessagingClient,
{
    /// Wraps `client` with the default configuration and the tracing observer.
    pub fn new(client: C) -> Self {
        Self::from_shared(Arc::new(client))
    }
}

impl<C> InteractiveClient<C>
where
    C: MessagingClient + ?Sized,
{
    pub fn from_shared(client: Arc<C>) -> Self {
        let observer: Arc<dyn DispatchObserver> = Arc::new(TracingObserver);
        observer.emit(DispatchEvent::Wrapped);
        Self {
            inner: client,
            config: DispatchConfig::default(),
            observer,
        }
    }

    pub fn builder() -> InteractiveClientBuilder<C> {
        InteractiveClientBuilder::default()
    }

    pub fn inner(&self) -> &Arc<C> {
        &self.inner
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Sends pre-built native-flow entries as one interactive message.
    pub async fn send_button_message(
        &self,
        jid: &str,
        buttons: Vec<NativeFlowButton>,
        quoted: Option<Value>,
        opts: InteractiveOptions,
    ) -> ClientResult<SendResult> {
        let header = resolve_header(&*self.inner, &opts.header_spec()).await?;
        let mut out = translate_with_span(jid, "native_flow", || {
            let out = InteractiveBuilder::default()
                .body(opts.body_text())
                .footer(opts.footer_text())
                .header(header)
                .native_flow(buttons)
                .build();
            let skipped = out.warnings.len();
            (out, skipped)
        });
        self.report_skipped(jid, std::mem::take(&mut out.warnings));
        self.dispatch_interactive(jid, "native_flow", out.into_view_once(), quoted)
            .await
    }

    /// Sends `sections` as a single-select list behind one button.
    pub async fn send_list_message(
        &self,
        jid: &str,
        sections: &[Section],
        quoted: Option<Value>,
        opts: InteractiveOptions,
    ) -> ClientResult<SendResult> {
        let header = resolve_header(&*self.inner, &opts.header_spec()).await?;
        let button_text = opts.button_text.as_deref().unwrap_or_default();
        let out = translate_with_span(jid, "list", || {
            let out = InteractiveBuilder::default()
                .body(opts.body_text())
                .footer(opts.footer_text())
                .header(header)
                .list(button_text, sections)
                .build();
            (out, 0)
        });
        self.dispatch_interactive(jid, "list", out.into_view_once(), quoted)
            .await
    }

    fn report_skipped(&self, jid: &str, warnings: Vec<String>) {
        for warning in warnings {
            self.observer.emit(DispatchEvent::ButtonSkipped {
                jid: jid.to_string(),
                warning,
            });
        }
    }

    /// Generate the envelope, announce presence, pause, then relay through the wrapper.
    async fn dispatch_interactive(
        &self,
        jid: &str,
        kind: &'static str,
        message: WaMessage,
        quoted: Option<Value>,
    ) -> ClientResult<SendResult> {
        let span = tracing::info_span!(
            DISPATCH_SPAN_NAME,
            jid = tracing::field::Empty,
            kind = %kind,
            msg_id = tracing::field::Empty,
        );
        with_common_fields(&span, jid, None);

        async move {
            let started = Instant::now();
            let GeneratedMessage { key, message, .. } =
                self.inner
                    .generate_message(jid, message, GenerateOptions { quoted })?;
            with_common_fields(&Span::current(), jid, Some(&key.id));

            self.inner
                .send_presence_update(self.config.presence, jid)
                .await?;
            delay(self.config.typing_delay).await;

            let result = self
                .relay_message(jid, message, RelayOptions::with_message_id(key.id.clone()))
                .await?;

            self.observer.emit(DispatchEvent::InteractiveSent {
                jid: jid.to_string(),
                kind,
                message_id: key.id,
            });
            if telemetry_enabled() {
                let labels = TelemetryLabels::new(kind).with_jid(jid);
                record_counter(SENT_COUNTER, 1, &labels);
                record_histogram(
                    DISPATCH_LATENCY,
                    started.elapsed().as_secs_f64() * 1000.0,
                    &labels,
                );
            }
            Ok(result)
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl<C> MessagingClient for InteractiveClient<C>
where
    C: MessagingClient + ?Sized,
{
    /// Attaches the biz node the content needs and, for one-to-one chats, the bot marker.
    async fn relay_message(
        &self,
        jid: &str,
        message: WaMessage,
        mut opts: RelayOptions,
    ) -> ClientResult<SendResult> {
        let normalized = self.inner.normalize_content(&message);
        let content_type = self.inner.content_type(&normalized);

        let biz_node = classify(content_type.as_ref()).filter(|node| !carries(&opts, &node.tag));
        if let Some(node) = biz_node {
            opts.push_node(node);
            let content_type = content_type
                .as_ref()
                .map(ContentType::as_str)
                .unwrap_or_default()
                .to_string();
            if telemetry_enabled() {
                let labels = TelemetryLabels::new(content_type.clone()).with_jid(jid);
                record_counter(BIZ_NODE_COUNTER, 1, &labels);
            }
            self.observer.emit(DispatchEvent::BizNodeAttached {
                jid: jid.to_string(),
                content_type,
            });
        }

        let marker = bot_marker_node();
        if !is_group_jid(jid)
            && self.config.bot_marker.applies(carries(&opts, "biz"))
            && !carries(&opts, &marker.tag)
        {
            opts.push_node(marker);
            self.observer.emit(DispatchEvent::BotMarkerAttached {
                jid: jid.to_string(),
            });
        }

        self.inner.relay_message(jid, message, opts).await
    }

    /// Rebuilds content carrying buttons as a view-once interactive message; forwards the rest.
    async fn send_message(
        &self,
        jid: &str,
        content: OutgoingContent,
        opts: SendOptions,
    ) -> ClientResult<SendResult> {
        if !content.has_buttons() {
            self.observer.emit(DispatchEvent::Forwarded {
                jid: jid.to_string(),
            });
            return self.inner.send_message(jid, content, opts).await;
        }

        let header = resolve_header(&*self.inner, &HeaderSpec::from_content(&content)).await?;
        let mut out = translate_with_span(jid, "buttons", || {
            let out = InteractiveBuilder::default()
                .body(content.body_text())
                .footer(content.footer.as_deref().unwrap_or_default())
                .header(header)
                .buttons(&content.buttons)
                .build();
            let skipped = out.warnings.len();
            (out, skipped)
        });
        self.report_skipped(jid, std::mem::take(&mut out.warnings));

        self.dispatch_interactive(jid, "buttons", out.into_view_once(), opts.quoted)
            .await
    }

    async fn send_presence_update(&self, presence: Presence, jid: &str) -> ClientResult<()> {
        self.inner.send_presence_update(presence, jid).await
    }

    async fn upload_media(&self, kind: MediaKind, url: &str) -> ClientResult<Value> {
        self.inner.upload_media(kind, url).await
    }

    fn generate_message(
        &self,
        jid: &str,
        content: WaMessage,
        opts: GenerateOptions,
    ) -> ClientResult<GeneratedMessage> {
        self.inner.generate_message(jid, content, opts)
    }

    fn normalize_content(&self, message: &WaMessage) -> WaMessage {
        self.inner.normalize_content(message)
    }

    fn content_type(&self, message: &WaMessage) -> Option<ContentType> {
        self.inner.content_type(message)
    }
}

/// Nodes already present (for instance from an inner wrapper) are not attached again.
fn carries(opts: &RelayOptions, tag: &str) -> bool {
    opts.nodes().iter().any(|node| node.tag == tag)
}

/// Builder for [`InteractiveClient`]; `build` fails when no client was supplied.
pub struct InteractiveClientBuilder<C: ?Sized> {
    client: Option<Arc<C>>,
    config: DispatchConfig,
    observer: Option<Arc<dyn DispatchObserver>>,
}

impl<C: ?Sized> Default for InteractiveClientBuilder<C> {
    fn default() -> Self {
        Self {
            client: None,
            config: DispatchConfig::default(),
            observer: None,
        }
    }
}

impl<C: ?Sized> InteractiveClientBuilder<C> {
    pub fn client(self, client: C) -> Self
    where
        C: Sized,
    {
        self.shared(Arc::new(client))
    }

    pub fn shared(mut self, client: Arc<C>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn DispatchObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn build(self) -> Result<InteractiveClient<C>, DispatchError> {
        let inner = self.client.ok_or(DispatchError::MissingClient)?;
        let observer = self
            .observer
            .unwrap_or_else(|| Arc::new(TracingObserver));
        observer.emit(DispatchEvent::Wrapped);
        Ok(InteractiveClient {
            inner,
            config: self.config,
            observer,
        })
    }
}
