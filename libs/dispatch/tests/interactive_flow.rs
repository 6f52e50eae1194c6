use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wai_core::{
    Button, ClientError, MediaKind, MediaRef, MessagingClient, NativeFlowButton, OutgoingContent,
    Presence, SendOptions, normalize_message_content,
};
use wai_dispatch::{
    DispatchConfig, InteractiveClient, InteractiveOptions, NullObserver, create_button,
    create_section,
};
use wai_testutil::RecordingClient;
use wai_testutil::assertions::{assert_has_node, decoded_buttons, has_node};

const DIRECT: &str = "15550001111@s.whatsapp.net";
const GROUP: &str = "120363000000000000@g.us";

fn wrap(config: DispatchConfig) -> InteractiveClient<RecordingClient> {
    InteractiveClient::builder()
        .client(RecordingClient::new())
        .config(config)
        .observer(Arc::new(NullObserver))
        .build()
        .expect("client supplied")
}

fn yes_no() -> OutgoingContent {
    OutgoingContent::text("Continue?")
        .with_buttons(vec![Button::reply("a", "Yes"), Button::reply("b", "No")])
}

#[tokio::test]
async fn reply_buttons_become_quick_replies() {
    let client = wrap(DispatchConfig::default().with_typing_delay(Duration::ZERO));
    client
        .send_message(DIRECT, yes_no(), SendOptions::default())
        .await
        .unwrap();

    assert_eq!(
        client.inner().call_names(),
        vec!["generate", "presence", "relay"]
    );
    let (jid, message, opts) = client.inner().relays().remove(0);
    assert_eq!(jid, DIRECT);
    assert!(message.view_once_message.is_some());
    assert_eq!(
        decoded_buttons(&message),
        vec![
            ("quick_reply".to_string(), json!({ "display_text": "Yes", "id": "a" })),
            ("quick_reply".to_string(), json!({ "display_text": "No", "id": "b" })),
        ]
    );
    let interactive = normalize_message_content(&message)
        .interactive_message
        .expect("interactive payload");
    assert_eq!(interactive.body.text, "Continue?");
    assert_eq!(interactive.footer.text, "");
    assert_eq!(interactive.native_flow_message.message_params_json, "");
    assert_has_node(&opts, "biz");
    assert_has_node(&opts, "bot");
}

#[tokio::test]
async fn one_selection_marker_turns_every_entry_into_a_list() {
    let client = wrap(DispatchConfig::default().with_typing_delay(Duration::ZERO));
    let content = OutgoingContent::text("Pick")
        .with_buttons(vec![Button::selection("s", "Sizes"), Button::reply("c", "")]);
    client
        .send_message(DIRECT, content, SendOptions::default())
        .await
        .unwrap();

    let (_, message, _) = client.inner().relays().remove(0);
    assert_eq!(
        decoded_buttons(&message),
        vec![
            (
                "single_select".to_string(),
                json!({
                    "title": "Sizes",
                    "sections": [{ "title": "Options", "rows": [{ "title": "Sizes", "id": "s" }] }]
                })
            ),
            (
                "single_select".to_string(),
                json!({
                    "title": "Select",
                    "sections": [{ "title": "Options", "rows": [{ "title": "Option", "id": "c" }] }]
                })
            ),
        ]
    );
}

#[tokio::test]
async fn empty_buttons_fall_through_to_inner_send() {
    let client = wrap(DispatchConfig::default());
    let content = OutgoingContent::text("plain").with_buttons(Vec::new());
    let result = client
        .send_message(DIRECT, content.clone(), SendOptions::quoting(json!({ "id": "q" })))
        .await
        .unwrap();

    assert_eq!(result.message_id.as_deref(), Some("send-1"));
    let sends = client.inner().sends();
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].1, content);
    assert_eq!(sends[0].2.quoted, Some(json!({ "id": "q" })));
    assert!(client.inner().relays().is_empty());
}

#[tokio::test]
async fn presence_then_pause_then_relay() {
    tokio::time::pause();
    let client = wrap(DispatchConfig::default());
    client
        .send_message(DIRECT, yes_no(), SendOptions::default())
        .await
        .unwrap();

    let timeline = client.inner().timeline();
    let presence_at = timeline
        .iter()
        .find(|(_, name)| *name == "presence")
        .map(|(at, _)| *at)
        .expect("presence recorded");
    let relay_at = timeline
        .iter()
        .find(|(_, name)| *name == "relay")
        .map(|(at, _)| *at)
        .expect("relay recorded");
    let gap = relay_at - presence_at;
    assert!(gap >= Duration::from_millis(300), "gap was {gap:?}");
    assert!(gap < Duration::from_millis(302), "gap was {gap:?}");
    assert_eq!(
        client.inner().presences(),
        vec![(Presence::Composing, DIRECT.to_string())]
    );
}

#[tokio::test]
async fn configured_delay_and_presence_are_used() {
    tokio::time::pause();
    let config = DispatchConfig::from_lookup(|key| match key {
        "WAI_TYPING_DELAY_MS" => Some("1200".into()),
        "WAI_PRESENCE" => Some("recording".into()),
        _ => None,
    })
    .unwrap();
    let client = wrap(config);
    let started = tokio::time::Instant::now();
    client
        .send_button_message(
            DIRECT,
            vec![create_button("url", "Docs", "https://example.com")],
            None,
            InteractiveOptions::default().body("See docs"),
        )
        .await
        .unwrap();
    assert!(started.elapsed() >= Duration::from_millis(1200));
    assert_eq!(client.inner().presences()[0].0, Presence::Recording);
}

#[tokio::test]
async fn relay_uses_generated_id_and_quoted_reaches_generation() {
    let client = wrap(DispatchConfig::default().with_typing_delay(Duration::ZERO));
    let quoted = json!({ "key": { "id": "ORIGINAL" } });
    let result = client
        .send_message(DIRECT, yes_no(), SendOptions::quoting(quoted.clone()))
        .await
        .unwrap();

    let (_, _, generate_opts) = client.inner().generated().remove(0);
    assert_eq!(generate_opts.quoted, Some(quoted));
    let (_, _, relay_opts) = client.inner().relays().remove(0);
    assert_eq!(relay_opts.message_id.as_deref(), Some("MSG-1"));
    assert_eq!(result.message_id.as_deref(), Some("MSG-1"));
}

#[tokio::test]
async fn group_recipients_never_get_the_bot_marker() {
    let client = wrap(DispatchConfig::default().with_typing_delay(Duration::ZERO));
    client
        .send_message(GROUP, yes_no(), SendOptions::default())
        .await
        .unwrap();
    let (_, _, opts) = client.inner().relays().remove(0);
    assert_has_node(&opts, "biz");
    assert!(!has_node(&opts, "bot"));
}

#[tokio::test]
async fn media_header_is_uploaded_through_inner_client() {
    let client = wrap(DispatchConfig::default().with_typing_delay(Duration::ZERO));
    let mut content = yes_no();
    content.header = Some("Promo".into());
    content.image = Some(MediaRef::Url("https://cdn.example/a.png".into()));
    content.video = Some(MediaRef::Url("https://cdn.example/a.mp4".into()));
    client
        .send_message(DIRECT, content, SendOptions::default())
        .await
        .unwrap();

    assert_eq!(
        client.inner().uploads(),
        vec![(MediaKind::Video, "https://cdn.example/a.mp4".to_string())]
    );
    let (_, message, _) = client.inner().relays().remove(0);
    let header = normalize_message_content(&message)
        .interactive_message
        .expect("interactive payload")
        .header;
    assert_eq!(header.title, "Promo");
    assert!(header.has_media_attachment);
    assert!(header.video_message.is_some());
}

#[tokio::test]
async fn upload_failure_aborts_before_any_send() {
    let client = wrap(DispatchConfig::default());
    client
        .inner()
        .fail_uploads_with(|| ClientError::permanent("upload_failed", "media host down"));
    let err = client
        .send_list_message(
            DIRECT,
            &[create_section("Hot", ["Tea"])],
            None,
            InteractiveOptions::default().image("https://cdn.example/menu.png"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "upload_failed");
    assert_eq!(client.inner().call_names(), vec!["upload"]);
}

#[tokio::test]
async fn relay_failure_is_returned_unchanged() {
    let client = wrap(DispatchConfig::default().with_typing_delay(Duration::ZERO));
    client
        .inner()
        .fail_relays_with(|| ClientError::retryable("relay_failed", "socket closed"));
    let err = client
        .send_button_message(
            DIRECT,
            vec![NativeFlowButton::new("quick_reply", json!({ "display_text": "Hi", "id": "hi" }))],
            None,
            InteractiveOptions::default(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "relay_failed: socket closed");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn list_message_uses_title_and_default_button_text() {
    let client = wrap(DispatchConfig::default().with_typing_delay(Duration::ZERO));
    client
        .send_list_message(
            DIRECT,
            &[create_section("Drinks", ["Tea", "Coffee"])],
            Some(json!({ "id": "q" })),
            InteractiveOptions::default()
                .header("Menu header")
                .body("What would you like?")
                .footer("Kitchen"),
        )
        .await
        .unwrap();

    let (_, message, _) = client.inner().relays().remove(0);
    let buttons = decoded_buttons(&message);
    assert_eq!(buttons.len(), 1);
    assert_eq!(buttons[0].0, "single_select");
    assert_eq!(buttons[0].1["title"], "Select");
    assert_eq!(buttons[0].1["sections"][0]["rows"][1]["id"], "Coffee");
    let interactive = normalize_message_content(&message)
        .interactive_message
        .expect("interactive payload");
    assert_eq!(interactive.header.title, "Menu header");
    assert_eq!(interactive.footer.text, "Kitchen");
    assert_eq!(
        client.inner().generated()[0].2.quoted,
        Some(json!({ "id": "q" }))
    );
}
