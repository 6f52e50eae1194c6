use std::time::Duration;

use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use wai_core::{Button, MessagingClient, OutgoingContent, SendOptions};
use wai_dispatch::{DispatchConfig, InteractiveClient};
use wai_telemetry::{TelemetryConfig, init_telemetry, telemetry_enabled};
use wai_testutil::RecordingClient;

type Sample = (String, Vec<(String, String)>, DebugValue);

fn labels(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn find<'a>(samples: &'a [Sample], name: &str, kind: &str) -> &'a Sample {
    samples
        .iter()
        .find(|(n, l, _)| n == name && l.first().is_some_and(|(_, v)| v == kind))
        .unwrap_or_else(|| panic!("no {name} sample with kind {kind} in {samples:?}"))
}

#[tokio::test]
async fn interactive_sends_record_labelled_metrics() {
    init_telemetry(TelemetryConfig::local("wai")).unwrap();
    assert!(telemetry_enabled());

    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let _guard = metrics::set_default_local_recorder(&recorder);

    let client = InteractiveClient::builder()
        .client(RecordingClient::new())
        .config(DispatchConfig::default().with_typing_delay(Duration::ZERO))
        .build()
        .expect("client supplied");
    let content = OutgoingContent::text("Pick")
        .with_buttons(vec![Button::default(), Button::reply("ok", "OK")]);
    client
        .send_message("1@s.whatsapp.net", content.clone(), SendOptions::default())
        .await
        .unwrap();
    client
        .send_message("120363000000000000@g.us", content, SendOptions::default())
        .await
        .unwrap();

    let samples: Vec<Sample> = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .map(|(key, _, _, value)| {
            let labels = key
                .key()
                .labels()
                .map(|label| (label.key().to_string(), label.value().to_string()))
                .collect();
            (key.key().name().to_string(), labels, value)
        })
        .collect();

    let direct = labels(&[("kind", "buttons"), ("chat_scope", "direct")]);
    let group = labels(&[("kind", "buttons"), ("chat_scope", "group")]);
    for scope in [&direct, &group] {
        assert!(
            samples.contains(&(
                "interactive_messages_sent".to_string(),
                scope.clone(),
                DebugValue::Counter(1)
            )),
            "missing sent counter for {scope:?} in {samples:?}"
        );
        assert!(
            samples.contains(&(
                "buttons_skipped".to_string(),
                scope.clone(),
                DebugValue::Counter(1)
            )),
            "missing skipped counter for {scope:?} in {samples:?}"
        );
    }

    let (_, biz_labels, biz_value) = find(&samples, "biz_nodes_attached", "interactiveMessage");
    assert_eq!(biz_labels[1].0, "chat_scope");
    assert_eq!(biz_value, &DebugValue::Counter(1));

    let (_, _, latency) = find(&samples, "interactive_dispatch_ms", "buttons");
    assert!(matches!(latency, DebugValue::Histogram(values) if values.len() == 1));
}
