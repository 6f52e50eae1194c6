use metrics::Label;

use crate::context::TelemetryLabels;

fn labels(labels: &TelemetryLabels) -> Vec<Label> {
    labels
        .tags()
        .into_iter()
        .map(|(key, value)| Label::new(key, value))
        .collect()
}

/// Increments a counter on the globally installed `metrics` recorder (no-op without one).
pub fn record_counter(name: &'static str, value: u64, tags: &TelemetryLabels) {
    metrics::counter!(name, labels(tags)).increment(value);
}

pub fn record_histogram(name: &'static str, value: f64, tags: &TelemetryLabels) {
    metrics::histogram!(name, labels(tags)).record(value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};

    #[test]
    fn counters_and_histograms_carry_scope_labels() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        metrics::with_local_recorder(&recorder, || {
            let direct = TelemetryLabels::new("buttons").with_jid("1@s.whatsapp.net");
            record_counter("sent", 2, &direct);
            let group = TelemetryLabels::new("list").with_jid("1-2@g.us");
            record_histogram("latency", 4.0, &group);
        });

        let mut seen = Vec::new();
        for (key, _, _, value) in snapshotter.snapshot().into_vec() {
            let labels: Vec<(String, String)> = key
                .key()
                .labels()
                .map(|label| (label.key().to_string(), label.value().to_string()))
                .collect();
            seen.push((key.key().name().to_string(), labels, value));
        }
        seen.sort_by(|a, b| a.0.cmp(&b.0));

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, "latency");
        assert_eq!(
            seen[0].1,
            vec![
                ("kind".to_string(), "list".to_string()),
                ("chat_scope".to_string(), "group".to_string()),
            ]
        );
        assert!(matches!(&seen[0].2, DebugValue::Histogram(values) if values.len() == 1));
        assert_eq!(seen[1].0, "sent");
        assert_eq!(
            seen[1].1,
            vec![
                ("kind".to_string(), "buttons".to_string()),
                ("chat_scope".to_string(), "direct".to_string()),
            ]
        );
        assert_eq!(seen[1].2, DebugValue::Counter(2));
    }
}
