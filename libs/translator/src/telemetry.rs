use wai_telemetry::{TelemetryLabels, record_counter, telemetry_enabled, with_common_fields};

const TRANSLATE_SPAN_NAME: &str = "translate.run";
const TRANSLATE_COUNTER: &str = "interactive_payloads_built";
const SKIPPED_COUNTER: &str = "buttons_skipped";

/// Runs a payload build inside a `translate.run` span and counts the result.
///
/// `f` returns the built value together with the number of skipped descriptors.
pub fn translate_with_span<T, F>(jid: &str, kind: &str, f: F) -> T
where
    F: FnOnce() -> (T, usize),
{
    let span = tracing::info_span!(
        TRANSLATE_SPAN_NAME,
        jid = tracing::field::Empty,
        kind = %kind,
        msg_id = tracing::field::Empty,
    );
    with_common_fields(&span, jid, None);
    let _guard = span.enter();
    let (built, skipped) = f();
    if telemetry_enabled() {
        let labels = TelemetryLabels::new(kind).with_jid(jid);
        record_counter(TRANSLATE_COUNTER, 1, &labels);
        if skipped > 0 {
            record_counter(SKIPPED_COUNTER, skipped as u64, &labels);
        }
    }
    built
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn returns_built_value_inside_span() {
        let value = translate_with_span("1@s.whatsapp.net", "buttons", || {
            tracing::info!("building payload");
            (42, 0)
        });
        assert_eq!(value, 42);
        assert!(logs_contain("translate.run"));
        assert!(logs_contain("building payload"));
    }
}
