use std::time::Duration;

/// Suspends the current task for `duration`; a zero duration returns immediately.
pub async fn delay(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

pub async fn delay_ms(ms: u64) {
    delay(Duration::from_millis(ms)).await;
}
