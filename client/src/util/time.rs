//! Platform-aware clock and timer helpers.
//!
//! Uses `js_sys::Date::now()` and `gloo-timers` on WASM, and
//! `std::time::SystemTime` plus `tokio::time` natively (SSR and tests).

use std::time::Duration;

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    #[cfg(target_arch = "wasm32")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let ms = js_sys::Date::now() as i64;
        ms
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
    }
}

/// Wait for `duration`. A zero duration returns immediately.
pub async fn sleep(duration: Duration) {
    if duration.is_zero() {
        return;
    }
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}
