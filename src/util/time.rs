/// Get the current time in milliseconds since the UNIX epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn current_time_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

/// Get the current time in milliseconds since the UNIX epoch
#[cfg(target_arch = "wasm32")]
pub fn current_time_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_past_2020() {
        // 2020-01-01T00:00:00Z
        assert!(current_time_millis() > 1_577_836_800_000);
    }
}
