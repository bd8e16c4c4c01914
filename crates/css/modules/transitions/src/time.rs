use core::time::Duration;

/// Parse a CSS time: `200ms`, `0.2s`, `1.5S`, or a bare `0`.
///
/// Negative, non-finite or unit-less non-zero values are rejected.
pub fn parse_time(text: &str) -> Option<Duration> {
    let lowered = text.trim().to_ascii_lowercase();
    let (number, scale) = if let Some(millis) = lowered.strip_suffix("ms") {
        (millis, 1_000.0)
    } else if let Some(seconds) = lowered.strip_suffix('s') {
        (seconds, 1.0)
    } else if lowered.parse::<f64>().is_ok_and(|value| value.abs() < f64::EPSILON) {
        return Some(Duration::ZERO);
    } else {
        return None;
    };
    let value = number.trim().parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let nanos = (value * 1_000_000_000.0 / scale).round();
    if nanos > u64::MAX as f64 {
        return None;
    }
    Some(Duration::from_nanos(nanos as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Units, bare zero and rejects.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn times() {
        assert_eq!(parse_time("200ms"), Some(Duration::from_millis(200)));
        assert_eq!(parse_time("0.5s"), Some(Duration::from_millis(500)));
        assert_eq!(parse_time(" 2S "), Some(Duration::from_secs(2)));
        assert_eq!(parse_time("0"), Some(Duration::ZERO));
        assert_eq!(parse_time("12"), None);
        assert_eq!(parse_time("-1s"), None);
        assert_eq!(parse_time("ease"), None);
        assert_eq!(parse_time("s"), None);
    }
}
