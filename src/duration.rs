//! Conversions between track duration text and seconds.

/// Parse `mm:ss` or `h:mm:ss` into seconds.
///
/// Anything else, including the `"Unknown"` sentinel and the empty string,
/// yields `0`.
pub fn parse_duration(text: &str) -> u64 {
    let parts: Option<Vec<u64>> = text
        .trim()
        .split(':')
        .map(|part| part.parse::<u64>().ok())
        .collect();

    let total = match parts.as_deref() {
        Some(&[minutes, seconds]) => minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds)),
        Some(&[hours, minutes, seconds]) => hours
            .checked_mul(3600)
            .zip(minutes.checked_mul(60))
            .and_then(|(h, m)| h.checked_add(m))
            .and_then(|hm| hm.checked_add(seconds)),
        _ => None,
    };

    // Out-of-range components are as meaningless as non-numeric ones.
    total.unwrap_or(0)
}

/// Format a total number of seconds as `"<m> min"` or `"<h> hr <m> min"`.
///
/// Leftover seconds are dropped, not rounded.
pub fn format_total(total_seconds: u64) -> String {
    if total_seconds == 0 {
        return "0 min".to_string();
    }

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;

    if hours > 0 {
        format!("{hours} hr {minutes} min")
    } else {
        format!("{minutes} min")
    }
}
