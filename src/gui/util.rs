//! Small pure helper functions used by the GUI.
//! - no UI widgets or state mutation

/// Upper bound accepted by the limit box. Trial division past this takes minutes.
pub(crate) const MAX_LIMIT: u64 = 50_000_000;

/// Parse the limit text box.
/// - empty -> Err
/// - number in 1..=MAX_LIMIT -> Ok(number)
/// - garbage / out of range -> Err(message for the status line)
pub(crate) fn parse_limit(s: &str) -> Result<u64, String> {
    let trimmed = s.trim().replace('_', "");
    if trimmed.is_empty() {
        return Err("Enter a limit first.".to_string());
    }

    let n = trimmed
        .parse::<u64>()
        .map_err(|_| format!("Not a number: {}", s.trim()))?;

    if n == 0 || n > MAX_LIMIT {
        return Err(format!("Limit must be between 1 and {MAX_LIMIT}."));
    }
    Ok(n)
}

/// 1234 -> "1.2s", 65000 -> "1:05"
pub(crate) fn fmt_elapsed(ms: u64) -> String {
    if ms < 60_000 {
        format!("{}.{}s", ms / 1000, (ms % 1000) / 100)
    } else {
        let s = ms / 1000;
        format!("{}:{:02}", s / 60, s % 60)
    }
}
