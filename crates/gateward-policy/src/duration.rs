//! The duration grammar used by temporary-add commands.
//!
//! Grammar: one or more `<positive integer><unit>` tokens, concatenated
//! with no separator. Units are `s`, `m`, `h`, `d` (seconds, minutes,
//! hours, days). Duplicate units accumulate additively, so `"1h1h"` is
//! two hours and `"1h30m"` is 5400 seconds. A zero-valued token, or an
//! input with no valid token at all, is a parse error. Characters that
//! form no token are skipped, never accepted as part of one.

use std::time::Duration;

use crate::PolicyError;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_DAY: u64 = 86_400;

/// Parses a compound duration expression like `"1h30m"` or `"2d"`.
///
/// # Errors
///
/// [`PolicyError::InvalidDuration`] when the input contains no valid
/// token, contains a zero-valued token, or overflows.
pub fn parse_duration(input: &str) -> Result<Duration, PolicyError> {
    let invalid = || PolicyError::InvalidDuration(input.to_string());

    let bytes = input.as_bytes();
    let mut total_secs: u64 = 0;
    let mut found_token = false;
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }

        // A digit run only becomes a token when a unit follows it.
        let secs_per_unit = match bytes.get(i).copied() {
            Some(b's') => 1,
            Some(b'm') => SECS_PER_MINUTE,
            Some(b'h') => SECS_PER_HOUR,
            Some(b'd') => SECS_PER_DAY,
            _ => continue,
        };
        i += 1;

        // parse() can still fail on a run too long for u64.
        let value: u64 = input[start..i - 1].parse().map_err(|_| invalid())?;
        if value == 0 {
            return Err(invalid());
        }
        total_secs = value
            .checked_mul(secs_per_unit)
            .and_then(|secs| total_secs.checked_add(secs))
            .ok_or_else(invalid)?;
        found_token = true;
    }

    if !found_token {
        return Err(invalid());
    }
    Ok(Duration::from_secs(total_secs))
}

/// Renders a duration back into the grammar's units, largest first,
/// zero components skipped: 93784 seconds → `"1d 2h 3m 4s"`. The floor
/// is `"0s"` for sub-second (or zero) durations.
pub fn format_duration(duration: Duration) -> String {
    let mut secs = duration.as_secs();
    let days = secs / SECS_PER_DAY;
    secs %= SECS_PER_DAY;
    let hours = secs / SECS_PER_HOUR;
    secs %= SECS_PER_HOUR;
    let minutes = secs / SECS_PER_MINUTE;
    secs %= SECS_PER_MINUTE;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if secs > 0 {
        parts.push(format!("{secs}s"));
    }

    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join(" ")
    }
}
