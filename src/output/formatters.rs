//! Reusable formatting utilities for CLI output

use chrono::{DateTime, Local};

/// Placeholder for absent values
pub const NONE: &str = "--";

/// Mask a secret, keeping the last four characters.
///
/// Short secrets are masked entirely.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len().max(4));
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(8), tail)
}

/// Format a byte count as a human-readable size
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    const GB: usize = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Format Unix seconds as a local date/time, `--` when out of range
pub fn format_epoch_local(secs: i64) -> String {
    match DateTime::from_timestamp(secs, 0) {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S %Z")
            .to_string(),
        None => NONE.to_string(),
    }
}

/// Human age of a Unix-seconds timestamp relative to `now`
pub fn format_age(secs: i64, now: i64) -> String {
    let age = (now - secs).max(0);
    match age {
        0..=59 => format!("{}s ago", age),
        60..=3599 => format!("{}m ago", age / 60),
        3600..=86399 => format!("{}h ago", age / 3600),
        _ => format!("{}d ago", age / 86400),
    }
}
