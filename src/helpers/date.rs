//! Date helper functions

use chrono::{DateTime, Utc};

/// Format a date using a Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY.MM.DD") // -> "2024.01.15"
/// ```
pub fn format_date(date: &DateTime<Utc>, format: &str) -> String {
    date.format(&moment_to_chrono_format(format)).to_string()
}

/// Convert the common Moment.js tokens to chrono format specifiers
fn moment_to_chrono_format(format: &str) -> String {
    // Longest tokens first so e.g. MMMM is not eaten by MM
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
    ];

    let mut result = format.to_string();
    for (from, to) in replacements {
        result = result.replace(from, to);
    }
    result
}
