//! src/util/humanize.rs

use chrono::DateTime;

/// Placeholder shown when a date is missing or the sentinel `"Unknown"`.
pub const MISSING_DATE: &str = "—";

pub fn human_readable_size(size: u64) -> String {
    if size == 0 {
        return "0 B".to_string();
    }
    let units: [&'static str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];
    let mut size_f: f64 = size as f64;
    let mut unit_idx: usize = 0;

    while size_f >= 1024.0 && unit_idx < units.len() - 1 {
        size_f /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size, units[unit_idx])
    } else {
        format!("{:.1} {}", size_f, units[unit_idx])
    }
}

/// Render an RFC 3339 modification date as `Jan 5, 2024, 03:04 PM`.
///
/// The timestamp keeps its own offset. Strings that do not parse are shown
/// verbatim.
pub fn format_date(raw: &str) -> String {
    if raw.is_empty() || raw == "Unknown" {
        return MISSING_DATE.to_string();
    }

    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%b %-d, %Y, %I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_switch_units_at_1024() {
        assert_eq!(human_readable_size(0), "0 B");
        assert_eq!(human_readable_size(1023), "1023 B");
        assert_eq!(human_readable_size(1024), "1.0 KB");
        assert_eq!(human_readable_size(1536), "1.5 KB");
        assert_eq!(human_readable_size(5 * 1024 * 1024 * 1024), "5.0 GB");
    }

    #[test]
    fn dates_render_or_fall_back() {
        assert_eq!(format_date("2024-01-05T15:04:00+00:00"), "Jan 5, 2024, 03:04 PM");
        assert_eq!(format_date("Unknown"), MISSING_DATE);
        assert_eq!(format_date(""), MISSING_DATE);
        assert_eq!(format_date("yesterday"), "yesterday");
    }
}
