//! Display formatting helpers
//!
//! Small pure helpers for rendering backend values (timestamps, file
//! sizes, role codes) the way the admin screens expect them.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Timestamp layouts the backend is known to emit.
const DATETIME_LAYOUTS: [&str; 3] =
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_local());
    }
    DATETIME_LAYOUTS.iter().find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
}

/// Format a backend timestamp as `YYYY-MM-DD HH:MM:SS`.
///
/// Empty or missing values render as `-`; a value that does not parse is
/// returned unchanged rather than replaced with a placeholder.
///
/// # Examples
///
/// ```
/// use scholarkg_common::format::format_date_time;
///
/// assert_eq!(format_date_time(Some("2025-03-01T09:30:00Z")), "2025-03-01 09:30:00");
/// assert_eq!(format_date_time(None), "-");
/// ```
pub fn format_date_time(value: Option<&str>) -> String {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return "-".to_string(),
    };

    match parse_datetime(value) {
        Some(parsed) => parsed.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => value.to_string(),
    }
}

/// Format a backend timestamp or date as `YYYY-MM-DD`.
///
/// # Examples
///
/// ```
/// use scholarkg_common::format::format_date;
///
/// assert_eq!(format_date("2025-03-01T09:30:00Z"), "2025-03-01");
/// ```
pub fn format_date(value: &str) -> String {
    if let Some(parsed) = parse_datetime(value) {
        return parsed.format("%Y-%m-%d").to_string();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return parsed.format("%Y-%m-%d").to_string();
    }
    value.to_string()
}

/// Format a byte count as a human-readable size (B/KB/MB/GB).
///
/// # Examples
///
/// ```
/// use scholarkg_common::format::format_file_size;
///
/// assert_eq!(format_file_size(512), "512 B");
/// assert_eq!(format_file_size(1536), "1.50 KB");
/// assert_eq!(format_file_size(5 * 1024 * 1024), "5.00 MB");
/// ```
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    if size < KB {
        format!("{size} B")
    } else if size < MB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else if size < GB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else {
        format!("{:.2} GB", size as f64 / GB as f64)
    }
}

/// Format a numeric role code as its display label.
pub fn format_role(role: i64) -> &'static str {
    match role {
        0 => "User",
        1 => "Admin",
        _ => "Unknown",
    }
}
