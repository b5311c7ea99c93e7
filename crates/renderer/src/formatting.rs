//! Label text for axes and the hover tooltip
//!
//! Labels arrive as stringified epoch-millisecond timestamps. Anything that
//! is not a positive integer is shown verbatim rather than dropped.

use chrono::{DateTime, Local, TimeZone};

const TICK_FORMAT: &str = "%H:%M:%S";
const TOOLTIP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Local time for a label holding positive epoch milliseconds
pub fn label_to_local(label: &str) -> Option<DateTime<Local>> {
    let millis: i64 = label.trim().parse().ok()?;
    if millis <= 0 {
        return None;
    }
    Local.timestamp_millis_opt(millis).single()
}

/// X-axis tick text: local `HH:MM:SS`, or the label itself
pub fn format_tick_label(label: &str) -> String {
    match label_to_local(label) {
        Some(time) => time.format(TICK_FORMAT).to_string(),
        None => label.to_string(),
    }
}

/// Tooltip title: full local date and time, or `Time: <label>`
pub fn format_tooltip_title(label: &str) -> String {
    if label.is_empty() {
        return String::new();
    }
    match label_to_local(label) {
        Some(time) => time.format(TOOLTIP_FORMAT).to_string(),
        None => format!("Time: {label}"),
    }
}

/// Value shown in a card's header and the tooltip body
pub fn format_value(value: f64) -> String {
    format!("{value:.2}")
}

pub fn format_tooltip_value(value: f64) -> String {
    format!("Value: {}", format_value(value))
}

/// Y tick text with just enough decimals for the tick interval
pub fn format_axis_value(value: f64, interval: f64) -> String {
    let decimals = if interval > 0.0 && interval < 1.0 {
        (-interval.log10().floor()).clamp(0.0, 6.0) as usize
    } else {
        0
    };
    // Avoid printing "-0"
    let value = if value.abs() < f64::EPSILON { 0.0 } else { value };
    format!("{value:.decimals$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_label_uses_local_time() {
        let expected = Local
            .timestamp_millis_opt(1_700_000_000_000)
            .unwrap()
            .format("%H:%M:%S")
            .to_string();
        assert_eq!(format_tick_label("1700000000000"), expected);
    }

    #[test]
    fn test_non_numeric_labels_pass_through() {
        assert_eq!(format_tick_label("abc"), "abc");
        assert_eq!(format_tick_label("-5"), "-5");
        assert_eq!(format_tick_label("0"), "0");
        assert_eq!(format_tick_label(""), "");
    }

    #[test]
    fn test_tooltip_title() {
        let expected = Local
            .timestamp_millis_opt(1_700_000_000_000)
            .unwrap()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(format_tooltip_title("1700000000000"), expected);
        assert_eq!(format_tooltip_title("bogus"), "Time: bogus");
        assert_eq!(format_tooltip_title(""), "");
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(format_value(23.456), "23.46");
        assert_eq!(format_value(-1.0), "-1.00");
        assert_eq!(format_tooltip_value(5.0), "Value: 5.00");
    }

    #[test]
    fn test_axis_value_decimals_follow_interval() {
        assert_eq!(format_axis_value(20.0, 5.0), "20");
        assert_eq!(format_axis_value(0.5, 0.5), "0.5");
        assert_eq!(format_axis_value(0.25, 0.05), "0.25");
        assert_eq!(format_axis_value(-0.0, 1.0), "0");
    }
}
