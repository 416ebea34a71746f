// Display formatting for KPI tiles, table cells and progress bars
use crate::domain::stats::Metric;
use chrono::NaiveDateTime;

/// Counts above this value fill the whole issue progress bar
pub const ISSUE_SCALE_CEILING: u64 = 1000;

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// `1234567` -> `1,234,567`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Shortest form of a number, without a trailing `.0` on whole values
pub fn plain_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if value == 0.0 {
        "0".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

pub fn metric(value: &Metric) -> String {
    match value {
        Metric::Number(n) => plain_number(*n),
        Metric::Text(s) => s.clone(),
        Metric::Missing => "--".to_string(),
    }
}

pub fn currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

pub fn speed_mph(speed: f64) -> String {
    format!("{:.1} mph", speed)
}

/// Width of an issue's progress fill, in percent
pub fn progress_percent(count: u64) -> f64 {
    let fraction = count as f64 / ISSUE_SCALE_CEILING as f64;
    (fraction * 100.0).min(100.0)
}

/// Clock portion of a pickup timestamp (`2024-01-03 08:15:42` -> `08:15:42`)
pub fn pickup_clock(timestamp: &str) -> String {
    let timestamp = timestamp.trim();
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(timestamp, fmt) {
            return parsed.time().format("%H:%M:%S").to_string();
        }
    }

    match timestamp.split(' ').nth(1) {
        Some(clock) if !clock.is_empty() => clock.to_string(),
        _ => timestamp.to_string(),
    }
}
