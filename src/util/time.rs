//! Report formatting: elapsed time, sampling rate, and grouped counts

use std::time::Duration;

/// Scale steps for sampling rates
const RATE_UNITS: [(f64, &str); 3] = [(1e9, "G"), (1e6, "M"), (1e3, "K")];

/// Elapsed time with the coarsest unit that keeps it above 1
///
/// ```
/// use std::time::Duration;
/// use weightgen::util::time::format_duration;
///
/// assert_eq!(format_duration(Duration::from_nanos(820)), "820ns");
/// assert_eq!(format_duration(Duration::from_micros(42)), "42.00us");
/// assert_eq!(format_duration(Duration::from_millis(130)), "130.00ms");
/// assert_eq!(format_duration(Duration::from_millis(2250)), "2.25s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    match nanos {
        0..=999 => format!("{}ns", nanos),
        1_000..=999_999 => format!("{:.2}us", nanos as f64 / 1e3),
        1_000_000..=999_999_999 => format!("{:.2}ms", nanos as f64 / 1e6),
        _ => format!("{:.2}s", duration.as_secs_f64()),
    }
}

/// Samples per second with a K/M/G suffix
///
/// ```
/// use weightgen::util::time::format_rate;
///
/// assert_eq!(format_rate(730.0), "730");
/// assert_eq!(format_rate(48_000.0), "48.00K");
/// assert_eq!(format_rate(95_500_000.0), "95.50M");
/// ```
pub fn format_rate(rate: f64) -> String {
    RATE_UNITS
        .iter()
        .find(|(scale, _)| rate >= *scale)
        .map(|(scale, suffix)| format!("{:.2}{}", rate / scale, suffix))
        .unwrap_or_else(|| format!("{:.0}", rate))
}

/// Events per second over `duration` (0 for a zero duration)
pub fn calculate_rate(events: u64, duration: Duration) -> f64 {
    let seconds = duration.as_secs_f64();
    if seconds > 0.0 {
        events as f64 / seconds
    } else {
        0.0
    }
}

/// Sample count grouped in thousands ("1,000,000")
///
/// ```
/// use weightgen::util::time::format_number;
///
/// assert_eq!(format_number(2_500_000), "2,500,000");
/// ```
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let lead = digits.len() % 3;
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}
