//! Human-readable formatting for telemetry values

const BYTE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
const HASH_UNITS: [&str; 5] = ["H/s", "kH/s", "MH/s", "GH/s", "TH/s"];
const HUMAN_SUFFIXES: [&str; 5] = ["", "K", "M", "B", "T"];

/// Placeholder shown for a reading the machine did not report
pub const UNKNOWN: &str = "-";

/// Format a byte count with binary (1024) steps, e.g. `1.5 GB`.
pub fn format_bytes(bytes: f64, decimals: usize) -> String {
    if !bytes.is_finite() || bytes <= 0.0 {
        return "0 B".to_string();
    }
    let mut value = bytes;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", value.round())
    } else {
        format!("{:.*} {}", decimals, value, BYTE_UNITS[unit])
    }
}

/// Format a hashrate with decimal (1000) steps, e.g. `1.23 kH/s`.
pub fn format_hashes_per_second(rate: Option<f64>) -> String {
    let Some(rate) = rate.filter(|r| r.is_finite() && *r >= 0.0) else {
        return UNKNOWN.to_string();
    };
    let mut value = rate;
    let mut unit = 0;
    while value >= 1000.0 && unit < HASH_UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }
    format!("{:.2} {}", value, HASH_UNITS[unit])
}

/// Format a count with K/M/B/T suffixes, e.g. `4.2M`.
pub fn format_human(count: u64) -> String {
    let mut value = count as f64;
    let mut idx = 0;
    while value >= 1000.0 && idx < HUMAN_SUFFIXES.len() - 1 {
        value /= 1000.0;
        idx += 1;
    }
    if idx == 0 {
        count.to_string()
    } else {
        format!("{:.1}{}", value, HUMAN_SUFFIXES[idx])
    }
}

/// Format a span of seconds as `1d 2h 3m 4s`.
///
/// Leading zero components are dropped; the seconds component keeps
/// `decimals` fractional digits.
pub fn format_duration(seconds: f64, decimals: usize) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return UNKNOWN.to_string();
    }
    let whole = seconds.trunc() as u64;
    let days = whole / 86_400;
    let hours = (whole % 86_400) / 3_600;
    let minutes = (whole % 3_600) / 60;
    let secs = seconds - (whole - whole % 60) as f64;

    let mut parts = Vec::with_capacity(4);
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if days > 0 || hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if days > 0 || hours > 0 || minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    parts.push(format!("{:.*}s", decimals, secs));
    parts.join(" ")
}
