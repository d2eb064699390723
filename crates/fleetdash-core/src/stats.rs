//! Usage percentages and the two-tier severity policy

/// Usage at or above this percentage is a warning
pub const WARNING_PERCENT: f64 = 50.0;

/// Usage at or above this percentage is dangerous
pub const DANGER_PERCENT: f64 = 85.0;

/// Display severity of a usage reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub enum Severity {
    #[default]
    Normal,
    Warning,
    Danger,
}

impl Severity {
    /// Classify an already-rounded percentage.
    pub fn from_percent(percent: f64) -> Self {
        if percent >= DANGER_PERCENT {
            Severity::Danger
        } else if percent >= WARNING_PERCENT {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }

    /// Classify an optional percentage; unknown readings are `Normal`.
    pub fn from_optional(percent: Option<f64>) -> Self {
        percent.map(Self::from_percent).unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

/// Round to one decimal place (half away from zero).
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `used / total * 100`, rounded to one decimal.
///
/// Returns `None` when either side is unknown or `total` is zero.
pub fn percent_used(used: Option<u64>, total: Option<u64>) -> Option<f64> {
    let used = used?;
    let total = total?;
    if total == 0 {
        return None;
    }
    Some(round_one_decimal(used as f64 / total as f64 * 100.0))
}
