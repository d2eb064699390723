//! Built-in stats panel, shown for every machine

use fleetdash_core::{
    format_bytes, format_duration, MachineStats, Severity, StatsReport, Throughput, Usage,
};

use crate::panel::{PanelContent, PanelField};

const UNKNOWN: &str = fleetdash_core::format::UNKNOWN;
const TITLE: &str = "Basic stats";

/// Render the stats panel; `now` is the unix time used for uptime.
pub fn basic_stats_panel(stats: &StatsReport, now: f64) -> PanelContent {
    match stats.valid() {
        Some(stats) => valid_panel(stats, now),
        None => PanelContent::new(TITLE).section(
            "Stats",
            vec![PanelField::note("Machine has invalid stats.")],
        ),
    }
}

fn valid_panel(stats: &MachineStats, now: f64) -> PanelContent {
    let cpu = stats.cpu.clone().unwrap_or_default();
    let internet = stats.internet.clone().unwrap_or_default();

    PanelContent::new(TITLE)
        .section(
            "CPU load",
            vec![
                PanelField::new("1m", load(cpu.one)),
                PanelField::new("5m", load(cpu.five)),
                PanelField::new("15m", load(cpu.fifteen)),
            ],
        )
        .section(
            "Usage",
            vec![
                usage_field("RAM", stats.ram.as_ref()),
                usage_field("Disk", stats.disk.as_ref()),
            ],
        )
        .section(
            "Network",
            vec![
                throughput_field("Now in", internet.current.as_ref(), |t| t.incoming),
                throughput_field("Now out", internet.current.as_ref(), |t| t.outgoing),
                throughput_field("5m in", internet.five_minutes.as_ref(), |t| t.incoming),
                throughput_field("5m out", internet.five_minutes.as_ref(), |t| t.outgoing),
            ],
        )
        .section(
            "System",
            vec![PanelField::new(
                "Uptime",
                stats
                    .uptime_secs(now)
                    .map(|s| format_duration(s, 0))
                    .unwrap_or_else(|| UNKNOWN.to_string()),
            )],
        )
}

fn load(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn usage_field(label: &str, usage: Option<&Usage>) -> PanelField {
    let Some(usage) = usage else {
        return PanelField::new(label, UNKNOWN);
    };
    let percent = usage.percent();
    let value = match percent {
        Some(p) => format!("{p:.1}%"),
        None => UNKNOWN.to_string(),
    };
    let field = PanelField::new(label, value).with_severity(Severity::from_optional(percent));
    match (usage.used, usage.total) {
        (Some(used), Some(total)) => field.with_hint(format!(
            "{} / {}",
            format_bytes(used as f64, 1),
            format_bytes(total as f64, 1)
        )),
        _ => field,
    }
}

fn throughput_field(
    label: &str,
    throughput: Option<&Throughput>,
    pick: impl Fn(&Throughput) -> Option<f64>,
) -> PanelField {
    let value = throughput
        .and_then(pick)
        .map(|bytes| format!("{}/s", format_bytes(bytes, 1)))
        .unwrap_or_else(|| UNKNOWN.to_string());
    PanelField::new(label, value)
}
