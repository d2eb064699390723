//! xmrig mining-worker panel

use fleetdash_core::prelude::*;
use fleetdash_core::{
    format_duration, format_hashes_per_second, format_human, ExtraPayload, Extras, XmrigReport,
    XmrigStatus, XMRIG_KEY,
};

use super::TelemetryPlugin;
use crate::panel::{PanelContent, PanelField};

const UNKNOWN: &str = fleetdash_core::format::UNKNOWN;
const TITLE: &str = "XMRig";

#[derive(Debug, Default, Clone, Copy)]
pub struct XmrigPlugin;

impl TelemetryPlugin for XmrigPlugin {
    fn key(&self) -> &str {
        XMRIG_KEY
    }

    fn render(&self, extras: &Extras) -> Result<Option<PanelContent>> {
        match extras.payload(XMRIG_KEY).transpose()? {
            None => Ok(None),
            Some(ExtraPayload::Xmrig(XmrigStatus::Report(report))) => Ok(Some(report_panel(&report))),
            Some(ExtraPayload::Xmrig(XmrigStatus::Failed)) => Ok(Some(
                PanelContent::new(TITLE).section(
                    "Status",
                    vec![PanelField::note("The monitoring client could not reach xmrig.")],
                ),
            )),
            Some(ExtraPayload::Unknown { key }) => Err(Error::plugin(
                XMRIG_KEY,
                format!("payload decoded as unknown key '{key}'"),
            )),
        }
    }
}

fn report_panel(report: &XmrigReport) -> PanelContent {
    let hashrate = &report.hashrate;
    let shares = &report.shares;

    let percent = shares
        .percent_good()
        .map(|p| format!("{p:.1}%"))
        .unwrap_or_else(|| UNKNOWN.to_string());

    let total_hashes = match shares.hashes_total {
        Some(total) => PanelField::new("Total hashes", format_human(total)).with_hint(total.to_string()),
        None => PanelField::new("Total hashes", UNKNOWN),
    };

    PanelContent::new(TITLE)
        .section(
            "Hashrate",
            vec![
                PanelField::new("Now", format_hashes_per_second(hashrate.current)),
                PanelField::new("1m", format_hashes_per_second(hashrate.one_minute)),
                PanelField::new("15m", format_hashes_per_second(hashrate.fifteen_minutes)),
            ],
        )
        .section(
            "Details",
            vec![
                PanelField::new("Worker ID", text_or_unknown(report.worker_id.as_deref())),
                PanelField::new(
                    "Uptime",
                    report
                        .uptime
                        .map(|s| format_duration(s, 0))
                        .unwrap_or_else(|| UNKNOWN.to_string()),
                ),
                PanelField::new("Version", text_or_unknown(report.version.as_deref())),
            ],
        )
        .section(
            "Shares",
            vec![
                PanelField::new("Total", count_or_unknown(shares.total)),
                PanelField::new("Percent", percent).with_hint("Percent of good shares"),
                PanelField::new("Good", count_or_unknown(shares.good)),
                PanelField::new("Bad", count_or_unknown(shares.bad())),
            ],
        )
        .section(
            "Extended",
            vec![
                PanelField::new(
                    "Avg time",
                    shares
                        .avg_time_ms
                        .map(|ms| format_duration(ms / 1000.0, 2))
                        .unwrap_or_else(|| UNKNOWN.to_string()),
                )
                .with_hint("Average time between share submissions"),
                total_hashes,
            ],
        )
}

fn text_or_unknown(value: Option<&str>) -> String {
    value.unwrap_or(UNKNOWN).to_string()
}

fn count_or_unknown(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| UNKNOWN.to_string())
}
