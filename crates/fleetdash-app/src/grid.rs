//! Machine grid view model for one category

use fleetdash_core::{MachineRoster, MachineSummary, Severity};

/// One reading in a grid cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub value: Option<f64>,
    pub severity: Severity,
}

impl Reading {
    fn percent(value: Option<f64>) -> Self {
        Self {
            value,
            severity: Severity::from_optional(value),
        }
    }

    /// Load averages are not percentages and stay `Normal`.
    fn load(value: Option<f64>) -> Self {
        Self {
            value,
            severity: Severity::Normal,
        }
    }
}

/// Stats shown in a cell when the machine reported valid stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStats {
    pub cpu_load: Reading,
    pub ram_percent: Reading,
    pub disk_percent: Reading,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub name: String,
    pub online: bool,
    /// `None` when the machine reported invalid stats
    pub stats: Option<CellStats>,
}

impl GridCell {
    fn from_summary(summary: &MachineSummary) -> Self {
        let stats = summary.stats.valid().map(|stats| CellStats {
            cpu_load: Reading::load(stats.cpu_one_minute()),
            ram_percent: Reading::percent(stats.ram_percent()),
            disk_percent: Reading::percent(stats.disk_percent()),
        });
        Self {
            name: summary.name.clone(),
            online: summary.online,
            stats,
        }
    }
}

/// The rendered grid: one category of one roster snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridView {
    pub category: String,
    /// Name order
    pub cells: Vec<GridCell>,
    pub online_count: usize,
    pub total_count: usize,
}

impl GridView {
    pub fn build(roster: &MachineRoster, category: &str) -> Self {
        let cells: Vec<GridCell> = roster
            .in_category(category)
            .map(GridCell::from_summary)
            .collect();
        let online_count = cells.iter().filter(|c| c.online).count();
        Self {
            category: category.to_string(),
            total_count: cells.len(),
            online_count,
            cells,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.cells.iter().position(|c| c.name == name)
    }
}
