//! Panel model shown inside the detail modal

use fleetdash_core::Severity;

/// Key of the built-in stats panel; always first in the modal
pub const BASIC_STATS_KEY: &str = "basicstats";

/// One labelled value
#[derive(Debug, Clone, PartialEq)]
pub struct PanelField {
    pub label: String,
    pub value: String,
    /// Extra detail, e.g. an exact count behind a rounded value
    pub hint: Option<String>,
    pub severity: Severity,
}

impl PanelField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            hint: None,
            severity: Severity::Normal,
        }
    }

    /// A full-width message with no label
    pub fn note(message: impl Into<String>) -> Self {
        Self::new("", message)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelSection {
    pub heading: String,
    pub fields: Vec<PanelField>,
}

impl PanelSection {
    pub fn new(heading: impl Into<String>, fields: Vec<PanelField>) -> Self {
        Self {
            heading: heading.into(),
            fields,
        }
    }
}

/// What a plugin (or the built-in stats) renders
#[derive(Debug, Clone, PartialEq)]
pub struct PanelContent {
    pub title: String,
    pub sections: Vec<PanelSection>,
}

impl PanelContent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn section(mut self, heading: impl Into<String>, fields: Vec<PanelField>) -> Self {
        self.sections.push(PanelSection::new(heading, fields));
        self
    }

    /// Look up a field by section heading and label.
    pub fn field(&self, heading: &str, label: &str) -> Option<&PanelField> {
        self.sections
            .iter()
            .filter(|s| s.heading == heading)
            .flat_map(|s| s.fields.iter())
            .find(|f| f.label == label)
    }
}

/// A panel owned by the open modal
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Panel key; also its member name in the URL's `mt` set
    pub id: String,
    pub content: PanelContent,
    pub visible: bool,
}
