//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `dashboard`: Roster refresh, category selection and grid cursor
//! - `modal`: Detail modal open/refresh/close and panel toggles
//! - `keys`: Key event handlers for dashboard and modal

pub(crate) mod dashboard;
pub(crate) mod keys;
pub(crate) mod modal;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use crate::message::Message;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// Fetch the full roster; the result is tagged with `seq`
    FetchRoster { seq: u64 },

    /// Fetch one machine's detail; the result is tagged with `seq`
    FetchMachineDetail { seq: u64, name: String },

    /// Fetch the server summary for the header
    FetchServerSummary,
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    pub fn with_message(mut self, msg: Message) -> Self {
        self.message = Some(msg);
        self
    }
}

impl From<UpdateAction> for UpdateResult {
    fn from(action: UpdateAction) -> Self {
        Self::action(action)
    }
}

impl From<Option<UpdateAction>> for UpdateResult {
    fn from(action: Option<UpdateAction>) -> Self {
        Self {
            message: None,
            action,
        }
    }
}
