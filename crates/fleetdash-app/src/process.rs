//! Message processing
//!
//! Runs a message through `update()`, follows up on returned messages, and
//! hands every returned action to the action layer.

use std::sync::Arc;

use fleetdash_api::TelemetrySource;
use tokio::sync::mpsc;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<C>(
    state: &mut AppState,
    message: Message,
    client: &Arc<C>,
    msg_tx: &mpsc::Sender<Message>,
) where
    C: TelemetrySource + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, client.clone(), msg_tx.clone());
        }

        msg = result.message;
    }
}
