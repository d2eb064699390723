//! Action handlers: UpdateAction dispatch and background fetch tasks
//!
//! Each fetch runs on its own task and posts its result back as a message;
//! state is only ever touched by `update()`.

use std::sync::Arc;

use chrono::{Local, Utc};
use fleetdash_api::TelemetrySource;
use fleetdash_core::prelude::*;
use tokio::sync::mpsc;

use crate::handler::UpdateAction;
use crate::message::Message;

/// Execute an action by spawning a background task
pub fn handle_action<C>(action: UpdateAction, client: Arc<C>, msg_tx: mpsc::Sender<Message>)
where
    C: TelemetrySource + Sync + 'static,
{
    match action {
        UpdateAction::FetchRoster { seq } => {
            tokio::spawn(async move {
                let result = client.fetch_roster().await;
                let msg = Message::RosterLoaded {
                    seq,
                    result,
                    received_at: Local::now(),
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::FetchMachineDetail { seq, name } => {
            tokio::spawn(async move {
                let result = client.fetch_machine_detail(&name).await;
                let msg = Message::DetailLoaded {
                    seq,
                    name,
                    result,
                    fetched_at: unix_now(),
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::FetchServerSummary => {
            tokio::spawn(async move {
                let result = client.fetch_server_summary().await;
                send(&msg_tx, Message::ServerSummaryLoaded(result)).await;
            });
        }
    }
}

async fn send(msg_tx: &mpsc::Sender<Message>, msg: Message) {
    if msg_tx.send(msg).await.is_err() {
        debug!("Engine gone, dropping fetch result");
    }
}

/// Current time as fractional unix seconds
fn unix_now() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}
