//! Engine - shared orchestration core for the dashboard
//!
//! Owns the application state, the message channel, the refresh timer and
//! the shutdown signal. Front ends feed it messages and render from
//! `engine.state`.

use std::sync::Arc;
use std::time::Duration;

use fleetdash_api::TelemetrySource;
use fleetdash_core::prelude::*;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use url::Url;

use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::plugins::PluginRegistry;
use crate::process;
use crate::signals;
use crate::state::{AppState, DashboardPhase};
use crate::url_state::Location;

/// Message channel capacity
const CHANNEL_CAPACITY: usize = 256;

/// How long shutdown waits for a background task
const TASK_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// What subscribers can observe between two processing cycles
#[derive(Debug, Clone)]
struct StateSnapshot {
    href: Url,
    phase: DashboardPhase,
    last_applied: u64,
    open_machine: Option<String>,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        Self {
            href: state.href(),
            phase: state.dashboard.phase,
            last_applied: state.dashboard.last_applied_seq(),
            open_machine: state.modal.open.as_ref().map(|m| m.name.clone()),
        }
    }
}

pub struct Engine<C> {
    /// Application state (the TEA model)
    pub state: AppState,

    /// Sender for messages into the loop
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver for messages; the front end drains it
    pub msg_rx: mpsc::Receiver<Message>,

    pub shutdown_tx: watch::Sender<bool>,

    pub shutdown_rx: watch::Receiver<bool>,

    client: Arc<C>,

    event_tx: broadcast::Sender<EngineEvent>,

    background: Vec<JoinHandle<()>>,
}

impl<C> Engine<C>
where
    C: TelemetrySource + Sync + 'static,
{
    pub fn new(
        settings: Settings,
        location: Box<dyn Location>,
        client: C,
        registry: Arc<PluginRegistry>,
    ) -> Self {
        let state = AppState::new(settings, location, registry);
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (event_tx, _) = broadcast::channel(CHANNEL_CAPACITY);

        Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            client: Arc::new(client),
            event_tx,
            background: Vec::new(),
        }
    }

    /// Kick off the initial load and the periodic refresh timer.
    pub fn start(&mut self) {
        let interval = self.state.settings.dashboard.refresh_interval();
        info!("Refreshing every {:?}", interval);
        self.background.push(spawn_refresh_timer(
            interval,
            self.msg_tx.clone(),
            self.shutdown_rx.clone(),
        ));
        self.process_message(Message::Start);
    }

    /// Route SIGINT/SIGTERM into a `Quit` message.
    pub fn install_signal_handler(&self) {
        signals::spawn_signal_handler(self.msg_tx.clone());
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update loop.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);
        process::process_message(&mut self.state, msg, &self.client, &self.msg_tx);
        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Process everything already queued. Returns the number processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message and process it. `false` once every sender
    /// is gone.
    pub async fn recv_and_process(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.process_message(msg);
                true
            }
            None => false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// The location as it stands now; start again from it to restore the view.
    pub fn current_url(&self) -> Url {
        self.state.href()
    }

    pub async fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);
        let _ = self.shutdown_tx.send(true);

        for handle in self.background.drain(..) {
            match tokio::time::timeout(TASK_SHUTDOWN_TIMEOUT, handle).await {
                Ok(Ok(())) => debug!("Background task stopped"),
                Ok(Err(e)) => warn!("Background task panicked: {}", e),
                Err(_) => warn!("Background task shutdown timed out"),
            }
        }
        info!("Engine stopped at {}", self.state.href());
    }

    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if pre.href != post.href {
            self.emit(EngineEvent::LocationChanged {
                href: post.href.clone(),
            });
        }

        if pre.phase != post.phase {
            self.emit(EngineEvent::DashboardPhaseChanged {
                old_phase: pre.phase,
                new_phase: post.phase,
            });
        }

        if post.last_applied > pre.last_applied {
            self.emit(EngineEvent::RosterApplied {
                seq: post.last_applied,
            });
        }

        if pre.open_machine != post.open_machine {
            match &post.open_machine {
                Some(name) => self.emit(EngineEvent::ModalOpened { name: name.clone() }),
                None => self.emit(EngineEvent::ModalClosed),
            }
        }
    }

    fn emit(&self, event: EngineEvent) {
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }
}

/// Send `RefreshTick` every `period` until shutdown. Missed ticks are
/// skipped, not bunched up.
fn spawn_refresh_timer(
    period: Duration,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; the initial load covers it
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if msg_tx.send(Message::RefreshTick).await.is_err() {
                        break;
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }
        debug!("Refresh timer stopped");
    })
}
