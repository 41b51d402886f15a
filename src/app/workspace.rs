use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::kernel::services::adapters::{AppMessage, AsyncRuntime, MockBackend};
use crate::kernel::services::ports::{ProjectBackend, Settings};
use crate::kernel::{
    dispatch_editor, Action, AppState, EditorMount, Effect, ExplorerSection, Store,
};

use super::bridge::message_to_action;

/// Upper bound on messages handled per `pump`, so a busy backend cannot starve the caller.
const MAX_MESSAGES_PER_PUMP: usize = 256;

/// The workspace shell: owns the store, runs its effects and feeds results back.
pub struct Workspace {
    store: Store,
    runtime: AsyncRuntime,
    rx: Receiver<AppMessage>,
    in_flight: usize,
    log_feed: Option<Receiver<String>>,
}

impl Workspace {
    pub fn new(settings: &Settings, backend: Arc<dyn ProjectBackend>) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let runtime = AsyncRuntime::new(tx, backend)?;
        Ok(Self {
            store: Store::new(AppState::new(settings)),
            runtime,
            rx,
            in_flight: 0,
            log_feed: None,
        })
    }

    /// A shell backed by the in-memory mock, seeded according to `settings`.
    pub fn with_mock_backend(settings: &Settings) -> io::Result<(Self, Arc<MockBackend>)> {
        let latency = Duration::from_millis(settings.backend.latency_ms);
        let backend = Arc::new(if settings.backend.seed_demo_project {
            MockBackend::with_demo_project(latency)
        } else {
            MockBackend::new(latency)
        });
        let workspace = Self::new(settings, backend.clone())?;
        Ok((workspace, backend))
    }

    /// Requests the initial load of every root.
    pub fn boot(&mut self) -> bool {
        tracing::info!("workspace boot");
        self.dispatch(Action::RefreshAll)
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn sections(&self) -> Vec<ExplorerSection> {
        let state = self.store.state();
        state.explorer.sections(&state.tree)
    }

    pub fn editor(&self) -> EditorMount {
        dispatch_editor(self.store.state().tabs.active_tab())
    }

    /// Backend calls started and not yet answered.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }

    pub fn dispatch(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.run_effect(effect);
        }
        result.state_changed
    }

    fn run_effect(&mut self, effect: Effect) {
        self.in_flight += 1;
        self.runtime.execute(effect);
    }

    pub fn handle_message(&mut self, msg: AppMessage) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.dispatch(message_to_action(msg))
    }

    /// Lines received on `feed` show up in the bottom panel on every pump.
    pub fn attach_log_feed(&mut self, feed: Receiver<String>) {
        self.log_feed = Some(feed);
    }

    fn drain_log_feed(&mut self) -> bool {
        let Some(feed) = &self.log_feed else {
            return false;
        };
        let lines: Vec<String> = feed.try_iter().take(MAX_MESSAGES_PER_PUMP).collect();
        if lines.is_empty() {
            return false;
        }
        self.dispatch(Action::AppendLog { lines })
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.dispatch(Action::Tick { now })
    }

    /// Handles whatever results are ready without blocking.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        for _ in 0..MAX_MESSAGES_PER_PUMP {
            match self.rx.try_recv() {
                Ok(msg) => changed |= self.handle_message(msg),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::error!("runtime channel disconnected");
                    break;
                }
            }
        }
        changed |= self.drain_log_feed();
        changed |= self.tick(Instant::now());
        changed
    }

    /// Blocks until no backend call is outstanding. Returns false on timeout.
    pub fn run_until_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                tracing::warn!(in_flight = self.in_flight, "run_until_idle timed out");
                return false;
            }
            match self.rx.recv_timeout(remaining) {
                Ok(msg) => {
                    self.handle_message(msg);
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::error!("runtime channel disconnected");
                    return false;
                }
            }
        }
        self.drain_log_feed();
        self.tick(Instant::now());
        true
    }
}
