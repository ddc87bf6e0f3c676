use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::api::{GameDataSource, GatewayError};
use crate::models::{OverlayState, ViewModel};
use crate::transform::{transform, validate_snapshot, ValidationError};

/// Why a poll cycle did not produce a view model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PollError {
    #[error(transparent)]
    Connection(#[from] GatewayError),

    #[error("invalid snapshot: {0}")]
    InvalidData(#[from] ValidationError),

    #[error("poll task failed: {0}")]
    TaskFailed(String),
}

impl PollError {
    /// Message shown to the user in place of the overlay
    pub fn user_message(&self) -> &'static str {
        match self {
            PollError::InvalidData(_) => "Received invalid data from League client",
            PollError::Connection(_) | PollError::TaskFailed(_) => {
                "Unable to connect to League of Legends client"
            }
        }
    }
}

/// Errors returned by [`PollHandle`] operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    #[error("polling interval must be greater than zero")]
    ZeroInterval,

    #[error("poll controller has stopped")]
    Stopped,
}

#[derive(Debug)]
enum PollCommand {
    Refresh,
    SetInterval(Duration),
    Shutdown,
}

/// Control surface for a running [`PollController`]
#[derive(Clone)]
pub struct PollHandle {
    commands: mpsc::Sender<PollCommand>,
    state: watch::Receiver<OverlayState>,
}

impl PollHandle {
    /// Run one poll now, outside the schedule
    pub async fn refresh(&self) -> Result<(), ControlError> {
        self.send(PollCommand::Refresh).await
    }

    /// Change the cadence; the pending tick is cancelled and rescheduled
    pub async fn set_polling_interval(&self, interval: Duration) -> Result<(), ControlError> {
        if interval.is_zero() {
            return Err(ControlError::ZeroInterval);
        }
        self.send(PollCommand::SetInterval(interval)).await
    }

    /// Stop the controller; an in-flight poll finishes but is not published
    pub async fn shutdown(&self) -> Result<(), ControlError> {
        self.send(PollCommand::Shutdown).await
    }

    /// Latest published state
    pub fn state(&self) -> OverlayState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<OverlayState> {
        self.state.clone()
    }

    async fn send(&self, command: PollCommand) -> Result<(), ControlError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| ControlError::Stopped)
    }
}

/// A poll running on its own task, tagged with the epoch it started in
struct PendingPoll {
    epoch: u64,
    task: JoinHandle<Result<Value, GatewayError>>,
}

/// Drives fetch -> validate -> transform -> publish on a fixed cadence.
///
/// At most one poll is in flight. A tick that comes due while a poll is
/// running waits for it; a refresh that arrives mid-poll queues one more poll
/// to start as soon as it settles. Changing the cadence bumps the epoch so a poll that
/// started earlier cannot publish over newer state; on shutdown an in-flight
/// poll is left to finish on its own and its result is dropped.
pub struct PollController<S: GameDataSource> {
    source: Arc<S>,
    interval: Duration,
    epoch: u64,
    commands: mpsc::Receiver<PollCommand>,
    state_tx: watch::Sender<OverlayState>,
}

impl<S: GameDataSource> PollController<S> {
    /// Create a new controller and the handle used to drive it
    pub fn new(source: S, interval: Duration) -> (Self, PollHandle) {
        let (command_tx, command_rx) = mpsc::channel(16);
        let (state_tx, state_rx) = watch::channel(OverlayState::default());

        let controller = Self {
            source: Arc::new(source),
            interval,
            epoch: 0,
            commands: command_rx,
            state_tx,
        };
        let handle = PollHandle {
            commands: command_tx,
            state: state_rx,
        };

        (controller, handle)
    }

    /// Run the controller loop until shutdown or until every handle is dropped
    pub async fn run(mut self) {
        info!("Poll controller started (interval: {:?})", self.interval);

        // First poll runs immediately
        let mut next_tick = Instant::now();
        let mut in_flight: Option<PendingPoll> = None;
        let mut refresh_queued = false;

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(PollCommand::Refresh) => {
                        if in_flight.is_some() {
                            debug!("Refresh requested while a poll is in flight, queued");
                            refresh_queued = true;
                        } else {
                            in_flight = Some(self.start_poll());
                        }
                    }
                    Some(PollCommand::SetInterval(interval)) => {
                        info!("Polling interval changed: {:?} -> {:?}", self.interval, interval);
                        self.interval = interval;
                        self.epoch += 1;
                        next_tick = Instant::now() + interval;
                    }
                    Some(PollCommand::Shutdown) | None => break,
                },
                _ = time::sleep_until(next_tick), if in_flight.is_none() => {
                    in_flight = Some(self.start_poll());
                    next_tick = Instant::now() + self.interval;
                }
                (epoch, outcome) = settle(&mut in_flight) => {
                    in_flight = None;
                    self.finish_poll(epoch, outcome);
                    if refresh_queued {
                        refresh_queued = false;
                        in_flight = Some(self.start_poll());
                    }
                }
            }
        }

        if in_flight.is_some() {
            debug!("Leaving in-flight poll to finish unobserved");
        }
        info!("Poll controller stopped");
    }

    fn start_poll(&self) -> PendingPoll {
        self.state_tx.send_modify(|state| state.loading = true);

        let source = Arc::clone(&self.source);
        PendingPoll {
            epoch: self.epoch,
            task: tokio::spawn(async move { source.fetch_snapshot().await }),
        }
    }

    fn finish_poll(&self, epoch: u64, outcome: Result<Result<Value, GatewayError>, JoinError>) {
        if epoch != self.epoch {
            debug!("Discarding poll result from superseded cycle {}", epoch);
            self.state_tx.send_if_modified(|state| {
                let was_loading = state.loading;
                state.loading = false;
                was_loading
            });
            return;
        }

        let result = match outcome {
            Ok(fetched) => fetched.map_err(PollError::from).and_then(|value| {
                let snapshot = validate_snapshot(&value)?;
                Ok(transform(&snapshot))
            }),
            Err(e) => Err(PollError::TaskFailed(e.to_string())),
        };

        self.publish(result);
    }

    fn publish(&self, result: Result<ViewModel, PollError>) {
        self.state_tx.send_modify(|state| {
            state.loading = false;

            match result {
                Ok(view) => {
                    if !state.is_in_game {
                        info!("Connected to live client, match in progress");
                    }
                    state.game_data = Some(Arc::new(view));
                    state.error = None;
                    state.is_in_game = true;
                    state.last_refresh = Some(Utc::now());
                }
                Err(err) => {
                    if state.is_in_game {
                        warn!("Lost live client data: {}", err);
                    } else {
                        debug!("Poll failed: {}", err);
                    }
                    if matches!(err, PollError::InvalidData(_)) {
                        state.last_refresh = Some(Utc::now());
                    }
                    state.error = Some(err.user_message().to_string());
                    state.is_in_game = false;
                }
            }
        });
    }
}

/// Resolve when the in-flight poll completes; pending forever when idle
async fn settle(
    in_flight: &mut Option<PendingPoll>,
) -> (u64, Result<Result<Value, GatewayError>, JoinError>) {
    match in_flight {
        Some(pending) => (pending.epoch, (&mut pending.task).await),
        None => std::future::pending().await,
    }
}
