use crate::client::TelemetryClient;
use crate::errors::{Result, FETCH_FAILED};
use crate::metrics::{
    DEVICES, DISCARDED_FETCHES_TOTAL, FETCH_FAILURES_TOTAL, FETCH_LATENCY_SECONDS, FETCH_TOTAL,
};
use crate::model::DeviceTelemetry;
use crate::state::DashboardState;
use chrono::Utc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Periodically fetches telemetry snapshots and publishes dashboard state.
///
/// The poller is the single writer of the state channel. Each update is a
/// full replacement, so readers holding a `watch::Receiver` always see a
/// consistent snapshot.
pub struct Poller {
    client: TelemetryClient,
    period: Duration,
    tx: watch::Sender<DashboardState>,
}

/// Cancellation handle returned by [`Poller::start`]
pub struct PollerHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl Poller {
    pub fn new(client: TelemetryClient, period: Duration) -> Self {
        let (tx, _rx) = watch::channel(DashboardState::default());
        Self { client, period, tx }
    }

    /// Read-only view of the published state
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.tx.subscribe()
    }

    /// Fetches immediately, then once per period until stopped
    pub fn start(self) -> PollerHandle {
        let token = CancellationToken::new();
        let task_token = token.clone();

        info!(
            "Starting poller for {} every {:?}",
            self.client.url(),
            self.period
        );

        let task = tokio::spawn(async move {
            self.run(task_token).await;
        });

        PollerHandle { token, task }
    }

    async fn run(self, token: CancellationToken) {
        let mut ticker = interval(self.period);
        // A slow fetch must not be followed by a burst of catch-up fetches
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            // The in-flight fetch is never aborted; stop only affects
            // whether its result is published.
            let result = self.fetch().await;

            if token.is_cancelled() {
                DISCARDED_FETCHES_TOTAL.inc();
                debug!("Poller stopped during fetch, discarding result");
                break;
            }

            self.publish(result);
        }

        info!("Poller stopped");
    }

    async fn fetch(&self) -> Result<Vec<DeviceTelemetry>> {
        FETCH_TOTAL.inc();
        let start = Instant::now();

        let result = self.client.fetch_all().await;

        FETCH_LATENCY_SECONDS.observe(start.elapsed().as_secs_f64());
        result
    }

    fn publish(&self, result: Result<Vec<DeviceTelemetry>>) {
        let next = {
            let current = self.tx.borrow();
            match result {
                Ok(devices) => {
                    debug!("Received snapshot of {} devices", devices.len());
                    DEVICES.set(devices.len() as f64);
                    current.apply_success(devices, Utc::now())
                }
                Err(e) => {
                    FETCH_FAILURES_TOTAL.inc();
                    error!("Error fetching device data: {}", e);
                    current.apply_failure(FETCH_FAILED)
                }
            }
        };

        self.tx.send_replace(next);
    }
}

impl PollerHandle {
    /// Cancels future fetches. A fetch already in flight runs to completion
    /// and its result is dropped.
    pub fn stop(&self) {
        self.token.cancel();
    }

    /// Stops the poller and waits for the task to exit
    pub async fn shutdown(self) {
        self.stop();
        if let Err(e) = self.task.await {
            error!("Poller task failed: {}", e);
        }
    }
}
