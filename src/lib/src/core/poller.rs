//! Status poller
//!
//! One spawned task owns the countdown, every timer and every in-flight fetch.
//! Cancelling the task (through [`PollerHandle::shutdown`] or by dropping the
//! handle) stops all of them at once.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use crate::api;
use crate::config::ClientConfig;
use crate::core::countdown::{Countdown, CountdownState, ReconcileOutcome};
use crate::error::AutoCommitError;
use crate::model::AutomationStatus;
use crate::opts::PollOpts;

/// Where the poller gets its automation status from
#[async_trait]
pub trait StatusSource: Send + Sync + 'static {
    async fn fetch_status(&self) -> Result<AutomationStatus, AutoCommitError>;
}

/// `GET /github/status` on the configured backend
pub struct RemoteStatusSource {
    config: ClientConfig,
}

impl RemoteStatusSource {
    pub fn new(config: ClientConfig) -> RemoteStatusSource {
        RemoteStatusSource { config }
    }
}

#[async_trait]
impl StatusSource for RemoteStatusSource {
    async fn fetch_status(&self) -> Result<AutomationStatus, AutoCommitError> {
        api::client::status::get(&self.config).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollerEvent {
    /// A full refresh finished
    Status {
        status: AutomationStatus,
        state: CountdownState,
    },
    /// Seconds remaining after a tick
    Tick(u64),
    CommitInProgress,
    /// The backend confirmed the commit and has another one scheduled
    Rescheduled {
        status: AutomationStatus,
        seconds: u64,
    },
    NoMoreCommits(AutomationStatus),
    /// Reconciling failed or ran out of time, everything is being reloaded
    ForcedRefresh,
    /// A full refresh failed. Nothing is retried until [`PollerHandle::refresh`].
    FetchFailed(String),
}

#[derive(Debug)]
enum Command {
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    Full,
    Reconcile,
}

type FetchResult = (u64, FetchKind, Result<AutomationStatus, AutoCommitError>);

pub struct PollerHandle {
    cancel: CancellationToken,
    commands: mpsc::UnboundedSender<Command>,
    events: mpsc::UnboundedReceiver<PollerEvent>,
    task: Option<JoinHandle<()>>,
}

/// Starts polling with a full refresh
pub fn spawn<S: StatusSource>(source: S, opts: PollOpts) -> PollerHandle {
    let cancel = CancellationToken::new();
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let poller = Poller {
        source: Arc::new(source),
        opts,
        cancel: cancel.clone(),
        events: event_tx,
        countdown: Countdown::new(),
        generation: 0,
        fetches: JoinSet::new(),
        next_tick: None,
        next_reconcile: None,
        ceiling: None,
    };
    let task = tokio::spawn(poller.run(command_rx));

    PollerHandle {
        cancel,
        commands: command_tx,
        events: event_rx,
        task: Some(task),
    }
}

impl PollerHandle {
    /// Replaces the status with a fresh one, cancelling every pending timer
    pub fn refresh(&self) {
        if self.commands.send(Command::Refresh).is_err() {
            log::debug!("poller already stopped, ignoring refresh");
        }
    }

    /// Next event, or `None` once the poller has been shut down
    pub async fn next_event(&mut self) -> Option<PollerEvent> {
        if self.cancel.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            event = self.events.recv() => event,
        }
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Cancels the poller and waits for its task to exit
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        self.events.close();
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                log::error!("poller task failed: {err}");
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct Poller<S: StatusSource> {
    source: Arc<S>,
    opts: PollOpts,
    cancel: CancellationToken,
    events: mpsc::UnboundedSender<PollerEvent>,
    countdown: Countdown,
    // Bumped whenever results from earlier fetches must be ignored
    generation: u64,
    fetches: JoinSet<FetchResult>,
    next_tick: Option<Instant>,
    next_reconcile: Option<Instant>,
    ceiling: Option<Instant>,
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

impl<S: StatusSource> Poller<S> {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        self.full_refresh();

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                Some(command) = commands.recv() => match command {
                    Command::Refresh => self.full_refresh(),
                },
                Some(joined) = self.fetches.join_next(), if !self.fetches.is_empty() => {
                    self.on_fetch(joined)
                }
                _ = sleep_until(self.ceiling) => self.on_ceiling(),
                _ = sleep_until(self.next_reconcile) => self.on_reconcile_poll(),
                _ = sleep_until(self.next_tick) => self.on_tick(),
            }
        }

        self.fetches.abort_all();
        log::debug!("poller stopped");
    }

    fn emit(&self, event: PollerEvent) {
        if self.cancel.is_cancelled() {
            return;
        }
        if self.events.send(event).is_err() {
            log::debug!("poller event dropped, receiver closed");
        }
    }

    fn fetch(&mut self, kind: FetchKind) {
        let generation = self.generation;
        let source = Arc::clone(&self.source);
        self.fetches
            .spawn(async move { (generation, kind, source.fetch_status().await) });
    }

    fn clear_timers(&mut self) {
        self.next_tick = None;
        self.next_reconcile = None;
        self.ceiling = None;
    }

    fn full_refresh(&mut self) {
        self.generation += 1;
        self.clear_timers();
        self.countdown.reset();
        log::debug!("poller full refresh, generation {}", self.generation);
        self.fetch(FetchKind::Full);
    }

    fn force_refresh(&mut self) {
        self.emit(PollerEvent::ForcedRefresh);
        self.full_refresh();
    }

    fn stop_reconciling(&mut self) {
        self.generation += 1;
        self.next_reconcile = None;
        self.ceiling = None;
    }

    fn start_ticking(&mut self) {
        self.next_tick = Some(Instant::now() + self.opts.tick);
    }

    fn on_fetch(&mut self, joined: Result<FetchResult, JoinError>) {
        let (generation, kind, result) = match joined {
            Ok(fetched) => fetched,
            Err(err) => {
                log::debug!("status fetch did not finish: {err}");
                return;
            }
        };
        if generation != self.generation {
            log::debug!(
                "discarding {kind:?} status from generation {generation}, current is {}",
                self.generation
            );
            return;
        }

        match (kind, result) {
            (FetchKind::Full, Ok(status)) => {
                let state = self.countdown.enter(&status);
                if let CountdownState::Counting(_) = state {
                    self.start_ticking();
                }
                self.emit(PollerEvent::Status { status, state });
            }
            (FetchKind::Full, Err(err)) => {
                log::error!("failed to refresh automation status: {err}");
                self.clear_timers();
                self.countdown.reset();
                self.emit(PollerEvent::FetchFailed(err.to_string()));
            }
            (FetchKind::Reconcile, Ok(status)) => match self.countdown.reconcile(&status) {
                Some(ReconcileOutcome::Rescheduled(seconds)) => {
                    self.stop_reconciling();
                    self.start_ticking();
                    self.emit(PollerEvent::Rescheduled { status, seconds });
                }
                Some(ReconcileOutcome::NothingScheduled) => {
                    self.stop_reconciling();
                    self.emit(PollerEvent::NoMoreCommits(status));
                }
                Some(ReconcileOutcome::StillPending) => {
                    log::debug!("commit still pending on the backend");
                }
                None => {}
            },
            (FetchKind::Reconcile, Err(err)) => {
                log::warn!("status check after countdown failed, reloading: {err}");
                self.force_refresh();
            }
        }
    }

    fn on_tick(&mut self) {
        match self.countdown.tick() {
            CountdownState::Counting(seconds) => {
                self.next_tick = self.next_tick.map(|tick| tick + self.opts.tick);
                self.emit(PollerEvent::Tick(seconds));
            }
            CountdownState::Reconciling => {
                let now = Instant::now();
                self.next_tick = None;
                self.next_reconcile = Some(now + self.opts.reconcile_interval);
                self.ceiling = Some(now + self.opts.reconcile_ceiling);
                self.emit(PollerEvent::CommitInProgress);
            }
            CountdownState::Idle => self.next_tick = None,
        }
    }

    fn on_reconcile_poll(&mut self) {
        self.next_reconcile = self
            .next_reconcile
            .map(|poll| poll + self.opts.reconcile_interval);
        self.fetch(FetchKind::Reconcile);
    }

    fn on_ceiling(&mut self) {
        log::warn!(
            "no status update {:?} after the countdown elapsed, reloading",
            self.opts.reconcile_ceiling
        );
        self.force_refresh();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use tokio::time::{self, Instant};

    use crate::core::countdown::CountdownState;
    use crate::core::poller::{self, PollerEvent};
    use crate::model::AutomationStatus;
    use crate::opts::PollOpts;
    use crate::test::{self, ScriptedStatusSource};

    async fn no_event_for(handle: &mut poller::PollerHandle, secs: u64) -> bool {
        time::timeout(Duration::from_secs(secs), handle.next_event())
            .await
            .is_err()
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_then_reschedules() {
        let source = ScriptedStatusSource::new()
            .respond(test::scheduled_status(3))
            .respond(test::scheduled_status(0))
            .respond(test::scheduled_status(120));
        let calls = source.calls();
        let start = Instant::now();
        let mut handle = poller::spawn(source, PollOpts::default());

        assert_eq!(
            handle.next_event().await,
            Some(PollerEvent::Status {
                status: test::scheduled_status(3),
                state: CountdownState::Counting(3)
            })
        );
        assert_eq!(handle.next_event().await, Some(PollerEvent::Tick(2)));
        assert_eq!(start.elapsed(), Duration::from_secs(1));
        assert_eq!(handle.next_event().await, Some(PollerEvent::Tick(1)));
        assert_eq!(handle.next_event().await, Some(PollerEvent::CommitInProgress));
        assert_eq!(start.elapsed(), Duration::from_secs(3));

        // The poll at 8s still reports the commit as due, the one at 13s has a new one
        match handle.next_event().await {
            Some(PollerEvent::Rescheduled { seconds, .. }) => assert_eq!(seconds, 120),
            other => panic!("expected reschedule, got {other:?}"),
        }
        assert_eq!(start.elapsed(), Duration::from_secs(13));
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 3);

        assert_eq!(handle.next_event().await, Some(PollerEvent::Tick(119)));
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_scheduled_after_commit() {
        let source = ScriptedStatusSource::new()
            .respond(test::scheduled_status(1))
            .respond(AutomationStatus::inactive());
        let mut handle = poller::spawn(source, PollOpts::default());

        assert!(matches!(
            handle.next_event().await,
            Some(PollerEvent::Status { .. })
        ));
        assert_eq!(handle.next_event().await, Some(PollerEvent::CommitInProgress));
        assert_eq!(
            handle.next_event().await,
            Some(PollerEvent::NoMoreCommits(AutomationStatus::inactive()))
        );
        assert!(no_event_for(&mut handle, 120).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ceiling_forces_full_refresh() {
        let mut source = ScriptedStatusSource::new().respond(test::scheduled_status(1));
        for _ in 0..10 {
            source = source.respond(test::scheduled_status(0));
        }
        let calls = source.calls();
        let mut handle = poller::spawn(source, PollOpts::default());

        assert!(matches!(
            handle.next_event().await,
            Some(PollerEvent::Status { .. })
        ));
        assert_eq!(handle.next_event().await, Some(PollerEvent::CommitInProgress));
        let reconciling_at = Instant::now();

        assert_eq!(handle.next_event().await, Some(PollerEvent::ForcedRefresh));
        assert_eq!(reconciling_at.elapsed(), Duration::from_secs(30));

        // The forced refresh itself sees a zero countdown and stays idle
        assert_eq!(
            handle.next_event().await,
            Some(PollerEvent::Status {
                status: test::scheduled_status(0),
                state: CountdownState::Idle
            })
        );
        // Initial load, polls at 5, 10, 15, 20 and 25 seconds, then the reload
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 7);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconcile_failure_forces_refresh_once() {
        let source = ScriptedStatusSource::new()
            .respond(test::scheduled_status(1))
            .fail("backend went away");
        let calls = source.calls();
        let mut handle = poller::spawn(source, PollOpts::default());

        assert!(matches!(
            handle.next_event().await,
            Some(PollerEvent::Status { .. })
        ));
        assert_eq!(handle.next_event().await, Some(PollerEvent::CommitInProgress));
        assert_eq!(handle.next_event().await, Some(PollerEvent::ForcedRefresh));
        // Nothing left in the script, so the reload fails and is not retried
        assert!(matches!(
            handle.next_event().await,
            Some(PollerEvent::FetchFailed(_))
        ));
        assert!(no_event_for(&mut handle, 300).await);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_cancels_pending_ticks() {
        let source = ScriptedStatusSource::new()
            .respond(test::scheduled_status(100))
            .respond(AutomationStatus::inactive());
        let mut handle = poller::spawn(source, PollOpts::default());

        assert!(matches!(
            handle.next_event().await,
            Some(PollerEvent::Status { .. })
        ));
        assert_eq!(handle.next_event().await, Some(PollerEvent::Tick(99)));

        handle.refresh();
        assert_eq!(
            handle.next_event().await,
            Some(PollerEvent::Status {
                status: AutomationStatus::inactive(),
                state: CountdownState::Idle
            })
        );
        assert!(no_event_for(&mut handle, 200).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_response_wins() {
        let source = ScriptedStatusSource::new()
            .respond_after(Duration::from_secs(10), test::scheduled_status(100))
            .respond(AutomationStatus::inactive());
        let calls = source.calls();
        let mut handle = poller::spawn(source, PollOpts::default());
        handle.refresh();

        assert_eq!(
            handle.next_event().await,
            Some(PollerEvent::Status {
                status: AutomationStatus::inactive(),
                state: CountdownState::Idle
            })
        );
        // The slow first response lands at 10s and is discarded
        assert!(no_event_for(&mut handle, 60).await);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_initial_load() {
        let source = ScriptedStatusSource::new().fail("Err status [500 Internal Server Error]");
        let mut handle = poller::spawn(source, PollOpts::default());

        match handle.next_event().await {
            Some(PollerEvent::FetchFailed(msg)) => assert!(msg.contains("500")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(no_event_for(&mut handle, 60).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_timers_and_fetches() {
        let mut source = ScriptedStatusSource::new().respond(test::scheduled_status(2));
        for _ in 0..10 {
            source = source.respond(test::scheduled_status(0));
        }
        let calls = source.calls();
        let mut handle = poller::spawn(source, PollOpts::default());

        assert!(matches!(
            handle.next_event().await,
            Some(PollerEvent::Status { .. })
        ));
        assert_eq!(handle.next_event().await, Some(PollerEvent::Tick(1)));
        handle.shutdown().await;

        time::sleep(Duration::from_secs(120)).await;
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_event_after_cancel_is_none() {
        let source = ScriptedStatusSource::new().respond(test::scheduled_status(5));
        let mut handle = poller::spawn(source, PollOpts::default());
        assert!(handle.is_running());

        handle.cancel.cancel();
        assert!(!handle.is_running());
        assert_eq!(handle.next_event().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_fetching() {
        let mut source = ScriptedStatusSource::new().respond(test::scheduled_status(1));
        for _ in 0..10 {
            source = source.respond(test::scheduled_status(0));
        }
        let calls = source.calls();
        let mut handle = poller::spawn(source, PollOpts::default());
        assert!(matches!(
            handle.next_event().await,
            Some(PollerEvent::Status { .. })
        ));
        drop(handle);

        time::sleep(Duration::from_secs(120)).await;
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
