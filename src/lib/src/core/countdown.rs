//! Local countdown to the next scheduled commit
//!
//! The machine is pure: it never sleeps or fetches. [`crate::core::poller`]
//! owns the timers and feeds it ticks and statuses.

use crate::constants::{COMMIT_IN_PROGRESS_MSG, NO_MORE_COMMITS_MSG};
use crate::model::{AutomationStatus, NextCommit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Idle,
    /// Seconds remaining until the backend should commit
    Counting(u64),
    /// The countdown elapsed and we are waiting for the backend to confirm
    Reconciling,
}

/// What a status fetched while reconciling means for the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Rescheduled(u64),
    NothingScheduled,
    /// The backend still reports the commit as due
    StillPending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    state: CountdownState,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Countdown {
    pub fn new() -> Countdown {
        Countdown {
            state: CountdownState::Idle,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    /// Starts over from a freshly loaded status.
    ///
    /// Only a scheduled commit with time left starts counting. A zero countdown
    /// at load time is shown as the backend formatted it.
    pub fn enter(&mut self, status: &AutomationStatus) -> CountdownState {
        self.state = match status.next_commit.seconds_until_next() {
            Some(seconds) if seconds > 0 => CountdownState::Counting(seconds),
            _ => CountdownState::Idle,
        };
        self.state
    }

    pub fn tick(&mut self) -> CountdownState {
        if let CountdownState::Counting(seconds) = self.state {
            let remaining = seconds.saturating_sub(1);
            self.state = if remaining == 0 {
                CountdownState::Reconciling
            } else {
                CountdownState::Counting(remaining)
            };
        }
        self.state
    }

    /// Applies a status fetched while reconciling. `None` when not reconciling.
    pub fn reconcile(&mut self, status: &AutomationStatus) -> Option<ReconcileOutcome> {
        if self.state != CountdownState::Reconciling {
            return None;
        }

        let next = &status.next_commit;
        let outcome = if !next.has_scheduled_commits {
            ReconcileOutcome::NothingScheduled
        } else {
            match next.seconds_until_next() {
                Some(seconds) if seconds > 0 => ReconcileOutcome::Rescheduled(seconds),
                Some(_) => ReconcileOutcome::StillPending,
                None => ReconcileOutcome::NothingScheduled,
            }
        };

        match outcome {
            ReconcileOutcome::Rescheduled(seconds) => {
                self.state = CountdownState::Counting(seconds)
            }
            ReconcileOutcome::NothingScheduled => self.state = CountdownState::Idle,
            ReconcileOutcome::StillPending => {}
        }
        Some(outcome)
    }

    pub fn reset(&mut self) {
        self.state = CountdownState::Idle;
    }
}

/// The countdown line as it should be shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownView {
    Hidden,
    Remaining(u64),
    CommitInProgress,
    NoMoreCommits,
    /// Countdown text as formatted by the backend
    Backend(String),
}

impl CountdownView {
    /// Nothing is shown unless the backend reports a scheduled commit
    pub fn new(state: CountdownState, next_commit: &NextCommit) -> CountdownView {
        if !next_commit.has_scheduled_commits {
            return CountdownView::Hidden;
        }
        match state {
            CountdownState::Counting(seconds) => CountdownView::Remaining(seconds),
            CountdownState::Reconciling => CountdownView::CommitInProgress,
            CountdownState::Idle => match &next_commit.formatted_countdown {
                Some(text) if !text.is_empty() => CountdownView::Backend(text.to_owned()),
                _ => CountdownView::Hidden,
            },
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, CountdownView::Hidden)
    }
}

impl std::fmt::Display for CountdownView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountdownView::Hidden => Ok(()),
            CountdownView::Remaining(seconds) => write!(f, "{}", format_countdown(*seconds)),
            CountdownView::CommitInProgress => write!(f, "{COMMIT_IN_PROGRESS_MSG}"),
            CountdownView::NoMoreCommits => write!(f, "{NO_MORE_COMMITS_MSG}"),
            CountdownView::Backend(text) => write!(f, "{text}"),
        }
    }
}

/// HH:MM:SS, hours are not wrapped at 24
pub fn format_countdown(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}
