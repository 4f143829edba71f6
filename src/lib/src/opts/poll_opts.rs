use std::time::Duration;

use crate::constants::{COUNTDOWN_TICK, RECONCILE_CEILING, RECONCILE_INTERVAL};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollOpts {
    // How often the local countdown decrements
    pub tick: Duration,
    // Once the countdown elapses, how often to ask the backend if the commit happened
    pub reconcile_interval: Duration,
    // Measured from the countdown reaching zero, when to stop asking and reload everything
    pub reconcile_ceiling: Duration,
}

impl Default for PollOpts {
    fn default() -> Self {
        Self::new()
    }
}

impl PollOpts {
    /// One second ticks, reconcile every 5s for at most 30s
    pub fn new() -> PollOpts {
        PollOpts {
            tick: COUNTDOWN_TICK,
            reconcile_interval: RECONCILE_INTERVAL,
            reconcile_ceiling: RECONCILE_CEILING,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::opts::PollOpts;

    #[test]
    fn test_default_poll_opts() {
        let opts = PollOpts::default();
        assert_eq!(opts.tick, Duration::from_secs(1));
        assert_eq!(opts.reconcile_interval, Duration::from_secs(5));
        assert_eq!(opts.reconcile_ceiling, Duration::from_secs(30));
    }
}
