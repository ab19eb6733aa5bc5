//! Daily drain: at the start of every business day, flush whatever queued up overnight.
//!
//! The tick does not touch router state itself; it posts a drain command into the router's
//! channel, so it is serialised with every other event.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use relay_core::{AvailabilityPolicy, Clock, RelayError, RouterHandle};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// Result of one scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Drained(usize),
    /// Nobody was active; the queue stays for the next activation.
    NoActiveStaff,
    /// Fired later than the grace window allows; that day's tick is dropped.
    Skipped,
    /// The drain itself failed; the queue is left as the router had it.
    Failed,
    /// Router task is gone; the scheduler stops.
    RouterStopped,
}

impl TickOutcome {
    fn from_drain(result: Result<usize, RelayError>) -> Self {
        match result {
            Ok(delivered) => TickOutcome::Drained(delivered),
            Err(RelayError::NoActiveRecipients) => {
                debug!("Morning drain found no active staff");
                TickOutcome::NoActiveStaff
            }
            Err(RelayError::RouterUnavailable) => TickOutcome::RouterStopped,
            Err(e) => {
                warn!(error = %e, "Morning drain failed");
                TickOutcome::Failed
            }
        }
    }
}

pub struct DailyDrain {
    router: RouterHandle,
    policy: AvailabilityPolicy,
    clock: Arc<dyn Clock>,
    grace: Duration,
}

impl DailyDrain {
    pub fn new(
        router: RouterHandle,
        policy: AvailabilityPolicy,
        clock: Arc<dyn Clock>,
        grace: Duration,
    ) -> Self {
        Self {
            router,
            policy,
            clock,
            grace,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(self) {
        let mut after = self.clock.now();
        loop {
            let scheduled = self.policy.next_start_after(after);
            let wait = (scheduled - self.clock.now()).to_std().unwrap_or_default();
            info!(
                next_drain = %self.policy.localize(scheduled),
                wait_secs = wait.as_secs(),
                "Scheduled next morning drain"
            );
            tokio::time::sleep(wait).await;

            if self.fire(scheduled).await == TickOutcome::RouterStopped {
                error!("Router stopped, daily drain scheduler exiting");
                return;
            }
            // never pick the same start twice, even if the wall clock lags the timer
            after = self.clock.now().max(scheduled);
        }
    }

    /// Runs the tick planned for `scheduled`, unless it is already past the grace window.
    #[instrument(skip(self))]
    pub async fn fire(&self, scheduled: DateTime<Utc>) -> TickOutcome {
        let late = (self.clock.now() - scheduled).to_std().unwrap_or_default();
        if late > self.grace {
            warn!(
                late_secs = late.as_secs(),
                grace_secs = self.grace.as_secs(),
                "Morning drain fired too late, skipping today's run"
            );
            return TickOutcome::Skipped;
        }

        info!(at = %self.policy.localize(scheduled), "Executing scheduled morning drain");
        TickOutcome::from_drain(self.router.drain().await)
    }
}
