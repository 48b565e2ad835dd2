//! Homework status poller.
//!
//! Every cycle follows the same steps:
//! 1. Fetch statuses changed since the poll cursor
//! 2. Validate the response shape
//! 3. If the list is empty → nothing to report
//! 4. Otherwise format the first homework and notify if the text changed
//! 5. Sleep the retry period, then repeat
//!
//! Any failure in steps 1-4 becomes a single failure message that is
//! relayed to the chat unless it repeats the last delivered message.
//! The cursor only moves after a fully handled, successful fetch.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use super::PollState;
use crate::practicum::{
    ErrorKind, HomeworkSource, PracticumError, check_response, current_date, parse_status,
};
use crate::telegram::Notifier;

/// Messages that can be sent to the poller.
#[derive(Debug, Clone)]
pub enum PollerMessage {
    /// Stop the poller after the current cycle.
    Shutdown,
}

/// Result of a single polling cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The response held no homeworks.
    NoUpdates,
    /// A new status message was delivered.
    Notified,
    /// The status message matched the last delivered one.
    Unchanged,
    /// A new status message could not be delivered.
    DeliveryFailed,
    /// The cycle failed with an error of the given kind.
    Failed(ErrorKind),
}

impl CycleOutcome {
    /// Checks whether the cycle reached the API and delivered what it had to.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::NoUpdates | Self::Notified | Self::Unchanged)
    }
}

/// Polls the review API and relays status changes.
pub struct StatusPoller<S, N> {
    /// Source of review statuses.
    source: S,

    /// Chat notifier.
    notifier: N,

    /// Delay between cycles.
    retry_period: Duration,
}

impl<S, N> StatusPoller<S, N>
where
    S: HomeworkSource,
    N: Notifier,
{
    /// Creates a new poller.
    #[must_use]
    pub const fn new(source: S, notifier: N, retry_period: Duration) -> Self {
        Self {
            source,
            notifier,
            retry_period,
        }
    }

    /// Runs the polling loop until a shutdown message arrives.
    ///
    /// Returns the final state.
    pub async fn run(&self, mut state: PollState, mut rx: mpsc::Receiver<PollerMessage>) -> PollState {
        info!(
            "Status poller started, retry period {}s",
            self.retry_period.as_secs()
        );

        loop {
            let outcome = self.cycle(&mut state).await;
            debug!("Cycle finished: {:?}, cursor {}", outcome, state.cursor());

            tokio::select! {
                () = tokio::time::sleep(self.retry_period) => {}
                msg = rx.recv() => {
                    match msg {
                        Some(PollerMessage::Shutdown) | None => {
                            info!("Status poller shutting down");
                            break;
                        }
                    }
                }
            }
        }

        state
    }

    /// Runs one fetch-validate-notify cycle.
    ///
    /// Never fails: errors are logged, relayed once and reported in the
    /// returned outcome.
    pub async fn cycle(&self, state: &mut PollState) -> CycleOutcome {
        match self.check_for_update(state).await {
            Ok(outcome) => outcome,
            Err(e) => {
                let kind = e.kind();
                let message = format!("Program failure: {e}");
                error!("{} ({})", message, kind);

                if state.is_new(&message) && self.notifier.send_message(&message).await {
                    state.remember(message);
                }

                CycleOutcome::Failed(kind)
            }
        }
    }

    async fn check_for_update(&self, state: &mut PollState) -> Result<CycleOutcome, PracticumError> {
        let response = self.source.fetch(state.cursor()).await?;
        let homeworks = check_response(&response)?;
        let next_cursor = current_date(&response);

        let Some(homework) = homeworks.first() else {
            debug!("No new statuses");
            state.advance_cursor(next_cursor);
            return Ok(CycleOutcome::NoUpdates);
        };

        let message = parse_status(homework)?;

        if !state.is_new(&message) {
            debug!("Status unchanged");
            state.advance_cursor(next_cursor);
            return Ok(CycleOutcome::Unchanged);
        }

        if self.notifier.send_message(&message).await {
            info!("Status change delivered");
            state.remember(message);
            state.advance_cursor(next_cursor);
            Ok(CycleOutcome::Notified)
        } else {
            // Keep the cursor so the same status is fetched again.
            Ok(CycleOutcome::DeliveryFailed)
        }
    }

    /// Gets a reference to the status source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Gets a reference to the notifier.
    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }
}

impl<S, N> std::fmt::Debug for StatusPoller<S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusPoller")
            .field("retry_period", &self.retry_period)
            .finish_non_exhaustive()
    }
}
