//! Status polling module.
//!
//! Periodically fetches homework statuses and relays changes to the chat.

mod runner;
mod state;

pub use runner::{CycleOutcome, PollerMessage, StatusPoller};
pub use state::PollState;
