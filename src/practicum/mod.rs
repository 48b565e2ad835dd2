//! Practicum API module.
//!
//! Fetches homework review statuses, validates the response shape and
//! turns a homework record into a human-readable status message.

mod client;
mod error;
mod response;

pub use client::{HomeworkSource, PracticumClient};
pub use error::{ErrorKind, PracticumError};
pub use response::{Homework, Verdict, check_response, current_date, parse_status};
