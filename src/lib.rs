//! Homework Status Bot Library
//!
//! A Telegram bot that relays homework review status changes.
//!
//! This crate provides the core functionality for:
//! - Loading and validating credentials and settings
//! - Fetching review statuses from the Practicum API
//! - Validating responses and formatting status messages
//! - Polling on a fixed interval and notifying a chat on change

pub mod config;
pub mod practicum;
pub mod scheduler;
pub mod telegram;

#[cfg(test)]
mod test_support;
