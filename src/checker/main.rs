//! Standalone checker for saved homework status responses.
//!
//! Runs the same validation and formatting as the bot over a JSON file
//! and prints the message that would be sent to the chat.

use std::process::ExitCode;

use chrono::DateTime;
use clap::Parser;
use serde_json::Value;

use homework_status_bot::practicum::{check_response, current_date, parse_status};

/// Homework status response checker.
#[derive(Parser, Debug)]
#[command(name = "check_homework_response")]
#[command(about = "Validates a saved Practicum homework statuses response")]
#[command(version)]
struct Args {
    /// Path to the JSON response file to check.
    #[arg(short, long, default_value = "response.json")]
    file: String,

    /// Check every homework in the list, not only the first one.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    check_file(&args.file, args.verbose)
}

fn check_file(path: &str, verbose: bool) -> ExitCode {
    println!("Checking: {path}\n");

    let response: Value = match std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|s| serde_json::from_str(&s).map_err(|e| e.to_string()))
    {
        Ok(v) => v,
        Err(e) => {
            eprintln!("✗ Failed to load response: {e}");
            return ExitCode::FAILURE;
        }
    };

    let homeworks = match check_response(&response) {
        Ok(h) => h,
        Err(e) => {
            println!("✗ Invalid response: {e}");
            return ExitCode::FAILURE;
        }
    };

    match current_date(&response) {
        Some(ts) => {
            let date = DateTime::from_timestamp(ts, 0)
                .map_or_else(|| "out of range".to_owned(), |d| d.to_rfc3339());
            println!("current_date: {ts} ({date})");
        }
        None => println!("current_date: absent (cursor would not move)"),
    }
    println!("homeworks: {}\n", homeworks.len());

    if homeworks.is_empty() {
        println!("✓ No new statuses, nothing would be sent.");
        return ExitCode::SUCCESS;
    }

    let checked = if verbose { homeworks.len() } else { 1 };
    let mut errors = 0;

    for (i, homework) in homeworks.iter().take(checked).enumerate() {
        match parse_status(homework) {
            Ok(message) => println!("[{i}] ✓ {message}"),
            Err(e) => {
                errors += 1;
                println!("[{i}] ✗ {e}");
            }
        }
    }

    println!();

    if errors == 0 {
        println!("✓ Response is valid.");
        ExitCode::SUCCESS
    } else {
        println!("✗ {errors} of {checked} homework record(s) failed.");
        ExitCode::FAILURE
    }
}
