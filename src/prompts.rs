//! Terminal prompt and status helpers for the command layer.
//!
//! Thin wrappers around dialoguer/indicatif so commands stay readable. When
//! stdin is not a terminal (CI, pipes), confirms fall back to their default
//! answer instead of blocking.

use std::io::IsTerminal;

use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};

pub fn print_header(title: &str) {
    println!("\n{title}");
    println!("{}", "=".repeat(title.len()));
}

pub fn print_success(message: &str) {
    println!("✓ {message}");
}

pub fn print_error(message: &str) {
    eprintln!("✗ {message}");
}

pub fn print_info(message: &str) {
    println!("  {message}");
}

/// Yes/no confirmation. Non-interactive sessions get `default_answer`.
pub fn confirm(prompt: &str, default_answer: bool) -> anyhow::Result<bool> {
    if !std::io::stdin().is_terminal() {
        return Ok(default_answer);
    }
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default_answer)
        .interact()?)
}

/// Free-text input with a default. Non-interactive sessions get the default.
pub fn input(prompt: &str, default_value: &str) -> anyhow::Result<String> {
    if !std::io::stdin().is_terminal() {
        return Ok(default_value.to_string());
    }
    Ok(Input::new()
        .with_prompt(prompt)
        .default(default_value.to_string())
        .interact_text()?)
}

/// Spinner shown while waiting on the registry.
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(std::time::Duration::from_millis(80));
    bar
}
