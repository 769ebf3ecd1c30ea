//! Terminal status output: spinners and colored status lines.

use std::time::Duration;

use colored::Colorize;
use indicatif::ProgressBar;

pub mod chat_loop;
pub mod markdown;
pub mod picker;

/// A spinner with explicit terminal states, wrapping [`ProgressBar`].
///
/// Each blocking backend call runs under one of these; the final state
/// replaces the spinner with a check, warning, or cross line.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    pub fn succeed(self, message: &str) {
        self.bar.finish_and_clear();
        println!("{} {}", "✔".green(), message);
    }

    pub fn warn(self, message: &str) {
        self.bar.finish_and_clear();
        println!("{} {}", "⚠".yellow(), message.yellow());
    }

    pub fn fail(self, message: &str) {
        self.bar.finish_and_clear();
        println!("{} {}", "✖".red(), message.red());
    }

    /// Clears the spinner without printing a status line.
    pub fn stop(self) {
        self.bar.finish_and_clear();
    }
}
