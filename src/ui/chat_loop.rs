//! The interactive conversation loop.
//!
//! A small state machine: initialize a session, then alternate between
//! reading one line of operator input and sending one turn. Only a failed
//! initialization ends the loop on its own; failed turns are reported and
//! the same session keeps going. The terminal state is returned to the
//! caller, which decides how the process ends.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::api::client::ChatBackend;
use crate::ui::{markdown, Spinner};

/// Terminal state of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// Operator typed `exit`/`quit` (or input ended).
    Normal,
    /// `start_chat` failed; there was never a session to converse with.
    InitError,
}

/// One line of operator input, post-trim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnInput {
    Exit,
    Empty,
    Message(String),
}

/// Classifies a raw input line. `exit` and `quit` match case-insensitively
/// after trimming; blank lines produce no turn.
pub fn parse_turn_input(line: &str) -> TurnInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return TurnInput::Empty;
    }
    if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
        return TurnInput::Exit;
    }
    TurnInput::Message(trimmed.to_string())
}

/// Runs the conversation against `model` until the operator exits.
pub async fn run_chat<B, R>(backend: &B, model: &str, input: &mut R) -> LoopExit
where
    B: ChatBackend,
    R: BufRead,
{
    let spinner = Spinner::start("Initializing Chat...");
    let mut session = match backend.start_chat(model).await {
        Ok(session) => {
            spinner.succeed(&"Chat Initialized!".green().to_string());
            session
        }
        Err(err) => {
            spinner.fail("Failed to initialize chat.");
            eprintln!("{}", err.to_string().red());
            return LoopExit::InitError;
        }
    };

    let separator = "-".repeat(50);
    println!("{}", separator.dimmed());
    println!(
        "{}",
        "Type \"exit\" or \"quit\" to end the session.".dimmed()
    );
    println!("{}\n", separator.dimmed());

    loop {
        print!("{} ", "You >".cyan());
        if io::stdout().flush().is_err() {
            return LoopExit::Normal;
        }

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => {
                // End of input is treated like an explicit exit.
                print_goodbye();
                return LoopExit::Normal;
            }
            Ok(_) => {}
            Err(err) => {
                eprintln!("{}", err.to_string().red());
                print_goodbye();
                return LoopExit::Normal;
            }
        }

        match parse_turn_input(&line) {
            TurnInput::Exit => {
                print_goodbye();
                return LoopExit::Normal;
            }
            TurnInput::Empty => continue,
            TurnInput::Message(text) => {
                let spinner = Spinner::start("AnveshakAI is thinking...");
                match backend.send_message(&mut session, &text).await {
                    Ok(reply) => {
                        spinner.stop();
                        println!("{}", "AnveshakAI >".magenta());
                        println!("{}", markdown::render_markdown(&reply));
                        println!();
                    }
                    Err(err) => {
                        // The session handle stays valid; only this turn is lost.
                        spinner.fail("Error generating response.");
                        eprintln!("{}", err.to_string().red());
                    }
                }
            }
        }
    }
}

fn print_goodbye() {
    println!("\n{}", "Goodbye! AnveshakAI shutting down...".yellow());
}
