//! Masked terminal prompt for key entry.

use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

const MASK: char = '*';

/// Reads one line of secret input, echoing a mask character per keystroke.
pub fn read_api_key(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    enable_raw_mode()?;
    let result = read_masked_input();
    disable_raw_mode()?;
    println!();
    result
}

fn read_masked_input() -> io::Result<String> {
    let mut buffer = String::new();
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Enter => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Err(io::Error::new(
                        io::ErrorKind::Interrupted,
                        "key entry cancelled",
                    ));
                }
                KeyCode::Backspace => {
                    if buffer.pop().is_some() {
                        print!("\x08 \x08");
                        io::stdout().flush()?;
                    }
                }
                KeyCode::Char(c) => {
                    buffer.push(c);
                    print!("{MASK}");
                    io::stdout().flush()?;
                }
                _ => {}
            }
        }
    }
    Ok(buffer)
}
