//! Command-line entry point and session orchestration.
//!
//! The orchestration itself is deliberately flat: acquire a credential,
//! select a model, run the conversation loop, passing each stage's
//! product to the next.

use std::error::Error;
use std::io;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::api::client::GeminiClient;
use crate::auth::{self, GeminiVerifier};
use crate::core::keyring::KeyringStore;
use crate::ui::{chat_loop, picker};

#[derive(Parser)]
#[command(name = "anveshak")]
#[command(version)]
#[command(about = "An interactive terminal chat client for the Google Gemini API")]
#[command(
    long_about = "Anveshak is an interactive terminal chat client for the Google Gemini API.\n\n\
Each run asks for your Gemini API key (entry is masked; the key is stored in the\n\
system keyring for API calls), verifies it with a best-effort probe, lets you pick\n\
a model, and then starts a turn-based chat.\n\n\
Controls:\n\
  Type a message and press Enter to send it\n\
  exit / quit       End the session\n\n\
Set RUST_LOG to enable diagnostic logging on stderr."
)]
pub struct Args {}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let _args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    println!("{}\n", "AnveshakAI".cyan().bold());

    let store = KeyringStore::new();
    let api_key = auth::acquire_interactive(&store, &GeminiVerifier).await?;

    let client = GeminiClient::new(api_key);

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let model = picker::select_model(&client, &mut input).await?;

    // Both terminal states of the loop end the process with success
    // status; init failures were already reported by the loop.
    let _exit = chat_loop::run_chat(&client, &model, &mut input).await;
    Ok(())
}
