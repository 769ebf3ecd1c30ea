//! Anveshak is an interactive terminal chat client for the Google Gemini API.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`auth`] acquires and soft-verifies the API credential.
//! - [`api`] defines the Gemini payload types and the backend client the
//!   interactive flow talks to.
//! - [`ui`] renders status output and runs the model picker and the
//!   conversation loop.
//! - [`core`] holds shared constants and the credential store.
//!
//! The runtime entrypoint lives in the binary crate (`src/main.rs`) and
//! routes through [`crate::cli::main`], which sequences the session:
//! credential acquisition, model selection, then the chat loop.

pub mod api;
pub mod auth;
pub mod cli;
pub mod core;
pub mod ui;
