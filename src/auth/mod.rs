//! Credential acquisition: masked entry, soft verification, persistence.
//!
//! The previously stored key is always discarded before prompting; the
//! operator re-enters the key every run. Verification is advisory: a
//! failed probe produces a warning and the session continues with the
//! unverified key.

use std::error::Error;
use std::io;

use async_trait::async_trait;
use colored::Colorize;

use crate::api::client::{ChatBackend, GeminiClient};
use crate::api::ApiError;
use crate::core::constants::{API_KEY_ENTRY, PROBE_MODEL, PROBE_TEXT};
use crate::core::keyring::CredentialStore;
use crate::ui::Spinner;

pub mod ui;

pub const REASON_INVALID_KEY: &str = "API_KEY_INVALID";
pub const REASON_CONNECTION: &str = "Connection/Model Error";

/// Outcome of the soft verification probe. Both variants leave the
/// credential usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    Verified,
    Unverified(String),
}

/// Issues the verification probe for a candidate key.
#[async_trait]
pub trait KeyVerifier {
    async fn verify(&self, api_key: &str) -> Result<(), ApiError>;
}

/// Probes the fixed verification model with a one-word request.
pub struct GeminiVerifier;

#[async_trait]
impl KeyVerifier for GeminiVerifier {
    async fn verify(&self, api_key: &str) -> Result<(), ApiError> {
        let client = GeminiClient::new(api_key.to_string());
        client.probe(PROBE_MODEL, PROBE_TEXT).await
    }
}

/// Maps a probe error message onto a verification reason.
///
/// Gemini reports a rejected key with either the human-readable
/// "API key not valid" text or the `API_KEY_INVALID` status token; any
/// other failure (network, quota, unknown model) is a connection-level
/// problem that says nothing about the key.
pub fn classify_probe_error(message: &str) -> &'static str {
    if message.contains("API key not valid") || message.contains("API_KEY_INVALID") {
        REASON_INVALID_KEY
    } else {
        REASON_CONNECTION
    }
}

/// Runs the probe and classifies the outcome.
pub async fn verify_key(verifier: &dyn KeyVerifier, api_key: &str) -> VerificationResult {
    match verifier.verify(api_key).await {
        Ok(()) => VerificationResult::Verified,
        Err(err) => {
            let reason = classify_probe_error(&err.to_string());
            VerificationResult::Unverified(reason.to_string())
        }
    }
}

/// Obtains a non-empty API key: discards the stored one, prompts until
/// the operator enters something, soft-verifies, persists exactly once,
/// and returns the key regardless of the verification outcome.
///
/// `prompt` supplies one line of (already masked) operator input per
/// call; tests inject scripted input here.
pub async fn acquire<P>(
    store: &dyn CredentialStore,
    verifier: &dyn KeyVerifier,
    mut prompt: P,
) -> Result<String, Box<dyn Error>>
where
    P: FnMut() -> io::Result<String>,
{
    // Fresh entry every run is policy, not a cache miss.
    store.delete(API_KEY_ENTRY)?;

    let api_key = loop {
        let entered = prompt()?;
        let entered = entered.trim().to_string();
        if entered.is_empty() {
            println!("{}", "API Key is required".red());
            continue;
        }
        break entered;
    };

    let spinner = Spinner::start("Verifying API Key...");
    match verify_key(verifier, &api_key).await {
        VerificationResult::Verified => {
            spinner.succeed(&"API Key verified successfully!".green().to_string());
        }
        VerificationResult::Unverified(reason) => {
            spinner.warn("Warning: Could not verify key with standard models.");
            println!("{}", format!("Details: {reason}").dimmed());
            println!("{}", "Proceeding anyway...".green());
            tracing::warn!(%reason, "api key verification failed");
        }
    }

    store.set(API_KEY_ENTRY, &api_key)?;
    Ok(api_key)
}

/// Interactive entry point: masked prompt plus [`acquire`].
pub async fn acquire_interactive(
    store: &dyn CredentialStore,
    verifier: &dyn KeyVerifier,
) -> Result<String, Box<dyn Error>> {
    acquire(store, verifier, || {
        ui::read_api_key("Enter your Gemini API Key: ")
    })
    .await
}
