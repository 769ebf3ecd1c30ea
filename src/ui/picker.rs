//! Model discovery and selection.
//!
//! The live catalog comes from the backend; if the listing fails the
//! operator gets a fixed two-model fallback and a warning instead of an
//! error. Selection is a numbered list prompt that re-asks until it gets
//! a valid choice.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::api::client::ChatBackend;
use crate::api::ApiError;
use crate::core::constants::FALLBACK_MODELS;
use crate::ui::Spinner;

/// Fetches the catalog, substituting the fallback list on any failure.
pub async fn resolve_catalog<B: ChatBackend>(backend: &B) -> (Vec<String>, Option<ApiError>) {
    match backend.list_models().await {
        Ok(models) => (models, None),
        Err(err) => {
            let fallback = FALLBACK_MODELS.iter().map(|m| m.to_string()).collect();
            (fallback, Some(err))
        }
    }
}

/// Presents the catalog and returns the chosen model identifier.
pub async fn select_model<B, R>(backend: &B, input: &mut R) -> io::Result<String>
where
    B: ChatBackend,
    R: BufRead,
{
    let spinner = Spinner::start("Fetching available models...");
    let (catalog, fetch_error) = resolve_catalog(backend).await;
    match fetch_error {
        None => spinner.succeed("Models fetched."),
        Some(err) => {
            spinner.warn("Could not fetch models dynamically. Using default list.");
            tracing::warn!(error = %err, "model listing failed");
        }
    }

    let index = prompt_model_choice(&catalog, input)?;
    let model = catalog[index].clone();
    println!(
        "\n{}\n",
        format!("Selected Model: {}", model.bold()).green()
    );
    Ok(model)
}

fn prompt_model_choice<R: BufRead>(catalog: &[String], input: &mut R) -> io::Result<usize> {
    println!("Select a Gemini Model:");
    for (index, model) in catalog.iter().enumerate() {
        println!("  {}. {}", index + 1, model);
    }

    loop {
        print!("Choice (1-{}): ", catalog.len());
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "model selection aborted",
            ));
        }

        match parse_model_choice(&line, catalog.len()) {
            Ok(index) => return Ok(index),
            Err(message) => println!("{}", message.red()),
        }
    }
}

/// Validates a selection line against a catalog of `count` entries.
pub fn parse_model_choice(input: &str, count: usize) -> Result<usize, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Selection cannot be empty".to_string());
    }
    let choice: usize = trimmed
        .parse()
        .map_err(|_| "Invalid choice".to_string())?;
    if choice == 0 || choice > count {
        return Err("Invalid choice".to_string());
    }
    Ok(choice - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ChatHandle;
    use async_trait::async_trait;
    use std::io::Cursor;

    struct ListingBackend {
        models: Result<Vec<&'static str>, &'static str>,
    }

    #[async_trait]
    impl ChatBackend for ListingBackend {
        async fn probe(&self, _model: &str, _text: &str) -> Result<(), ApiError> {
            panic!("probe is not part of model selection");
        }

        async fn list_models(&self) -> Result<Vec<String>, ApiError> {
            match &self.models {
                Ok(models) => Ok(models.iter().map(|m| m.to_string()).collect()),
                Err(message) => Err(ApiError::new(*message)),
            }
        }

        async fn start_chat(&self, _model: &str) -> Result<ChatHandle, ApiError> {
            panic!("start_chat is not part of model selection");
        }

        async fn send_message(
            &self,
            _session: &mut ChatHandle,
            _text: &str,
        ) -> Result<String, ApiError> {
            panic!("send_message is not part of model selection");
        }
    }

    #[test]
    fn choice_parsing_rejects_empty_and_out_of_range() {
        assert!(parse_model_choice("", 2).is_err());
        assert!(parse_model_choice("  ", 2).is_err());
        assert!(parse_model_choice("zero", 2).is_err());
        assert!(parse_model_choice("0", 2).is_err());
        assert!(parse_model_choice("3", 2).is_err());
        assert_eq!(parse_model_choice("1", 2).unwrap(), 0);
        assert_eq!(parse_model_choice(" 2 ", 2).unwrap(), 1);
    }

    #[tokio::test]
    async fn live_catalog_is_returned_verbatim() {
        let backend = ListingBackend {
            models: Ok(vec!["gemini-2.0-flash", "gemini-1.5-pro"]),
        };
        let (catalog, warning) = resolve_catalog(&backend).await;
        assert_eq!(catalog, vec!["gemini-2.0-flash", "gemini-1.5-pro"]);
        assert!(warning.is_none());
    }

    #[tokio::test]
    async fn failed_listing_yields_the_fixed_fallback_every_time() {
        let backend = ListingBackend {
            models: Err("503 Service Unavailable"),
        };
        for _ in 0..3 {
            let (catalog, warning) = resolve_catalog(&backend).await;
            assert_eq!(catalog, vec!["gemini-1.5-flash", "gemini-pro"]);
            assert!(warning.is_some());
        }
    }

    #[tokio::test]
    async fn selection_from_fallback_returns_chosen_identifier() {
        let backend = ListingBackend {
            models: Err("network unreachable"),
        };
        let mut input = Cursor::new("1\n");
        let model = select_model(&backend, &mut input).await.unwrap();
        assert_eq!(model, "gemini-1.5-flash");
    }

    #[tokio::test]
    async fn invalid_selections_reprompt_until_valid() {
        let backend = ListingBackend {
            models: Ok(vec!["gemini-2.0-flash", "gemini-1.5-pro"]),
        };
        let mut input = Cursor::new("\nfive\n9\n2\n");
        let model = select_model(&backend, &mut input).await.unwrap();
        assert_eq!(model, "gemini-1.5-pro");
    }
}
