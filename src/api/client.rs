//! Gemini backend client and the backend abstraction consumed by the
//! interactive flow.

use async_trait::async_trait;

use crate::api::models::chat_model_names;
use crate::api::{ApiError, Content, GenerateContentRequest, GenerateContentResponse, ModelsResponse};
use crate::core::constants::GEMINI_BASE_URL;

/// Opaque handle to an ongoing conversation.
///
/// Gemini keeps no server-side session state; the handle carries the
/// chosen model and the accumulated history that is posted with every
/// turn. A failed turn leaves the history untouched, so the handle stays
/// usable afterwards.
pub struct ChatHandle {
    model: String,
    history: Vec<Content>,
}

impl ChatHandle {
    pub(crate) fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            history: Vec::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn history(&self) -> &[Content] {
        &self.history
    }

    fn record_turn(&mut self, input: &str, output: &str) {
        self.history.push(Content::user(input));
        self.history.push(Content::model(output));
    }
}

/// Operations the interactive flow needs from a generative backend.
#[async_trait]
pub trait ChatBackend {
    /// One-shot generation used for soft key verification.
    async fn probe(&self, model: &str, text: &str) -> Result<(), ApiError>;

    /// Chat-capable model identifiers, in backend order.
    async fn list_models(&self) -> Result<Vec<String>, ApiError>;

    /// Opens a conversation against `model`.
    async fn start_chat(&self, model: &str) -> Result<ChatHandle, ApiError>;

    /// Sends one turn and returns the reply text.
    async fn send_message(&self, session: &mut ChatHandle, text: &str)
        -> Result<String, ApiError>;
}

/// HTTP client for the Gemini REST API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, GEMINI_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }

    async fn generate(&self, model: &str, contents: Vec<Content>) -> Result<String, ApiError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );
        let response = self
            .http
            .post(&url)
            .json(&GenerateContentRequest { contents })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::debug!(%status, model, "generateContent request failed");
            return Err(ApiError::new(format!(
                "API request failed with status {status}: {body}"
            )));
        }

        let parsed = response.json::<GenerateContentResponse>().await?;
        parsed
            .text()
            .ok_or_else(|| ApiError::new("Response contained no candidates"))
    }
}

#[async_trait]
impl ChatBackend for GeminiClient {
    async fn probe(&self, model: &str, text: &str) -> Result<(), ApiError> {
        self.generate(model, vec![Content::user(text)]).await?;
        Ok(())
    }

    async fn list_models(&self) -> Result<Vec<String>, ApiError> {
        let url = format!("{}/models?key={}", self.base_url, self.api_key);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::debug!(%status, "model listing request failed");
            return Err(ApiError::new(format!(
                "API request failed with status {status}: {body}"
            )));
        }

        let listing = response.json::<ModelsResponse>().await?;
        let names = chat_model_names(&listing.models);
        if names.is_empty() {
            return Err(ApiError::new("Model listing contained no chat models"));
        }
        Ok(names)
    }

    async fn start_chat(&self, model: &str) -> Result<ChatHandle, ApiError> {
        // Gemini sessions are client-side; validating the model up front is
        // the only way initialization can fail.
        let url = format!("{}/models/{}?key={}", self.base_url, model, self.api_key);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::debug!(%status, model, "model lookup failed");
            return Err(ApiError::new(format!(
                "API request failed with status {status}: {body}"
            )));
        }

        Ok(ChatHandle::new(model))
    }

    async fn send_message(
        &self,
        session: &mut ChatHandle,
        text: &str,
    ) -> Result<String, ApiError> {
        let mut contents = session.history().to_vec();
        contents.push(Content::user(text));

        let reply = self.generate(session.model(), contents).await?;
        session.record_turn(text, &reply);
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_handle_records_turns_in_order() {
        let mut handle = ChatHandle::new("gemini-pro");
        handle.record_turn("hello", "hi there");
        handle.record_turn("how are you", "fine");

        let history = handle.history();
        assert_eq!(history.len(), 4);
        assert_eq!(history[0], Content::user("hello"));
        assert_eq!(history[1], Content::model("hi there"));
        assert_eq!(history[2], Content::user("how are you"));
        assert_eq!(history[3], Content::model("fine"));
    }

    #[test]
    fn fresh_chat_handle_has_empty_history() {
        let handle = ChatHandle::new("gemini-pro");
        assert_eq!(handle.model(), "gemini-pro");
        assert!(handle.history().is_empty());
    }
}
