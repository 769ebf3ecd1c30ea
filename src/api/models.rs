//! Catalog normalization for the model listing endpoint.

use crate::api::ModelInfo;

/// Strips the `models/` resource prefix Gemini puts on model names.
pub fn short_model_name(name: &str) -> &str {
    name.strip_prefix("models/").unwrap_or(name)
}

/// Reduces a raw listing to the chat-capable model identifiers, in the
/// order the backend reported them.
pub fn chat_model_names(models: &[ModelInfo]) -> Vec<String> {
    models
        .iter()
        .filter(|model| {
            model
                .supported_generation_methods
                .iter()
                .any(|method| method == "generateContent")
        })
        .map(|model| short_model_name(&model.name).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str, methods: &[&str]) -> ModelInfo {
        ModelInfo {
            name: name.to_string(),
            display_name: None,
            supported_generation_methods: methods.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn strips_resource_prefix() {
        assert_eq!(short_model_name("models/gemini-pro"), "gemini-pro");
        assert_eq!(short_model_name("gemini-pro"), "gemini-pro");
    }

    #[test]
    fn keeps_only_chat_capable_models_in_order() {
        let listing = vec![
            model("models/gemini-1.5-flash", &["generateContent", "countTokens"]),
            model("models/embedding-001", &["embedContent"]),
            model("models/gemini-pro", &["generateContent"]),
        ];
        assert_eq!(
            chat_model_names(&listing),
            vec!["gemini-1.5-flash", "gemini-pro"]
        );
    }
}
