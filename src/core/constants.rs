//! Shared constants used across the application

/// Keyring service name under which the credential entry is stored.
pub const KEYRING_SERVICE: &str = "anveshak";

/// Name of the single persisted credential entry.
pub const API_KEY_ENTRY: &str = "GEMINI_API_KEY";

/// Base URL of the Gemini REST API.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for the one-shot key verification probe. Deliberately
/// independent of the catalog offered during model selection; the probe
/// only checks that the key is accepted at all.
pub const PROBE_MODEL: &str = "gemini-2.5-flash";

/// Text sent as the verification probe.
pub const PROBE_TEXT: &str = "Hi";

/// Catalog offered when the live model listing is unavailable.
pub const FALLBACK_MODELS: [&str; 2] = ["gemini-1.5-flash", "gemini-pro"];
