//! Text Generator Adapters.
//!
//! Implementations of the TextGenerator port.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google generative language API (`generateContent`)
//! - `ChatRelayProvider` - Relay service holding the credential server-side
//! - `MockTextGenerator` - Configurable mock for testing

mod gemini_provider;
mod mock_provider;
mod relay_provider;

pub use gemini_provider::{
    GeminiConfig, GeminiProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL,
};
pub use mock_provider::{MockResponse, MockTextGenerator, DEFAULT_MOCK_REPLY};
pub use relay_provider::{ChatRelayConfig, ChatRelayProvider, NO_RESPONSE_REPLY};
