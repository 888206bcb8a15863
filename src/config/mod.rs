//! Configuration and settings management.
//!
//! Settings are an explicit value passed to
//! [`PromptClient::new`](crate::services::PromptClient::new); nothing reads the
//! environment after construction.

mod settings;

pub use settings::{AssistantSettings, API_KEY_ENV, DEFAULT_MODEL};
