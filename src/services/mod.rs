//! Business services layer.
//!
//! Services sit between callers and the provider layer:
//!
//! ```text
//! Caller (mailbox / calendar data sources)
//!          |
//!          v
//!    Services Layer  <-- You are here
//!          |
//!          v
//!    Providers (LLM endpoint)
//! ```
//!
//! - [`PromptClient`]: answers mailbox questions and drafts replies
//! - [`PromptBuilder`]: renders records into prompt text

mod prompt_builder;
mod prompt_client;

pub use prompt_builder::{
    PromptBuilder, DEFAULT_TONE, MAX_PROMPT_EVENTS, MAX_PROMPT_MESSAGES, PREVIEW_CHARS,
};
pub use prompt_client::{AssistantError, PromptClient, QUERY_MAX_TOKENS, REPLY_MAX_TOKENS};
