//! AI/LLM provider implementations.
//!
//! The [`LlmProvider`] trait is the seam between prompt construction and the
//! network. [`AnthropicProvider`] talks to Anthropic's Messages API; tests
//! substitute their own implementation.
//!
//! # Example
//!
//! ```rust,no_run
//! use mailmind::providers::ai::{AnthropicProvider, CompletionRequest, LlmProvider};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let anthropic = AnthropicProvider::new(Some("sk-ant-...".into()), "claude-sonnet-4-20250514");
//!
//! let request = CompletionRequest::single_turn("Hello!").with_max_tokens(100);
//! let response = anthropic.complete(&request).await?;
//! println!("Response: {}", response.text);
//! # Ok(())
//! # }
//! ```

mod anthropic;
mod traits;

pub use anthropic::{AnthropicProvider, ANTHROPIC_API_URL, ANTHROPIC_VERSION};
pub use traits::{
    CompletionRequest, CompletionResponse, FinishReason, LlmError, LlmProvider, LlmResult,
    Message, Role, TokenUsage,
};

#[cfg(test)]
pub(crate) use traits::MockLlmProvider;
