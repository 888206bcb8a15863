//! External service providers.
//!
//! - [`ai`] - AI/LLM providers (Anthropic)

pub mod ai;
