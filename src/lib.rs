//! mailmind - LLM answers over mailbox and calendar data
//!
//! This crate renders email messages and calendar events into prompts, sends
//! them to a text-generation endpoint, and returns the generated text.

pub mod config;
pub mod domain;
pub mod providers;
pub mod services;

pub use config::AssistantSettings;
pub use services::{AssistantError, PromptClient};
