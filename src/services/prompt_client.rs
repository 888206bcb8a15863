//! Prompt client for mailbox questions and reply drafts.
//!
//! The [`PromptClient`] renders caller-supplied records into a prompt, sends it
//! as a single user turn, and returns the first generated text segment. Each
//! operation makes exactly one request; there is no retry.

use std::sync::Arc;

use thiserror::Error;

use super::prompt_builder::{PromptBuilder, DEFAULT_TONE};
use crate::config::AssistantSettings;
use crate::domain::{EventRecord, MessageRecord};
use crate::providers::ai::{AnthropicProvider, CompletionRequest, LlmError, LlmProvider};

/// Token budget for answering a mailbox query.
pub const QUERY_MAX_TOKENS: usize = 1500;

/// Token budget for drafting a reply.
pub const REPLY_MAX_TOKENS: usize = 800;

/// Caller-facing failures.
///
/// The display text is fixed; the provider error is kept as the source.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("AI processing failed")]
    QueryProcessingFailure(#[source] LlmError),

    #[error("Failed to generate email response")]
    ReplyGenerationFailure(#[source] LlmError),
}

/// Sends mailbox prompts to an LLM provider.
pub struct PromptClient {
    provider: Arc<dyn LlmProvider>,
    prompts: PromptBuilder,
}

impl PromptClient {
    /// Creates a client talking to Anthropic with the given settings.
    ///
    /// A missing API key is not an error here; it fails the first request.
    pub fn new(settings: &AssistantSettings) -> Self {
        Self::with_provider(Arc::new(AnthropicProvider::from_settings(settings)))
    }

    /// Creates a client over any provider.
    pub fn with_provider(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            prompts: PromptBuilder::new(),
        }
    }

    /// Answers `query` using recent messages and, optionally, upcoming events.
    ///
    /// Messages are rendered in the order given; at most 20 messages and 10
    /// events are included.
    pub async fn answer_query(
        &self,
        query: &str,
        messages: &[MessageRecord],
        events: Option<&[EventRecord]>,
    ) -> Result<String, AssistantError> {
        let prompt = self.prompts.query_prompt(query, messages, events);
        let request = CompletionRequest::single_turn(prompt).with_max_tokens(QUERY_MAX_TOKENS);

        match self.provider.complete(&request).await {
            Ok(response) => Ok(response.text),
            Err(e) => {
                tracing::error!(error = %e, "Error processing email query");
                Err(AssistantError::QueryProcessingFailure(e))
            }
        }
    }

    /// Drafts a reply to `original`.
    ///
    /// `context` defaults to empty and `tone` to "professional". The generated
    /// text is the reply body only.
    pub async fn draft_reply(
        &self,
        original: &MessageRecord,
        context: Option<&str>,
        tone: Option<&str>,
    ) -> Result<String, AssistantError> {
        let prompt = self.prompts.reply_prompt(
            original,
            context.unwrap_or_default(),
            tone.unwrap_or(DEFAULT_TONE),
        );
        let request = CompletionRequest::single_turn(prompt).with_max_tokens(REPLY_MAX_TOKENS);

        match self.provider.complete(&request).await {
            Ok(response) => Ok(response.text),
            Err(e) => {
                tracing::error!(error = %e, "Error generating email response");
                Err(AssistantError::ReplyGenerationFailure(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, EventTime};
    use crate::providers::ai::{CompletionResponse, MockLlmProvider, Role};
    use std::error::Error as _;

    fn client(mock: MockLlmProvider) -> PromptClient {
        PromptClient::with_provider(Arc::new(mock))
    }

    fn prompt_of(request: &CompletionRequest) -> &str {
        &request.messages[0].content
    }

    #[tokio::test]
    async fn answer_query_returns_first_segment_text() {
        let mut mock = MockLlmProvider::new();
        mock.expect_complete()
            .times(1)
            .returning(|_| Ok(CompletionResponse::text("Hello")));

        let answer = client(mock).answer_query("test", &[], None).await.unwrap();
        assert_eq!(answer, "Hello");
    }

    #[tokio::test]
    async fn answer_query_sends_one_user_turn_with_query_budget() {
        let mut mock = MockLlmProvider::new();
        mock.expect_complete()
            .withf(|request| {
                request.max_tokens == Some(QUERY_MAX_TOKENS)
                    && request.messages.len() == 1
                    && request.messages[0].role == Role::User
            })
            .times(1)
            .returning(|_| Ok(CompletionResponse::text("ok")));

        client(mock).answer_query("q", &[], None).await.unwrap();
    }

    #[tokio::test]
    async fn answer_query_prompt_includes_query_messages_and_events() {
        let mut mock = MockLlmProvider::new();
        mock.expect_complete()
            .withf(|request| {
                let prompt = prompt_of(request);
                prompt.contains("User Query: Which meetings clash?")
                    && prompt.contains("1. From: Dana <dana@example.com>")
                    && prompt.contains("Upcoming Calendar Events:\n1. Standup")
                    && prompt.ends_with("Be specific and actionable.")
            })
            .times(1)
            .returning(|_| Ok(CompletionResponse::text("ok")));

        let messages = [MessageRecord::new().with_sender(Address::with_name("dana@example.com", "Dana"))];
        let events = [EventRecord::new("Standup").with_times(
            EventTime::new("2024-05-02T09:00:00"),
            EventTime::new("2024-05-02T09:15:00"),
        )];

        client(mock)
            .answer_query("Which meetings clash?", &messages, Some(&events[..]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn answer_query_failure_is_generic() {
        let mut mock = MockLlmProvider::new();
        mock.expect_complete().times(1).returning(|_| {
            Err(LlmError::ApiError {
                status: 500,
                message: "overloaded".to_string(),
            })
        });

        let err = client(mock).answer_query("test", &[], None).await.unwrap_err();

        assert_eq!(err.to_string(), "AI processing failed");
        assert!(matches!(err, AssistantError::QueryProcessingFailure(_)));
        assert!(!err.to_string().contains("overloaded"));
        let source = err.source().unwrap().to_string();
        assert!(source.contains("overloaded"));
    }

    #[tokio::test]
    async fn draft_reply_returns_first_segment_text() {
        let mut mock = MockLlmProvider::new();
        mock.expect_complete()
            .withf(|request| request.max_tokens == Some(REPLY_MAX_TOKENS))
            .times(1)
            .returning(|_| Ok(CompletionResponse::text("Hi Dana,\n\nSounds good.\n\nBest")));

        let original = MessageRecord::new().with_subject("Lunch?").with_preview("Free Friday?");
        let reply = client(mock).draft_reply(&original, None, None).await.unwrap();
        assert_eq!(reply, "Hi Dana,\n\nSounds good.\n\nBest");
    }

    #[tokio::test]
    async fn draft_reply_defaults_tone_and_context() {
        let mut mock = MockLlmProvider::new();
        mock.expect_complete()
            .withf(|request| {
                let prompt = prompt_of(request);
                prompt.starts_with("Generate a professional email response")
                    && prompt.contains("Additional Context: \n")
                    && prompt.contains("Return only the email content without subject line.")
            })
            .times(1)
            .returning(|_| Ok(CompletionResponse::text("ok")));

        client(mock)
            .draft_reply(&MessageRecord::new(), None, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn draft_reply_uses_given_tone_and_context() {
        let mut mock = MockLlmProvider::new();
        mock.expect_complete()
            .withf(|request| {
                let prompt = prompt_of(request);
                prompt.starts_with("Generate a casual email response")
                    && prompt.contains("- Maintains a casual tone")
                    && prompt.contains("Additional Context: Decline politely\n")
            })
            .times(1)
            .returning(|_| Ok(CompletionResponse::text("ok")));

        client(mock)
            .draft_reply(&MessageRecord::new(), Some("Decline politely"), Some("casual"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn draft_reply_failure_is_generic() {
        let mut mock = MockLlmProvider::new();
        mock.expect_complete()
            .times(1)
            .returning(|_| Err(LlmError::InvalidResponse("response has no content".to_string())));

        let err = client(mock)
            .draft_reply(&MessageRecord::new(), None, None)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to generate email response");
        assert!(matches!(err, AssistantError::ReplyGenerationFailure(_)));
    }

    #[tokio::test]
    async fn missing_key_fails_at_call_time_not_construction() {
        let settings = AssistantSettings::default().with_endpoint("http://127.0.0.1:1/v1/messages");
        let client = PromptClient::new(&settings);

        let err = client.answer_query("test", &[], None).await.unwrap_err();
        assert_eq!(err.to_string(), "AI processing failed");
        assert!(matches!(
            err.source().and_then(|s| s.downcast_ref::<LlmError>()),
            Some(LlmError::AuthenticationError(_))
        ));
    }
}
