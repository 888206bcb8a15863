//! Prompt construction for mailbox queries and reply drafts.
//!
//! Rendering never fails: every missing field is replaced by its entry in
//! [`placeholders`](crate::domain::placeholders), and lists are capped before formatting.

use chrono::{Local, NaiveDateTime, TimeZone};

use crate::domain::placeholders::{
    NO_CONTENT, NO_LOCATION, NO_PREVIEW, NO_RECENT_EMAILS, NO_SENDER_NAME, NO_SUBJECT,
    NO_UPCOMING_EVENTS, UNKNOWN_DATE, UNKNOWN_SENDER,
};
use crate::domain::{EventRecord, EventTime, MessageRecord};

/// Messages rendered into a query prompt; the rest are dropped.
pub const MAX_PROMPT_MESSAGES: usize = 20;

/// Events rendered into a query prompt; the rest are dropped.
pub const MAX_PROMPT_EVENTS: usize = 10;

/// Characters of body preview kept per message.
pub const PREVIEW_CHARS: usize = 100;

/// Tone used when the caller does not name one.
pub const DEFAULT_TONE: &str = "professional";

const QUERY_PREAMBLE: &str = "You are an AI assistant helping to manage Microsoft 365 emails and calendar. Provide helpful, concise responses.";
const QUERY_CLOSING: &str =
    "Provide a helpful response to the user's query. Be specific and actionable.";
const REPLY_EXCLUDE_SUBJECT: &str = "Return only the email content without subject line.";

const DATE_FORMAT: &str = "%-m/%-d/%Y";
const TIME_FORMAT: &str = "%-I:%M:%S %p";
const DATE_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Builds prompt text, rendering timestamps as wall-clock time in `Tz`.
#[derive(Debug, Clone)]
pub struct PromptBuilder<Tz: TimeZone = Local> {
    tz: Tz,
}

impl Default for PromptBuilder<Local> {
    fn default() -> Self {
        Self { tz: Local }
    }
}

impl PromptBuilder<Local> {
    /// A builder rendering timestamps in the host's local zone.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<Tz: TimeZone> PromptBuilder<Tz> {
    /// A builder rendering timestamps in `tz`.
    pub fn with_timezone(tz: Tz) -> Self {
        Self { tz }
    }

    /// Prompt answering `query` over recent mail and, when any are given,
    /// upcoming events.
    pub fn query_prompt(
        &self,
        query: &str,
        messages: &[MessageRecord],
        events: Option<&[EventRecord]>,
    ) -> String {
        let mut prompt = format!(
            "{QUERY_PREAMBLE}\n\nUser Query: {query}\n\nRecent Email Data:\n{}",
            self.format_messages(messages)
        );

        if let Some(events) = events.filter(|e| !e.is_empty()) {
            prompt.push_str("\n\nUpcoming Calendar Events:\n");
            prompt.push_str(&self.format_events(events));
        }

        prompt.push_str("\n\n");
        prompt.push_str(QUERY_CLOSING);
        prompt
    }

    /// Numbered rendering of the first [`MAX_PROMPT_MESSAGES`] messages.
    pub fn format_messages(&self, messages: &[MessageRecord]) -> String {
        if messages.is_empty() {
            return NO_RECENT_EMAILS.to_string();
        }

        messages
            .iter()
            .take(MAX_PROMPT_MESSAGES)
            .enumerate()
            .map(|(index, message)| self.format_message(index + 1, message))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn format_message(&self, number: usize, message: &MessageRecord) -> String {
        let date = message
            .received_date_time
            .as_ref()
            .and_then(|ts| ts.to_wall_clock(&self.tz))
            .map(|dt| format!("{} {}", dt.format(DATE_FORMAT), dt.format(TIME_FORMAT)))
            .unwrap_or_else(|| UNKNOWN_DATE.to_string());

        format!(
            "{number}. From: {} <{}>\n   Subject: {}\n   Date: {date}\n   Read: {}\n   Preview: {}...",
            message.sender_name().unwrap_or(NO_SENDER_NAME),
            message.sender_address().unwrap_or(UNKNOWN_SENDER),
            message.subject.as_deref().unwrap_or(NO_SUBJECT),
            if message.read() { "Yes" } else { "No" },
            message
                .preview()
                .map(|p| truncate_chars(p, PREVIEW_CHARS))
                .unwrap_or(NO_PREVIEW),
        )
    }

    /// Numbered rendering of the first [`MAX_PROMPT_EVENTS`] events.
    pub fn format_events(&self, events: &[EventRecord]) -> String {
        if events.is_empty() {
            return NO_UPCOMING_EVENTS.to_string();
        }

        events
            .iter()
            .take(MAX_PROMPT_EVENTS)
            .enumerate()
            .map(|(index, event)| {
                format!(
                    "{}. {}\n   Start: {}\n   End: {}\n   Location: {}",
                    index + 1,
                    event.subject.as_deref().unwrap_or(NO_SUBJECT),
                    self.format_event_time(event.start.as_ref()),
                    self.format_event_time(event.end.as_ref()),
                    event.location_name().unwrap_or(NO_LOCATION),
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn format_event_time(&self, time: Option<&EventTime>) -> String {
        time.and_then(|t| t.to_wall_clock(&self.tz))
            .map(|dt: NaiveDateTime| dt.format(DATE_TIME_FORMAT).to_string())
            .unwrap_or_else(|| UNKNOWN_DATE.to_string())
    }

    /// Prompt asking for a reply to `original` in `tone`.
    pub fn reply_prompt(&self, original: &MessageRecord, context: &str, tone: &str) -> String {
        format!(
            "Generate a {tone} email response to the following email:

Original Email:
From: {} <{}>
Subject: {}
Content: {}

Additional Context: {context}

Generate an appropriate response that:
- Addresses the main points of the original email
- Maintains a {tone} tone
- Is concise but complete
- Includes a proper greeting and closing

{REPLY_EXCLUDE_SUBJECT}",
            original.sender_name().unwrap_or(NO_SENDER_NAME),
            original.sender_address().unwrap_or(UNKNOWN_SENDER),
            original.subject.as_deref().unwrap_or(NO_SUBJECT),
            original.content().unwrap_or(NO_CONTENT),
        )
    }
}

/// The first `max` characters of `text`.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
