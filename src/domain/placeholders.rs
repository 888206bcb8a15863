//! Placeholder text substituted for missing record fields.

/// Sender address is missing or empty.
pub const UNKNOWN_SENDER: &str = "Unknown sender";

/// Sender display name is missing.
pub const NO_SENDER_NAME: &str = "";

/// Subject is missing.
pub const NO_SUBJECT: &str = "No subject";

/// Body preview is missing or empty.
pub const NO_PREVIEW: &str = "No preview";

/// Neither a full body nor a preview is available.
pub const NO_CONTENT: &str = "No content";

/// Timestamp is missing or cannot be parsed.
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Event location is missing or empty.
pub const NO_LOCATION: &str = "No location";

/// The message list is empty.
pub const NO_RECENT_EMAILS: &str = "No recent emails found.";

/// The event list is empty.
pub const NO_UPCOMING_EVENTS: &str = "No upcoming events found.";
