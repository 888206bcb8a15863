//! Domain types for mailbox and calendar records.
//!
//! Records are caller-supplied and read-only. Every field is optional, and
//! the [`placeholders`] module names the text rendered in place of a missing
//! one.

mod email;
mod event;
pub mod placeholders;
mod types;

pub use email::{Address, ItemBody, MessageRecord, Recipient};
pub use event::{EventRecord, EventTime, Location};
pub use types::Timestamp;
