//! Completion relay against the Groq chat-completion API.
//!
//! - [`prompt`]: Fixed system instruction and sampling parameters
//! - [`client`]: Streaming chat-completion client and fragment stream

pub mod client;
pub mod prompt;
