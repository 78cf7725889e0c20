//! genie-relay: streaming HTTP relay for a coding-focused LLM assistant.
//!
//! Accepts a natural-language coding query over a single HTTP endpoint,
//! forwards it to the Groq chat-completion API with a fixed system prompt,
//! and streams the generated text back to the caller as it arrives.
//!
//! Every request is independent: one upstream completion call, one
//! forward-only fragment stream, no state shared across requests.

pub mod config;
pub mod relay;
pub mod server;
