//! LLM provider abstraction layer.
//!
//! This module provides a trait-based abstraction for LLM providers, so the
//! emotion pipeline can talk to any chat-completions backend (OpenRouter,
//! OpenAI, a local vLLM, or a scripted provider in tests).

mod openai;
mod provider;
#[cfg(test)]
pub(crate) mod scripted;
mod types;

pub use openai::{ApiKeySource, OpenAIProvider};
pub use provider::{CompletionOptions, LlmError, LlmProvider};
pub use types::{CompletionResponse, FinishReason, Message, MessageRole};
