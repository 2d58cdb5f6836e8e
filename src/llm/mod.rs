//! LLM integration module

pub mod gateway;
pub mod prompts;

pub use gateway::{GeminiClient, LlmGateway};
pub use prompts::{PromptKind, PromptParams, PromptTemplates};
