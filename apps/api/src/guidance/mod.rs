// Guidance: prompt construction, interaction workflows and their HTTP handlers.
// All model calls go through llm_client; nothing here talks to the provider directly.

pub mod handlers;
pub mod prompts;
pub mod render;
pub mod workflows;
