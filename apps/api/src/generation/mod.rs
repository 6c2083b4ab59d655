// Content generation: idea proposal → per-idea expansion → streamed cards.
// All model calls go through the TextModel trait in llm_client.

pub mod expander;
pub mod handlers;
pub mod idea_parser;
pub mod ideas;
pub mod pipeline;
pub mod prompts;
