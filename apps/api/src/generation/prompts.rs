// All LLM prompt constants for the Generation module.
// Responses are plain delimited text, not JSON — see idea_parser.rs for the contract.

/// Record delimiter the idea prompt asks the model to use between entries.
pub const IDEA_DELIMITER: &str = "---";
pub const TITLE_PREFIX: &str = "Title:";
pub const REASON_PREFIX: &str = "Why:";

/// Idea generation prompt template. Replace `{interests}` and `{count}` before sending.
pub const IDEA_PROMPT_TEMPLATE: &str = r#"You are a content creator AI.

User interests: {interests}

Based on this, generate {count} content titles that would be engaging and informative.
For each, also provide a brief explanation of why it suits the user's interests.

Format:
Title: <title>
Why: <reason>
---
"#;

/// Article expansion prompt template. Replace `{title}` and `{interests}` before sending.
pub const CONTENT_PROMPT_TEMPLATE: &str = r#"Write a short engaging blog-style content (100-150 words) on the topic: "{title}".
Make it valuable for a person interested in: {interests}.
Use a friendly tone and keep it clear and informative.
"#;
