//! Content Expander — turns one idea into a short article body.

use tracing::debug;

use crate::generation::prompts::CONTENT_PROMPT_TEMPLATE;
use crate::llm_client::{LlmError, TextModel};
use crate::models::content::IdeaRecord;

/// One model call per idea; the returned body is trimmed.
pub async fn expand_idea(
    model: &dyn TextModel,
    idea: &IdeaRecord,
    interests: &str,
) -> Result<String, LlmError> {
    let prompt = build_content_prompt(&idea.title, interests);
    let body = model.generate(&prompt).await?;
    debug!("Expanded {:?} into {} chars", idea.title, body.len());
    Ok(body.trim().to_string())
}

fn build_content_prompt(title: &str, interests: &str) -> String {
    CONTENT_PROMPT_TEMPLATE
        .replace("{title}", title)
        .replace("{interests}", interests)
}
