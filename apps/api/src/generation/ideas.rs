//! Idea Generator — one model call that proposes `count` titles with rationales.

use tracing::{debug, info};

use crate::generation::idea_parser::parse_ideas;
use crate::generation::prompts::IDEA_PROMPT_TEMPLATE;
use crate::llm_client::{LlmError, TextModel};
use crate::models::content::IdeaRecord;

/// Asks the model for ideas and parses whatever comes back.
///
/// Never fails on malformed output; at most `count` records are returned even
/// if the model produced more.
pub async fn generate_ideas(
    model: &dyn TextModel,
    interests: &str,
    count: u8,
) -> Result<Vec<IdeaRecord>, LlmError> {
    let prompt = build_idea_prompt(interests, count);
    let raw = model.generate(&prompt).await?;

    let mut ideas = parse_ideas(&raw);
    debug!("Parsed {} ideas from {} bytes of model output", ideas.len(), raw.len());
    ideas.truncate(count as usize);

    info!("Idea generation produced {}/{} ideas", ideas.len(), count);
    Ok(ideas)
}

fn build_idea_prompt(interests: &str, count: u8) -> String {
    IDEA_PROMPT_TEMPLATE
        .replace("{count}", &count.to_string())
        .replace("{interests}", interests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;

    #[test]
    fn test_prompt_embeds_interests_and_count() {
        let prompt = build_idea_prompt("space travel", 4);
        assert!(prompt.contains("User interests: space travel"));
        assert!(prompt.contains("generate 4 content titles"));
        assert!(prompt.contains("Title: <title>\nWhy: <reason>\n---"));
    }

    #[test]
    fn test_interests_containing_placeholder_text_is_not_rewritten() {
        let prompt = build_idea_prompt("the word {count}", 3);
        assert!(prompt.contains("User interests: the word {count}"));
    }

    #[tokio::test]
    async fn test_generate_ideas_makes_one_call() {
        let model = ScriptedModel::new([Ok("Title: Mars\nWhy: cool\n---\nTitle: Moon\nWhy: close\n---")]);
        let ideas = generate_ideas(&model, "space travel", 3).await.unwrap();
        assert_eq!(ideas.len(), 2);
        assert_eq!(ideas[0].title, "Mars");
        assert_eq!(ideas[1].reason, "close");
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_surplus_ideas_truncated_to_count() {
        let model = ScriptedModel::new([Ok(
            "Title: A\nWhy: a\n---\nTitle: B\nWhy: b\n---\nTitle: C\nWhy: c\n---\nTitle: D\nWhy: d",
        )]);
        let ideas = generate_ideas(&model, "letters", 3).await.unwrap();
        let titles: Vec<_> = ideas.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let model = ScriptedModel::new([Err("quota exceeded")]);
        let err = generate_ideas(&model, "anything", 5).await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }
}
