use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One title + rationale pair extracted from the idea-generation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaRecord {
    pub title: String,
    pub reason: String,
}

/// An expanded idea, ready to be rendered as a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub title: String,
    pub reason: String,
    pub body: String,
}

impl ContentBlock {
    pub fn from_idea(idea: IdeaRecord, body: String) -> Self {
        Self {
            title: idea.title,
            reason: idea.reason,
            body,
        }
    }
}

/// Bookkeeping for a run that finished without a model failure.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub ideas_parsed: usize,
    pub blocks_rendered: usize,
    /// 1 idea call + one expansion call per parsed idea.
    pub model_calls: usize,
    pub finished_at: DateTime<Utc>,
}
