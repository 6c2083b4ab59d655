//! Generation Run — validates a request and drives the two-phase pipeline.
//!
//! Flow: generate_ideas (1 call) → for each idea, in order: expand_idea (1 call)
//!       → emit ContentBlock to the sink → next idea.
//!
//! Calls are strictly sequential. A model failure stops the run where it is;
//! blocks already emitted stay with the sink.

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

use crate::generation::expander::expand_idea;
use crate::generation::ideas::generate_ideas;
use crate::llm_client::{LlmError, TextModel};
use crate::models::content::{ContentBlock, RunSummary};
use crate::render::render_block;

pub const MIN_COUNT: i64 = 3;
pub const MAX_COUNT: i64 = 7;
pub const DEFAULT_COUNT: i64 = 5;

pub const EMPTY_INTERESTS_WARNING: &str = "Please enter some interests to generate content.";

#[derive(Debug, Error)]
pub enum GenerationError {
    /// Not a failure: the user has nothing to generate from yet.
    #[error("{}", EMPTY_INTERESTS_WARNING)]
    EmptyInterests,

    #[error("count must be between 3 and 7, got {0}")]
    InvalidCount(i64),

    #[error("Model call failed after {blocks_rendered} block(s): {source}")]
    Model {
        blocks_rendered: usize,
        #[source]
        source: LlmError,
    },
}

impl GenerationError {
    /// Text shown on the page for this outcome.
    pub fn notice(&self) -> String {
        match self {
            GenerationError::Model { source, .. } => format!("Error occurred: {source}"),
            other => other.to_string(),
        }
    }
}

/// Validated user input for one run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    interests: String,
    count: u8,
}

impl GenerationRequest {
    /// Interests are checked first so an empty form never reports a count problem.
    pub fn new(interests: impl Into<String>, count: i64) -> Result<Self, GenerationError> {
        let interests = interests.into();
        if interests.trim().is_empty() {
            return Err(GenerationError::EmptyInterests);
        }
        if !(MIN_COUNT..=MAX_COUNT).contains(&count) {
            return Err(GenerationError::InvalidCount(count));
        }
        Ok(Self {
            interests,
            count: count as u8,
        })
    }

    pub fn interests(&self) -> &str {
        &self.interests
    }

    pub fn count(&self) -> u8 {
        self.count
    }
}

/// Everything the display surface may receive during a run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationEvent {
    Block {
        #[serde(flatten)]
        block: ContentBlock,
        html: String,
    },
    Warning {
        message: String,
    },
    Error {
        message: String,
    },
    Done(RunSummary),
}

impl GenerationEvent {
    /// SSE event name.
    pub fn name(&self) -> &'static str {
        match self {
            GenerationEvent::Block { .. } => "block",
            GenerationEvent::Warning { .. } => "warning",
            GenerationEvent::Error { .. } => "error",
            GenerationEvent::Done(_) => "done",
        }
    }

    /// Maps a failed run to the single notification the user sees.
    pub fn from_error(err: &GenerationError) -> Self {
        match err {
            GenerationError::EmptyInterests => GenerationEvent::Warning {
                message: err.notice(),
            },
            _ => GenerationEvent::Error {
                message: err.notice(),
            },
        }
    }
}

/// Receives each block as soon as it is expanded.
pub trait BlockSink: Send {
    fn emit(&mut self, block: ContentBlock);
}

impl BlockSink for Vec<ContentBlock> {
    fn emit(&mut self, block: ContentBlock) {
        self.push(block);
    }
}

impl BlockSink for UnboundedSender<GenerationEvent> {
    fn emit(&mut self, block: ContentBlock) {
        let html = render_block(&block);
        if self.send(GenerationEvent::Block { block, html }).is_err() {
            debug!("Block receiver dropped; continuing run without a listener");
        }
    }
}

/// Runs one generation: 1 idea call, then one expansion call per idea.
pub async fn run_generation(
    model: &dyn TextModel,
    request: &GenerationRequest,
    sink: &mut dyn BlockSink,
) -> Result<RunSummary, GenerationError> {
    let run_id = Uuid::new_v4();
    let span = info_span!("generation_run", %run_id, count = request.count());

    async move {
        info!("Starting generation run");

        let ideas = generate_ideas(model, request.interests(), request.count())
            .await
            .map_err(|source| {
                error!("Idea generation failed: {source}");
                GenerationError::Model {
                    blocks_rendered: 0,
                    source,
                }
            })?;

        let ideas_parsed = ideas.len();
        let mut blocks_rendered = 0;

        for idea in ideas {
            let body = match expand_idea(model, &idea, request.interests()).await {
                Ok(body) => body,
                Err(source) => {
                    error!(
                        "Expansion of {:?} failed after {} block(s): {source}",
                        idea.title, blocks_rendered
                    );
                    return Err(GenerationError::Model {
                        blocks_rendered,
                        source,
                    });
                }
            };

            sink.emit(ContentBlock::from_idea(idea, body));
            blocks_rendered += 1;
        }

        info!(
            "Generation run complete: {} ideas, {} blocks",
            ideas_parsed, blocks_rendered
        );

        Ok(RunSummary {
            run_id,
            ideas_parsed,
            blocks_rendered,
            model_calls: 1 + ideas_parsed,
            finished_at: Utc::now(),
        })
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;

    const TWO_IDEAS: &str = "Title: Mars\nWhy: cool\n---\nTitle: Moon\nWhy: close\n---";

    #[test]
    fn test_empty_interests_rejected() {
        for interests in ["", "   ", "\n\t "] {
            assert!(matches!(
                GenerationRequest::new(interests, 5),
                Err(GenerationError::EmptyInterests)
            ));
        }
    }

    #[test]
    fn test_count_bounds() {
        assert!(GenerationRequest::new("ai", 3).is_ok());
        assert!(GenerationRequest::new("ai", 7).is_ok());
        assert!(matches!(
            GenerationRequest::new("ai", 2),
            Err(GenerationError::InvalidCount(2))
        ));
        assert!(matches!(
            GenerationRequest::new("ai", 8),
            Err(GenerationError::InvalidCount(8))
        ));
    }

    #[test]
    fn test_negative_count_rejected() {
        assert!(matches!(
            GenerationRequest::new("ai", -1),
            Err(GenerationError::InvalidCount(-1))
        ));
    }

    #[test]
    fn test_empty_interests_wins_over_bad_count() {
        assert!(matches!(
            GenerationRequest::new(" ", 99),
            Err(GenerationError::EmptyInterests)
        ));
    }

    #[test]
    fn test_empty_interests_maps_to_warning_event() {
        let event = GenerationEvent::from_error(&GenerationError::EmptyInterests);
        assert_eq!(event.name(), "warning");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["message"], EMPTY_INTERESTS_WARNING);
    }

    #[test]
    fn test_model_error_notice_includes_cause() {
        let err = GenerationError::Model {
            blocks_rendered: 1,
            source: LlmError::Api {
                status: 429,
                message: "quota exceeded".to_string(),
            },
        };
        assert_eq!(
            err.notice(),
            "Error occurred: API error (status 429): quota exceeded"
        );
        assert_eq!(GenerationEvent::from_error(&err).name(), "error");
    }

    #[test]
    fn test_block_event_serializes_flat() {
        let event = GenerationEvent::Block {
            block: ContentBlock {
                title: "Mars".to_string(),
                reason: "cool".to_string(),
                body: "Red.".to_string(),
            },
            html: "<div></div>".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "block");
        assert_eq!(json["title"], "Mars");
        assert_eq!(json["html"], "<div></div>");
    }

    #[tokio::test]
    async fn test_space_travel_run_expands_each_idea_once() {
        let model = ScriptedModel::new([Ok(TWO_IDEAS), Ok("Mars body"), Ok("Moon body")]);
        let request = GenerationRequest::new("space travel", 3).unwrap();
        let mut blocks: Vec<ContentBlock> = Vec::new();

        let summary = run_generation(&model, &request, &mut blocks).await.unwrap();

        assert_eq!(model.calls(), 3);
        assert_eq!(summary.ideas_parsed, 2);
        assert_eq!(summary.blocks_rendered, 2);
        assert_eq!(summary.model_calls, 3);
        assert_eq!(blocks[0].title, "Mars");
        assert_eq!(blocks[0].reason, "cool");
        assert_eq!(blocks[0].body, "Mars body");
        assert_eq!(blocks[1].title, "Moon");

        let prompts = model.prompts();
        assert!(prompts[0].contains("space travel"));
        assert!(prompts[1].contains(r#""Mars""#));
        assert!(prompts[2].contains(r#""Moon""#));
    }

    #[tokio::test]
    async fn test_failure_on_second_expansion_keeps_first_block() {
        let three = "Title: A\nWhy: a\n---\nTitle: B\nWhy: b\n---\nTitle: C\nWhy: c";
        let model = ScriptedModel::new([Ok(three), Ok("A body"), Err("boom"), Ok("never used")]);
        let request = GenerationRequest::new("letters", 3).unwrap();
        let mut blocks: Vec<ContentBlock> = Vec::new();

        let err = run_generation(&model, &request, &mut blocks).await.unwrap_err();

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "A");
        assert_eq!(model.calls(), 3, "no call after the failing one");
        match err {
            GenerationError::Model {
                blocks_rendered, ..
            } => assert_eq!(blocks_rendered, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_idea_failure_makes_no_expansion_calls() {
        let model = ScriptedModel::new([Err("unauthorized")]);
        let request = GenerationRequest::new("cooking", 5).unwrap();
        let mut blocks: Vec<ContentBlock> = Vec::new();

        let err = run_generation(&model, &request, &mut blocks).await.unwrap_err();

        assert!(blocks.is_empty());
        assert_eq!(model.calls(), 1);
        assert!(err.notice().contains("unauthorized"));
    }

    #[tokio::test]
    async fn test_unparseable_ideas_complete_with_no_blocks() {
        let model = ScriptedModel::new([Ok("I would rather not.")]);
        let request = GenerationRequest::new("cooking", 5).unwrap();
        let mut blocks: Vec<ContentBlock> = Vec::new();

        let summary = run_generation(&model, &request, &mut blocks).await.unwrap();

        assert_eq!(summary.blocks_rendered, 0);
        assert_eq!(summary.model_calls, 1);
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_block_count_never_exceeds_requested_count() {
        for count in MIN_COUNT..=MAX_COUNT {
            let raw: String = (0..10)
                .map(|i| format!("Title: T{i}\nWhy: R{i}\n---\n"))
                .collect();
            let mut script = vec![Ok(raw)];
            script.extend((0..10).map(|_| Ok("body".to_string())));
            let model = ScriptedModel::from_owned(script);
            let request = GenerationRequest::new("anything", count).unwrap();
            let mut blocks: Vec<ContentBlock> = Vec::new();

            run_generation(&model, &request, &mut blocks).await.unwrap();

            assert_eq!(blocks.len(), count as usize);
            assert_eq!(model.calls(), 1 + count as usize);
        }
    }

    #[tokio::test]
    async fn test_channel_sink_streams_rendered_blocks() {
        let model = ScriptedModel::new([Ok(TWO_IDEAS), Ok("Mars body"), Ok("Moon body")]);
        let request = GenerationRequest::new("space travel", 3).unwrap();
        let (mut tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<GenerationEvent>();

        run_generation(&model, &request, &mut tx).await.unwrap();
        drop(tx);

        let mut titles = Vec::new();
        while let Some(event) = rx.recv().await {
            match event {
                GenerationEvent::Block { block, html } => {
                    assert!(html.contains(&block.title));
                    titles.push(block.title);
                }
                other => panic!("unexpected event: {other:?}"),
            }
        }
        assert_eq!(titles, vec!["Mars", "Moon"]);
    }
}
