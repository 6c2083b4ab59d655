//! Axum route handlers for the Generation API.

use std::convert::Infallible;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{self, Stream};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::pipeline::{
    run_generation, GenerationError, GenerationEvent, GenerationRequest, DEFAULT_COUNT,
};
use crate::models::content::{ContentBlock, RunSummary};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

fn default_count() -> i64 {
    DEFAULT_COUNT
}

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    #[serde(default)]
    pub interests: String,
    #[serde(default = "default_count")]
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    Warning,
    Error,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub blocks: Vec<ContentBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RunSummary>,
}

impl GenerateResponse {
    fn warning(err: &GenerationError) -> Self {
        Self {
            status: RunStatus::Warning,
            notice: Some(err.notice()),
            blocks: Vec::new(),
            summary: None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate
///
/// Runs the whole pipeline and returns every block produced. Empty interests and
/// model failures are run outcomes (200 with `status`); only a bad count is a 400.
pub async fn handle_generate(
    State(state): State<AppState>,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    let request = match GenerationRequest::new(body.interests, body.count) {
        Ok(request) => request,
        Err(err @ GenerationError::EmptyInterests) => {
            info!("Generation skipped: empty interests");
            return Ok(Json(GenerateResponse::warning(&err)));
        }
        Err(err) => return Err(AppError::Validation(err.to_string())),
    };

    let mut blocks: Vec<ContentBlock> = Vec::new();
    let response = match run_generation(state.llm.as_ref(), &request, &mut blocks).await {
        Ok(summary) => GenerateResponse {
            status: RunStatus::Completed,
            notice: None,
            blocks,
            summary: Some(summary),
        },
        Err(err) => GenerateResponse {
            status: RunStatus::Error,
            notice: Some(err.notice()),
            blocks,
            summary: None,
        },
    };

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    #[serde(default)]
    pub interests: String,
    pub count: Option<i64>,
}

/// GET /api/v1/generate/stream?interests=..&count=..
///
/// Server-sent events: one `block` per card as soon as it is expanded, then a
/// single `done`, `warning` or `error` event.
pub async fn handle_generate_stream(
    State(state): State<AppState>,
    query: Result<Query<StreamQuery>, QueryRejection>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::unbounded_channel::<GenerationEvent>();

    let request = query
        .map_err(|rejection| GenerationEvent::Error {
            message: rejection.body_text(),
        })
        .and_then(|Query(query)| {
            GenerationRequest::new(query.interests, query.count.unwrap_or(DEFAULT_COUNT))
                .map_err(|err| GenerationEvent::from_error(&err))
        });

    match request {
        Ok(request) => {
            let llm = state.llm.clone();
            tokio::spawn(async move {
                let mut tx = tx;
                let last = match run_generation(llm.as_ref(), &request, &mut tx).await {
                    Ok(summary) => GenerationEvent::Done(summary),
                    Err(err) => GenerationEvent::from_error(&err),
                };
                if tx.send(last).is_err() {
                    warn!("Stream client disconnected before the run finished");
                }
            });
        }
        Err(event) => {
            // Single event; the channel closes when `tx` drops at the end of this handler.
            if tx.send(event).is_err() {
                warn!("Stream receiver dropped before the rejection event was sent");
            }
        }
    }

    let events = stream::unfold(rx, |mut rx| async move {
        let event = rx.recv().await?;
        let data = serde_json::to_string(&event).unwrap_or_else(|e| {
            warn!("Failed to serialize {} event: {e}", event.name());
            String::new()
        });
        let sse = Event::default().event(event.name()).data(data);
        Some((Ok::<_, Infallible>(sse), rx))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::pipeline::EMPTY_INTERESTS_WARNING;

    #[test]
    fn test_generate_body_defaults_count() {
        let body: GenerateBody = serde_json::from_str(r#"{"interests": "AI"}"#).unwrap();
        assert_eq!(body.count, DEFAULT_COUNT);
    }

    #[test]
    fn test_generate_body_missing_interests_is_empty() {
        let body: GenerateBody = serde_json::from_str(r#"{"count": 4}"#).unwrap();
        assert!(body.interests.is_empty());
        assert_eq!(body.count, 4);
    }

    #[test]
    fn test_warning_response_shape() {
        let response = GenerateResponse::warning(&GenerationError::EmptyInterests);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "warning");
        assert_eq!(json["notice"], EMPTY_INTERESTS_WARNING);
        assert_eq!(json["blocks"], serde_json::json!([]));
        assert!(json.get("summary").is_none());
    }
}
