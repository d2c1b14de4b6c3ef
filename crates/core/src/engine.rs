//! The tutoring step orchestrator.
//!
//! `TutorEngine` ties the turn builder, history store, and completion
//! gateway together: one step appends the student's turn, runs one
//! windowed completion, records the tutor's reply, and either keeps the
//! session alive or clears it when the problem is solved. This is the only
//! place in the core with a state transition.

use crate::gateway::{CompletionGateway, TutorVerdict};
use crate::history::HistoryStore;
use crate::turn::Turn;
use std::sync::Arc;
use tracing::{error, info};

/// Reply used whenever a completion could not be obtained. The service
/// always answers the student, even when the endpoint is down.
pub const FALLBACK_REPLY: &str =
    "I am afraid something went wrong and I am unable to answer your question at the moment";

/// Step input the orchestrator refuses to forward.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("a step requires text or an image reference")]
    EmptyInput,
}

/// Drives one tutoring step or free-form chat turn per call.
pub struct TutorEngine {
    store: HistoryStore,
    gateway: Arc<dyn CompletionGateway>,
    system_prompt: String,
}

impl TutorEngine {
    /// Assembles the engine from its collaborators. The store and gateway
    /// are built once at process start; nothing here is global.
    pub fn new(
        store: HistoryStore,
        gateway: Arc<dyn CompletionGateway>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            store,
            gateway,
            system_prompt: system_prompt.into(),
        }
    }

    /// The session map, exposed for the service layer and tests.
    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Runs one tutoring step for `session_id`.
    ///
    /// The per-session lock is held across the whole step, so steps on the
    /// same identifier never interleave, and a step that waited out a
    /// completing step starts against the fresh session rather than the
    /// terminated one's history. A gateway failure is recovered into a
    /// non-completing fallback verdict; the session stays active and the
    /// failed exchange leaves no assistant turn behind.
    pub async fn run_step(
        &self,
        session_id: &str,
        text: &str,
        image_url: Option<&str>,
    ) -> Result<TutorVerdict, StepError> {
        let turn = Turn::user_step(text, image_url);
        if turn.content.is_empty() {
            return Err(StepError::EmptyInput);
        }

        let mut turns = self.store.acquire(session_id).await;
        turns.push(turn);

        let windowed = self.store.window(&turns);
        match self.gateway.complete_step(windowed).await {
            Ok(verdict) => {
                turns.push(Turn::assistant(&verdict.answer_value));
                if verdict.solving_completed {
                    info!(session_id, "Problem solved, clearing session");
                    self.store.remove(session_id).await;
                }
                Ok(verdict)
            }
            Err(err) => {
                error!(session_id, error = ?err, "Completion call failed during step");
                Ok(TutorVerdict {
                    answer_value: FALLBACK_REPLY.to_string(),
                    solving_completed: false,
                })
            }
        }
    }

    /// Runs one free-form chat turn. No history is kept and nothing can
    /// fail outward: any error degrades to the fixed fallback reply.
    pub async fn run_chat(&self, text: &str) -> String {
        match self
            .gateway
            .complete_chat(self.system_prompt.clone(), text.to_string())
            .await
        {
            Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
            Ok(_) => FALLBACK_REPLY.to_string(),
            Err(err) => {
                error!(error = ?err, "Chat completion failed");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}
