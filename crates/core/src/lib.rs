//! StudySnaps tutoring core.
//!
//! Session/history management and the structured-output completion loop
//! behind the tutor service: building multimodal turns, keeping bounded
//! per-session histories, calling the completion endpoint with a strict
//! response schema, and deciding whether a tutoring session continues or
//! ends. Transport and wire schemas live in the service crate.

pub mod engine;
pub mod gateway;
pub mod history;
pub mod turn;

pub use engine::{FALLBACK_REPLY, StepError, TutorEngine};
pub use gateway::{CompletionGateway, OpenAICompatibleGateway, TutorVerdict};
pub use history::HistoryStore;
pub use turn::{ContentPart, Role, Turn};
