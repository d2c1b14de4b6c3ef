//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds all shared,
//! clonable resources created once at startup and passed to all handlers.

use crate::config::Config;
use std::sync::Arc;
use studysnaps_core::TutorEngine;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<TutorEngine>,
    pub config: Arc<Config>,
}
