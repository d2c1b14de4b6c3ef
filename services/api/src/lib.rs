//! StudySnaps API Library Crate
//!
//! This library contains the service surface of the tutor: configuration,
//! wire models, protocol handlers, static course content, and routing.
//! The `api` binary is a thin wrapper around this library.

pub mod config;
pub mod course;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
