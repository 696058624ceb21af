//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the shared tutor
//! service handed to every handler.

use kai_core::Tutor;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub tutor: Arc<Tutor>,
}
