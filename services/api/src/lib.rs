//! Mentor Kai API Library Crate
//!
//! This library contains the web layer of the tutor service: configuration,
//! startup loaders, application state, API handlers, request models and routing. The `api`
//! binary is a thin wrapper around this library.

pub mod config;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod router;
pub mod state;
