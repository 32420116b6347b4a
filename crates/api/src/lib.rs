//! Mental wellness API library.
//!
//! Scores stress from face images, free text and chat messages by routing
//! each input through an external classifier, normalizing its output into
//! an emotion distribution and applying a scoring policy. Also keeps a small
//! username/password store.

pub mod cli;
pub mod clients;
pub mod commands;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod infra;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
