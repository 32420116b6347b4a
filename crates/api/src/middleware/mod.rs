//! Cross-cutting HTTP layers.

mod cors;

pub use cors::cors_layer;
