//! SeaORM entity definitions, kept separate from domain types.

pub mod credential;
