//! Domain layer - Emotion distributions, stress scoring and credentials.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Nothing here performs I/O: classifier output arrives as already-fetched
//! JSON, and every scoring policy is a pure function of its input.

pub mod adapter;
pub mod constants;
pub mod credential;
pub mod emotion;
pub mod error;
pub mod password;
pub mod scoring;

pub use adapter::{normalize, SourceKind};
pub use constants::*;
pub use credential::Credential;
pub use emotion::{EmotionDistribution, EmotionLabel};
pub use error::{AdapterError, DomainError, DomainResult};
pub use password::Password;
pub use scoring::{
    KeywordPolicy, StressAssessment, StressInput, StressLevel, StressPolicy, StressReport,
    StressScore, WeightedEmotionPolicy,
};
