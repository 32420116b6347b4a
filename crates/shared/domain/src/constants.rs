//! Domain-level constants.
//!
//! These constants define scoring rules and validation requirements.

use crate::emotion::EmotionLabel;

// =============================================================================
// Stress Scoring
// =============================================================================

/// Upper bound of every stress score
pub const MAX_STRESS_SCORE: f64 = 100.0;

/// Lower bound of every stress score
pub const MIN_STRESS_SCORE: f64 = 0.0;

/// Emotions that contribute to the weighted stress score by default
pub const DEFAULT_NEGATIVE_EMOTIONS: &[EmotionLabel] = &[
    EmotionLabel::Sadness,
    EmotionLabel::Anger,
    EmotionLabel::Fear,
];

/// Weight applied to each default negative emotion
pub const DEFAULT_NEGATIVE_WEIGHT: f64 = 1.0;

/// Scores at or above this value are reported as high stress
pub const DEFAULT_HIGH_STRESS_THRESHOLD: f64 = 50.0;

/// Keywords treated as stress-indicative by the keyword policy
pub const STRESS_KEYWORDS: &[&str] = &[
    "stress",
    "anxiety",
    "depressed",
    "overwhelmed",
    "sad",
    "angry",
    "frustrated",
];

/// Points added per distinct keyword found
pub const KEYWORD_SCORE_STEP: f64 = 20.0;

// =============================================================================
// Credentials
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum username length
pub const MAX_USERNAME_LENGTH: usize = 64;
