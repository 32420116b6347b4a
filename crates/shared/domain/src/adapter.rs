//! Emotion distribution adapter.
//!
//! Face and text classifiers disagree on output shape:
//! - face classifiers report a dominant label plus optional per-label
//!   scores, either as one object or a one-element list of objects
//! - text classifiers report an ordered `[{label, score}]` list, sometimes
//!   wrapped in an outer list with one entry per input
//!
//! [`normalize`] turns either shape into an [`EmotionDistribution`] or fails
//! with [`AdapterError`]. It never falls back to a neutral distribution.
//! Scores are taken as given; converting a classifier's percent scale is the
//! client's job.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::emotion::{EmotionDistribution, EmotionLabel};
use crate::error::AdapterError;

/// Which classifier produced a raw output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    FaceClassifier,
    TextClassifier,
}

impl SourceKind {
    /// Render a canonical label in this source's own vocabulary.
    ///
    /// Face classifiers speak in adjectives (`happy`, `sad`); the text
    /// emotion model uses nouns but says `joy` for happiness.
    pub fn label_name(&self, label: EmotionLabel) -> &'static str {
        match (self, label) {
            (SourceKind::FaceClassifier, EmotionLabel::Anger) => "angry",
            (SourceKind::FaceClassifier, EmotionLabel::Happiness) => "happy",
            (SourceKind::FaceClassifier, EmotionLabel::Sadness) => "sad",
            (SourceKind::TextClassifier, EmotionLabel::Happiness) => "joy",
            (_, other) => other.as_str(),
        }
    }

    /// A distribution keyed by this source's own label names.
    pub fn render(&self, emotions: &EmotionDistribution) -> BTreeMap<String, f64> {
        emotions
            .iter()
            .map(|(label, confidence)| (self.label_name(label).to_string(), confidence))
            .collect()
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::FaceClassifier => f.write_str("face classifier"),
            SourceKind::TextClassifier => f.write_str("text classifier"),
        }
    }
}

/// One face analysis result
#[derive(Debug, Deserialize)]
struct FaceOutput {
    dominant_emotion: String,
    #[serde(default)]
    emotion: Option<BTreeMap<String, f64>>,
}

/// One `{label, score}` pair from a text classifier
#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// Normalize raw classifier JSON into a canonical distribution.
pub fn normalize(raw: &Value, source: SourceKind) -> Result<EmotionDistribution, AdapterError> {
    match source {
        SourceKind::FaceClassifier => normalize_face(raw),
        SourceKind::TextClassifier => normalize_text(raw),
    }
}

fn normalize_face(raw: &Value) -> Result<EmotionDistribution, AdapterError> {
    let source = SourceKind::FaceClassifier;

    let item = match raw {
        Value::Array(items) => items.first().ok_or(AdapterError::Empty { origin: source })?,
        Value::Null => return Err(AdapterError::Empty { origin: source }),
        other => other,
    };

    let output: FaceOutput = serde_json::from_value(item.clone())
        .map_err(|e| AdapterError::malformed(source, e.to_string()))?;

    if output.dominant_emotion.trim().is_empty() {
        return Err(AdapterError::malformed(source, "dominant_emotion is empty"));
    }
    let dominant = parse_label(&output.dominant_emotion, source)?;

    let scores = match output.emotion {
        Some(scores) if !scores.is_empty() => scores,
        _ => return Ok(EmotionDistribution::single(dominant)),
    };

    let mut entries = Vec::with_capacity(scores.len());
    for (name, score) in scores {
        entries.push((parse_label(&name, source)?, check_score(&name, score, source)?));
    }

    EmotionDistribution::from_entries(entries).ok_or(AdapterError::Empty { origin: source })
}

fn normalize_text(raw: &Value) -> Result<EmotionDistribution, AdapterError> {
    let source = SourceKind::TextClassifier;

    let items = match raw {
        Value::Array(items) => items,
        Value::Null => return Err(AdapterError::Empty { origin: source }),
        _ => return Err(AdapterError::malformed(source, "expected a list of label scores")),
    };

    // Batched responses carry one inner list per input; only one input is sent
    let items = match items.first() {
        Some(Value::Array(inner)) => inner,
        Some(_) => items,
        None => return Err(AdapterError::Empty { origin: source }),
    };
    if items.is_empty() {
        return Err(AdapterError::Empty { origin: source });
    }

    let pairs: Vec<LabelScore> = serde_json::from_value(Value::Array(items.clone()))
        .map_err(|e| AdapterError::malformed(source, e.to_string()))?;

    let mut entries = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let label = parse_label(&pair.label, source)?;
        entries.push((label, check_score(&pair.label, pair.score, source)?));
    }

    EmotionDistribution::from_entries(entries).ok_or(AdapterError::Empty { origin: source })
}

fn parse_label(name: &str, source: SourceKind) -> Result<EmotionLabel, AdapterError> {
    EmotionLabel::from_name(name).ok_or_else(|| AdapterError::UnknownLabel {
        origin: source,
        label: name.to_string(),
    })
}

fn check_score(name: &str, score: f64, source: SourceKind) -> Result<f64, AdapterError> {
    if score.is_finite() && score >= 0.0 {
        Ok(score)
    } else {
        Err(AdapterError::InvalidScore {
            origin: source,
            label: name.to_string(),
            score,
        })
    }
}
