//! Emotion vocabulary and the canonical emotion distribution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical emotion labels.
///
/// Declaration order doubles as the tie-break priority when picking a
/// dominant emotion, so it must not be reordered casually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Anger,
    Disgust,
    Fear,
    Happiness,
    Sadness,
    Surprise,
    Neutral,
    Love,
}

impl EmotionLabel {
    /// Every label, in priority order
    pub const ALL: [EmotionLabel; 8] = [
        EmotionLabel::Anger,
        EmotionLabel::Disgust,
        EmotionLabel::Fear,
        EmotionLabel::Happiness,
        EmotionLabel::Sadness,
        EmotionLabel::Surprise,
        EmotionLabel::Neutral,
        EmotionLabel::Love,
    ];

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Anger => "anger",
            EmotionLabel::Disgust => "disgust",
            EmotionLabel::Fear => "fear",
            EmotionLabel::Happiness => "happiness",
            EmotionLabel::Sadness => "sadness",
            EmotionLabel::Surprise => "surprise",
            EmotionLabel::Neutral => "neutral",
            EmotionLabel::Love => "love",
        }
    }

    /// Parse a classifier label, accepting the spellings used by face and
    /// text classifiers. Matching ignores case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let label = match name.trim().to_ascii_lowercase().as_str() {
            "anger" | "angry" => EmotionLabel::Anger,
            "disgust" | "disgusted" => EmotionLabel::Disgust,
            "fear" | "fearful" => EmotionLabel::Fear,
            "happiness" | "happy" | "joy" => EmotionLabel::Happiness,
            "sadness" | "sad" => EmotionLabel::Sadness,
            "surprise" | "surprised" => EmotionLabel::Surprise,
            "neutral" => EmotionLabel::Neutral,
            "love" => EmotionLabel::Love,
            _ => return None,
        };
        Some(label)
    }
}

impl std::fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from emotion label to confidence.
///
/// Always holds at least one entry and only finite, non-negative
/// confidences. Confidences need not sum to 1. Built by the adapter, read by
/// the scoring policies, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EmotionDistribution(BTreeMap<EmotionLabel, f64>);

impl EmotionDistribution {
    /// Build a distribution from label/confidence pairs.
    ///
    /// Returns `None` when no pairs are given or a confidence is negative or
    /// not finite. A label seen twice keeps its highest confidence.
    pub fn from_entries(entries: impl IntoIterator<Item = (EmotionLabel, f64)>) -> Option<Self> {
        let mut map = BTreeMap::new();
        for (label, confidence) in entries {
            if !confidence.is_finite() || confidence < 0.0 {
                return None;
            }
            let slot = map.entry(label).or_insert(confidence);
            if confidence > *slot {
                *slot = confidence;
            }
        }
        if map.is_empty() {
            None
        } else {
            Some(Self(map))
        }
    }

    /// A distribution that puts full confidence on one label
    pub fn single(label: EmotionLabel) -> Self {
        Self(BTreeMap::from([(label, 1.0)]))
    }

    /// Best-effort distribution used when no face could be found
    pub fn neutral() -> Self {
        Self::single(EmotionLabel::Neutral)
    }

    /// Confidence assigned to `label`, if the classifier reported it
    pub fn confidence(&self, label: EmotionLabel) -> Option<f64> {
        self.0.get(&label).copied()
    }

    /// Iterate entries in label priority order
    pub fn iter(&self) -> impl Iterator<Item = (EmotionLabel, f64)> + '_ {
        self.0.iter().map(|(label, confidence)| (*label, *confidence))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Label with the highest confidence.
    ///
    /// Ties go to the label declared first in [`EmotionLabel`], which keeps
    /// the result independent of classifier output order.
    pub fn dominant(&self) -> EmotionLabel {
        let mut best: Option<(EmotionLabel, f64)> = None;
        for (label, confidence) in self.iter() {
            match best {
                Some((_, top)) if top >= confidence => {}
                _ => best = Some((label, confidence)),
            }
        }
        // Non-empty by construction
        best.map(|(label, _)| label).unwrap_or(EmotionLabel::Neutral)
    }
}
