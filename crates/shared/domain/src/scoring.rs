//! Stress scoring engine.
//!
//! Two policies turn classifier evidence into a 0-100 stress score:
//! - [`WeightedEmotionPolicy`] sums weighted confidences of negative emotions
//! - [`KeywordPolicy`] counts distinct stress keywords in raw text
//!
//! Both sit behind [`StressPolicy`], which endpoints hold and call through
//! [`StressPolicy::evaluate`]. Every policy is a pure function of its input.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::constants::{
    DEFAULT_HIGH_STRESS_THRESHOLD, DEFAULT_NEGATIVE_EMOTIONS, DEFAULT_NEGATIVE_WEIGHT,
    KEYWORD_SCORE_STEP, MAX_STRESS_SCORE, MIN_STRESS_SCORE, STRESS_KEYWORDS,
};
use crate::emotion::{EmotionDistribution, EmotionLabel};
use crate::error::{DomainError, DomainResult};

/// Stress score bounded to [0, 100] with two-decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct StressScore(f64);

impl StressScore {
    pub const ZERO: StressScore = StressScore(MIN_STRESS_SCORE);
    pub const MAX: StressScore = StressScore(MAX_STRESS_SCORE);

    /// Clamp `raw` into range and round it to two decimals.
    pub fn new(raw: f64) -> Self {
        let rounded = (raw * 100.0).round() / 100.0;
        Self(rounded.clamp(MIN_STRESS_SCORE, MAX_STRESS_SCORE))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for StressScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Coarse stress bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum StressLevel {
    Low,
    High,
}

impl std::fmt::Display for StressLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StressLevel::Low => f.write_str("Low"),
            StressLevel::High => f.write_str("High"),
        }
    }
}

/// Result of scoring an emotion distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StressAssessment {
    pub score: StressScore,
    pub level: StressLevel,
    pub dominant_emotion: EmotionLabel,
    pub source_emotions: EmotionDistribution,
}

/// Weighted sum over negative emotions.
///
/// `score = round2(100 * sum(weight * confidence))`, clamped to [0, 100].
/// The level is High when the score reaches the threshold. With the default
/// unit weights and a threshold in (0, 100], a single `{label: 1.0}`
/// distribution is High exactly when the label is negative.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedEmotionPolicy {
    weights: BTreeMap<EmotionLabel, f64>,
    threshold: f64,
}

impl Default for WeightedEmotionPolicy {
    fn default() -> Self {
        Self {
            weights: DEFAULT_NEGATIVE_EMOTIONS
                .iter()
                .map(|label| (*label, DEFAULT_NEGATIVE_WEIGHT))
                .collect(),
            threshold: DEFAULT_HIGH_STRESS_THRESHOLD,
        }
    }
}

impl WeightedEmotionPolicy {
    /// Create a policy with custom negative weights and threshold.
    ///
    /// # Errors
    /// Returns a validation error if a weight is not finite or the threshold
    /// lies outside (0, 100].
    pub fn new(
        weights: impl IntoIterator<Item = (EmotionLabel, f64)>,
        threshold: f64,
    ) -> DomainResult<Self> {
        let weights: BTreeMap<_, _> = weights.into_iter().collect();

        if let Some((label, weight)) = weights.iter().find(|(_, w)| !w.is_finite()) {
            return Err(DomainError::validation(format!(
                "Weight for {} must be finite, got {}",
                label, weight
            )));
        }
        if !(threshold > MIN_STRESS_SCORE && threshold <= MAX_STRESS_SCORE) {
            return Err(DomainError::validation(format!(
                "Stress threshold must be within (0, 100], got {}",
                threshold
            )));
        }

        Ok(Self { weights, threshold })
    }

    /// Whether `label` contributes to the score
    pub fn is_negative(&self, label: EmotionLabel) -> bool {
        self.weights.contains_key(&label)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score a distribution.
    pub fn score_distribution(&self, emotions: &EmotionDistribution) -> StressAssessment {
        let weighted_sum: f64 = self
            .weights
            .iter()
            .filter_map(|(label, weight)| emotions.confidence(*label).map(|c| c * weight))
            .sum();

        let score = StressScore::new(weighted_sum * MAX_STRESS_SCORE);
        let level = if score.value() >= self.threshold {
            StressLevel::High
        } else {
            StressLevel::Low
        };

        StressAssessment {
            score,
            level,
            dominant_emotion: emotions.dominant(),
            source_emotions: emotions.clone(),
        }
    }
}

/// Counts distinct stress keywords found in text.
///
/// Matching is a case-insensitive literal substring test: `stress` matches
/// "stressed" but `anxiety` does not match "anxious". Each keyword counts at
/// most once however often it appears.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordPolicy {
    keywords: Vec<String>,
}

impl Default for KeywordPolicy {
    fn default() -> Self {
        Self::new(STRESS_KEYWORDS.iter().copied())
    }
}

impl KeywordPolicy {
    /// Create a policy from a keyword list. Keywords are lowercased; blanks
    /// and duplicates are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !unique.contains(&keyword) {
                unique.push(keyword);
            }
        }
        Self { keywords: unique }
    }

    /// Keywords present in `text`, in list order
    pub fn matched_keywords<'a>(&'a self, text: &str) -> Vec<&'a str> {
        let text = text.to_lowercase();
        self.keywords
            .iter()
            .filter(|keyword| text.contains(keyword.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Score text: 20 points per distinct keyword, saturating at 100.
    pub fn score_text(&self, text: &str) -> StressScore {
        let matches = self.matched_keywords(text).len() as f64;
        StressScore::new((matches * KEYWORD_SCORE_STEP).min(MAX_STRESS_SCORE))
    }
}

/// Evidence handed to a policy
#[derive(Debug, Clone, Copy)]
pub enum StressInput<'a> {
    Emotions(&'a EmotionDistribution),
    Text(&'a str),
}

/// What a policy produced
#[derive(Debug, Clone, PartialEq)]
pub enum StressReport {
    /// Full assessment from an emotion distribution
    Assessment(StressAssessment),
    /// Numeric score only
    Score(StressScore),
}

impl StressReport {
    pub fn score(&self) -> StressScore {
        match self {
            StressReport::Assessment(assessment) => assessment.score,
            StressReport::Score(score) => *score,
        }
    }
}

/// Scoring policy selected per endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum StressPolicy {
    WeightedEmotion(WeightedEmotionPolicy),
    KeywordCount(KeywordPolicy),
}

impl StressPolicy {
    /// Short policy name for logs
    pub fn name(&self) -> &'static str {
        match self {
            StressPolicy::WeightedEmotion(_) => "weighted_emotion",
            StressPolicy::KeywordCount(_) => "keyword_count",
        }
    }

    /// Score `input` with this policy.
    ///
    /// # Errors
    /// Returns a scoring error when the input kind does not fit the policy.
    pub fn evaluate(&self, input: StressInput<'_>) -> DomainResult<StressReport> {
        match (self, input) {
            (StressPolicy::WeightedEmotion(policy), StressInput::Emotions(emotions)) => Ok(
                StressReport::Assessment(policy.score_distribution(emotions)),
            ),
            (StressPolicy::KeywordCount(policy), StressInput::Text(text)) => {
                Ok(StressReport::Score(policy.score_text(text)))
            }
            (policy, StressInput::Emotions(_)) => Err(DomainError::scoring(format!(
                "{} policy cannot score an emotion distribution",
                policy.name()
            ))),
            (policy, StressInput::Text(_)) => Err(DomainError::scoring(format!(
                "{} policy cannot score raw text",
                policy.name()
            ))),
        }
    }
}

impl From<WeightedEmotionPolicy> for StressPolicy {
    fn from(policy: WeightedEmotionPolicy) -> Self {
        StressPolicy::WeightedEmotion(policy)
    }
}

impl From<KeywordPolicy> for StressPolicy {
    fn from(policy: KeywordPolicy) -> Self {
        StressPolicy::KeywordCount(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(entries: &[(EmotionLabel, f64)]) -> EmotionDistribution {
        EmotionDistribution::from_entries(entries.iter().copied()).unwrap()
    }

    #[test]
    fn test_single_label_matches_membership_rule() {
        let policy = WeightedEmotionPolicy::default();
        for label in EmotionLabel::ALL {
            let assessment = policy.score_distribution(&EmotionDistribution::single(label));
            let negative = DEFAULT_NEGATIVE_EMOTIONS.contains(&label);

            assert_eq!(assessment.level == StressLevel::High, negative, "{}", label);
            let expected = if negative { 100.0 } else { 0.0 };
            assert_eq!(assessment.score.value(), expected, "{}", label);
            assert_eq!(assessment.dominant_emotion, label);
        }
    }

    #[test]
    fn test_weighted_sum_of_negative_emotions() {
        let policy = WeightedEmotionPolicy::default();
        let assessment = policy.score_distribution(&dist(&[
            (EmotionLabel::Sadness, 0.6),
            (EmotionLabel::Happiness, 0.1),
        ]));
        assert_eq!(assessment.score.value(), 60.0);
        assert_eq!(assessment.level, StressLevel::High);
        assert_eq!(assessment.dominant_emotion, EmotionLabel::Sadness);
    }

    #[test]
    fn test_score_rounds_to_two_decimals() {
        let policy = WeightedEmotionPolicy::default();
        let assessment = policy.score_distribution(&dist(&[
            (EmotionLabel::Fear, 0.123456),
            (EmotionLabel::Neutral, 0.876544),
        ]));
        assert_eq!(assessment.score.value(), 12.35);
        assert_eq!(assessment.level, StressLevel::Low);
    }

    #[test]
    fn test_score_is_clamped_for_adversarial_confidences() {
        let policy = WeightedEmotionPolicy::default();
        let assessment = policy.score_distribution(&dist(&[
            (EmotionLabel::Sadness, 3.0),
            (EmotionLabel::Anger, 0.9),
            (EmotionLabel::Fear, 0.9),
        ]));
        assert_eq!(assessment.score, StressScore::MAX);

        let negative = WeightedEmotionPolicy::new([(EmotionLabel::Fear, -5.0)], 50.0).unwrap();
        let assessment = negative.score_distribution(&dist(&[(EmotionLabel::Fear, 1.0)]));
        assert_eq!(assessment.score, StressScore::ZERO);
    }

    #[test]
    fn test_custom_weights() {
        let policy = WeightedEmotionPolicy::new(
            [(EmotionLabel::Anger, 0.5), (EmotionLabel::Disgust, 1.0)],
            25.0,
        )
        .unwrap();
        let assessment = policy.score_distribution(&dist(&[
            (EmotionLabel::Anger, 0.4),
            (EmotionLabel::Sadness, 0.6),
        ]));
        assert_eq!(assessment.score.value(), 20.0);
        assert_eq!(assessment.level, StressLevel::Low);
        assert!(policy.is_negative(EmotionLabel::Disgust));
        assert!(!policy.is_negative(EmotionLabel::Sadness));
    }

    #[test]
    fn test_invalid_policy_configuration() {
        assert!(WeightedEmotionPolicy::new([(EmotionLabel::Fear, f64::NAN)], 50.0).is_err());
        assert!(WeightedEmotionPolicy::new([(EmotionLabel::Fear, 1.0)], 0.0).is_err());
        assert!(WeightedEmotionPolicy::new([(EmotionLabel::Fear, 1.0)], 100.5).is_err());
        assert!(WeightedEmotionPolicy::new([(EmotionLabel::Fear, 1.0)], 100.0).is_ok());
    }

    #[test]
    fn test_keyword_literal_substring_rule() {
        let policy = KeywordPolicy::default();
        // "stress" matches "stressed"; "anxiety" does not match "anxious"
        assert_eq!(policy.score_text("I am stressed and anxious").value(), 20.0);
        assert_eq!(policy.matched_keywords("I am stressed and anxious"), vec!["stress"]);
    }

    #[test]
    fn test_keyword_repeats_count_once() {
        let policy = KeywordPolicy::default();
        assert_eq!(policy.score_text("sad").value(), 20.0);
        assert_eq!(policy.score_text("sad sad SAD, so sad").value(), 20.0);
    }

    #[test]
    fn test_keyword_case_insensitive() {
        let policy = KeywordPolicy::default();
        assert_eq!(policy.score_text("OVERWHELMED and Frustrated").value(), 40.0);
    }

    #[test]
    fn test_keyword_score_monotonic_and_saturating() {
        let policy = KeywordPolicy::default();
        let words = ["stress", "anxiety", "depressed", "overwhelmed", "angry", "frustrated"];
        let mut text = String::new();
        let mut previous = policy.score_text(&text);
        assert_eq!(previous, StressScore::ZERO);

        for (count, word) in words.iter().enumerate() {
            text.push_str(word);
            text.push(' ');
            let score = policy.score_text(&text);
            assert!(score >= previous);
            let expected = ((count + 1) as f64 * 20.0).min(100.0);
            assert_eq!(score.value(), expected);
            previous = score;
        }
        assert_eq!(previous, StressScore::MAX);
    }

    #[test]
    fn test_keyword_policy_drops_blanks_and_duplicates() {
        let policy = KeywordPolicy::new(["Tired", "tired", "  ", ""]);
        assert_eq!(policy.score_text("so tired").value(), 20.0);
        assert_eq!(policy.score_text("anything at all").value(), 0.0);
    }

    #[test]
    fn test_policy_evaluate_dispatches_by_variant() {
        let weighted = StressPolicy::from(WeightedEmotionPolicy::default());
        let keyword = StressPolicy::from(KeywordPolicy::default());
        let emotions = EmotionDistribution::single(EmotionLabel::Fear);

        let report = weighted.evaluate(StressInput::Emotions(&emotions)).unwrap();
        assert!(matches!(report, StressReport::Assessment(_)));
        assert_eq!(report.score(), StressScore::MAX);

        let report = keyword.evaluate(StressInput::Text("angry")).unwrap();
        assert_eq!(report, StressReport::Score(StressScore::new(20.0)));
    }

    #[test]
    fn test_policy_rejects_mismatched_input() {
        let weighted = StressPolicy::from(WeightedEmotionPolicy::default());
        let keyword = StressPolicy::from(KeywordPolicy::default());
        let emotions = EmotionDistribution::neutral();

        assert!(matches!(
            weighted.evaluate(StressInput::Text("sad")),
            Err(DomainError::Scoring(_))
        ));
        assert!(matches!(
            keyword.evaluate(StressInput::Emotions(&emotions)),
            Err(DomainError::Scoring(_))
        ));
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let policy = WeightedEmotionPolicy::default();
        let emotions = dist(&[(EmotionLabel::Anger, 0.33), (EmotionLabel::Fear, 0.33)]);
        assert_eq!(
            policy.score_distribution(&emotions),
            policy.score_distribution(&emotions)
        );
    }
}
