//! Request dispatcher.
//!
//! Wires each endpoint to its input modality, classifier, adapter and
//! scoring policy:
//!
//! | Endpoint | Classifier | Policy |
//! |---|---|---|
//! | image | face | weighted emotion |
//! | text | text | weighted emotion |
//! | chat | none (reply generator runs alongside) | keyword count |

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Bytes;
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use common::{AppError, AppResult};
use domain::{
    normalize, EmotionDistribution, KeywordPolicy, SourceKind, StressAssessment, StressInput,
    StressLevel, StressPolicy, StressReport, WeightedEmotionPolicy,
};

use crate::clients::{FaceClassifier, FaceDetection, ReplyGenerator, TextClassifier};

/// Image assessment result
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ImageStressResponse {
    /// Dominant emotion in the face classifier's vocabulary
    #[schema(example = "happy")]
    pub emotion: String,
    /// Coarse stress bucket
    pub stress_level: StressLevel,
}

/// Text assessment result
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TextStressResponse {
    /// Stress score, 0-100
    #[schema(example = 60.0)]
    pub stress_level: f64,
    /// Distribution the score was computed from, in the classifier's labels
    #[schema(example = json!({"sadness": 0.6, "joy": 0.1}))]
    pub emotions: BTreeMap<String, f64>,
}

/// Chat result
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChatResponse {
    /// Generated reply
    pub reply: String,
    /// Keyword stress score of the user's message, 0-100
    #[schema(example = 40.0)]
    pub stress_level: f64,
}

/// Maps requests onto classifiers and scoring policies.
pub struct Dispatcher {
    face_classifier: Arc<dyn FaceClassifier>,
    text_classifier: Arc<dyn TextClassifier>,
    reply_generator: Arc<dyn ReplyGenerator>,
    image_policy: StressPolicy,
    text_policy: StressPolicy,
    chat_policy: StressPolicy,
    face_fallback: bool,
}

impl Dispatcher {
    /// Create a dispatcher with default policies and the no-face fallback
    /// enabled.
    pub fn new(
        face_classifier: Arc<dyn FaceClassifier>,
        text_classifier: Arc<dyn TextClassifier>,
        reply_generator: Arc<dyn ReplyGenerator>,
    ) -> Self {
        Self {
            face_classifier,
            text_classifier,
            reply_generator,
            image_policy: WeightedEmotionPolicy::default().into(),
            text_policy: WeightedEmotionPolicy::default().into(),
            chat_policy: KeywordPolicy::default().into(),
            face_fallback: true,
        }
    }

    /// Score neutral instead of failing when no face is found
    pub fn with_face_fallback(mut self, enabled: bool) -> Self {
        self.face_fallback = enabled;
        self
    }

    /// Replace the policy used for image and text assessments
    pub fn with_emotion_policy(mut self, policy: WeightedEmotionPolicy) -> Self {
        self.image_policy = policy.clone().into();
        self.text_policy = policy.into();
        self
    }

    /// Replace the policy used for chat messages
    pub fn with_chat_policy(mut self, policy: KeywordPolicy) -> Self {
        self.chat_policy = policy.into();
        self
    }

    /// Assess stress from a face image.
    pub async fn assess_image(&self, image: Bytes) -> AppResult<ImageStressResponse> {
        if image.is_empty() {
            return Err(AppError::validation("Image file is required"));
        }

        let emotions = match self.face_classifier.classify(image).await? {
            FaceDetection::Detected(raw) => normalize(&raw, SourceKind::FaceClassifier)?,
            FaceDetection::NoFaceFound if self.face_fallback => {
                warn!("No face detected, scoring a neutral distribution");
                EmotionDistribution::neutral()
            }
            FaceDetection::NoFaceFound => return Err(AppError::NoFaceDetected),
        };

        let assessment = assess_emotions(&self.image_policy, &emotions)?;
        let emotion = SourceKind::FaceClassifier.label_name(assessment.dominant_emotion);

        info!(
            "Detected emotion: {}, Stress Level: {}",
            emotion, assessment.level
        );

        Ok(ImageStressResponse {
            emotion: emotion.to_string(),
            stress_level: assessment.level,
        })
    }

    /// Assess stress from free text via the text classifier.
    ///
    /// Classifier failures fail the request; there is no keyword fallback on
    /// this path.
    pub async fn assess_text(&self, text: &str) -> AppResult<TextStressResponse> {
        let text = require_text(text, "Text input is required")?;

        let raw = self.text_classifier.classify(text).await?;
        let emotions = normalize(&raw, SourceKind::TextClassifier)?;
        let assessment = assess_emotions(&self.text_policy, &emotions)?;

        info!(
            score = assessment.score.value(),
            dominant = %assessment.dominant_emotion,
            "Text stress assessed"
        );

        Ok(TextStressResponse {
            stress_level: assessment.score.value(),
            emotions: SourceKind::TextClassifier.render(&assessment.source_emotions),
        })
    }

    /// Reply to a chat message and score the message for stress keywords.
    ///
    /// The score comes from the user's message only, never from the reply.
    /// The two results are independent: a failed reply surfaces as an
    /// upstream error from the reply generator, a scoring failure as an
    /// internal error.
    pub async fn chat(&self, message: &str) -> AppResult<ChatResponse> {
        let message = require_text(message, "Message is required")?;

        let stress = self.chat_policy.evaluate(StressInput::Text(message))?.score();
        let reply = self.reply_generator.reply(message).await?;

        info!(score = stress.value(), "Chat message scored");

        Ok(ChatResponse {
            reply,
            stress_level: stress.value(),
        })
    }
}

/// Run an emotion policy and insist on a full assessment.
fn assess_emotions(
    policy: &StressPolicy,
    emotions: &EmotionDistribution,
) -> AppResult<StressAssessment> {
    match policy.evaluate(StressInput::Emotions(emotions))? {
        StressReport::Assessment(assessment) => Ok(assessment),
        StressReport::Score(_) => Err(AppError::internal(format!(
            "{} policy produced no assessment",
            policy.name()
        ))),
    }
}

fn require_text<'a>(text: &'a str, message: &str) -> AppResult<&'a str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(AppError::validation(message))
    } else {
        Ok(trimmed)
    }
}
