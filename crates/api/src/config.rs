//! Service configuration loaded from environment variables.

use common::{
    env_or, optional_env, parse_env_or, parse_flag, require_env, split_list, ConfigError,
    DatabaseConfig, ServiceConfig, UpstreamConfig,
};

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default CORS origin (local frontend)
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";

/// Default face classifier sidecar endpoint
pub const DEFAULT_FACE_CLASSIFIER_URL: &str = "http://localhost:5000/analyze";

/// Default text emotion model on the Hugging Face inference API
pub const DEFAULT_TEXT_CLASSIFIER_URL: &str =
    "https://api-inference.huggingface.co/models/bhadresh-savani/roberta-emotion";

/// Default chat completions endpoint
pub const DEFAULT_REPLY_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default chat model
pub const DEFAULT_REPLY_MODEL: &str = "gpt-3.5-turbo";

/// Default timeout for outbound calls
pub const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: u64 = 30;

/// Largest accepted image upload
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub service: ServiceConfig,
    /// Absent when `DATABASE_URL` is unset; only the in-memory store works then
    pub database: Option<DatabaseConfig>,
    pub face_classifier: UpstreamConfig,
    pub text_classifier: UpstreamConfig,
    pub reply_generator: UpstreamConfig,
    pub reply_model: String,
    /// Ask the face classifier to fail when it cannot find a face
    pub face_enforce_detection: bool,
    /// Score a neutral distribution instead of failing when no face is found
    pub face_detection_fallback: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Fails if `HUGGINGFACE_API_KEY` or `OPENAI_API_KEY` is missing, or if a
    /// numeric or boolean variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout = parse_env_or("UPSTREAM_TIMEOUT_SECONDS", DEFAULT_UPSTREAM_TIMEOUT_SECONDS)?;

        let port = match optional_env("SERVER_PORT") {
            Some(_) => parse_env_or("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            None => parse_env_or("PORT", DEFAULT_SERVER_PORT)?,
        };

        Ok(Self {
            service: ServiceConfig {
                host: env_or("SERVER_HOST", DEFAULT_SERVER_HOST),
                port,
                allowed_origins: split_list(&env_or("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS)),
            },
            database: database_from_env(),
            face_classifier: UpstreamConfig::new(
                env_or("FACE_CLASSIFIER_URL", DEFAULT_FACE_CLASSIFIER_URL),
                optional_env("FACE_CLASSIFIER_API_KEY"),
                timeout,
            ),
            text_classifier: UpstreamConfig::new(
                env_or("TEXT_CLASSIFIER_URL", DEFAULT_TEXT_CLASSIFIER_URL),
                Some(require_env("HUGGINGFACE_API_KEY")?),
                timeout,
            ),
            reply_generator: UpstreamConfig::new(
                env_or("REPLY_API_URL", DEFAULT_REPLY_API_URL),
                Some(require_env("OPENAI_API_KEY")?),
                timeout,
            ),
            reply_model: env_or("REPLY_MODEL", DEFAULT_REPLY_MODEL),
            face_enforce_detection: parse_flag("FACE_ENFORCE_DETECTION", false)?,
            face_detection_fallback: parse_flag("FACE_DETECTION_FALLBACK", true)?,
        })
    }

    /// Database settings, required unless serving from the in-memory store.
    pub fn require_database(&self) -> Result<&DatabaseConfig, ConfigError> {
        self.database
            .as_ref()
            .ok_or_else(|| ConfigError::Missing("DATABASE_URL".to_string()))
    }
}

/// Database settings alone, for commands that need no API keys.
pub fn database_from_env() -> Option<DatabaseConfig> {
    optional_env("DATABASE_URL").map(|url| DatabaseConfig {
        url,
        name: optional_env("DATABASE_NAME"),
    })
}
