//! Configuration module
//!
//! Environment-driven configuration for the gateway and the provider
//! adapter. Everything has a sensible default except the provider API key,
//! which is only required for the Google-backed backends.

use std::env;

use crate::constants::DEFAULT_MAX_UPLOAD_BYTES;
use crate::provider_types::ProviderBackend;

const DEFAULT_SERVER_PORT: u16 = 8990;
const DEFAULT_GOOGLE_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Gateway configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    cors_origins: Vec<String>,
    environment: String,
    provider_backend: ProviderBackend,
    google_api_key: Option<String>,
    google_api_base: String,
    max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from the environment (and `.env` when present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let server_port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_SERVER_PORT);

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let provider_backend = match env::var("PROVIDER_BACKEND") {
            Ok(raw) => ProviderBackend::parse(&raw).ok_or_else(|| {
                anyhow::anyhow!(
                    "Invalid PROVIDER_BACKEND '{}': expected gemini, vertex, or memory",
                    raw
                )
            })?,
            Err(_) => ProviderBackend::Gemini,
        };

        let google_api_key = env::var("GOOGLE_API_KEY")
            .or_else(|_| env::var("GEMINI_API_KEY"))
            .ok()
            .filter(|s| !s.trim().is_empty());

        let google_api_base = env::var("GOOGLE_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GOOGLE_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        let config = Self {
            server_port,
            cors_origins,
            environment,
            provider_backend,
            google_api_key,
            google_api_base,
            max_upload_bytes,
        };
        config.validate()?;
        Ok(config)
    }

    /// Fail fast on misconfiguration before any listener is bound.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_upload_bytes == 0 {
            anyhow::bail!("MAX_UPLOAD_BYTES must be greater than zero");
        }
        if matches!(
            self.provider_backend,
            ProviderBackend::Gemini | ProviderBackend::Vertex
        ) && self.google_api_key.is_none()
        {
            anyhow::bail!(
                "GOOGLE_API_KEY is required for the {} backend",
                self.provider_backend
            );
        }
        Ok(())
    }

    /// Build a configuration directly; used by tests and embedded setups.
    pub fn for_backend(backend: ProviderBackend) -> Self {
        Self {
            server_port: DEFAULT_SERVER_PORT,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            provider_backend: backend,
            google_api_key: None,
            google_api_base: DEFAULT_GOOGLE_API_BASE.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_google_api_key(mut self, key: impl Into<String>) -> Self {
        self.google_api_key = Some(key.into());
        self
    }

    pub fn with_google_api_base(mut self, base: impl Into<String>) -> Self {
        self.google_api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_upload_bytes(mut self, max: usize) -> Self {
        self.max_upload_bytes = max;
        self
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn provider_backend(&self) -> ProviderBackend {
        self.provider_backend
    }

    pub fn google_api_key(&self) -> Option<&str> {
        self.google_api_key.as_deref()
    }

    pub fn google_api_base(&self) -> &str {
        &self.google_api_base
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}
