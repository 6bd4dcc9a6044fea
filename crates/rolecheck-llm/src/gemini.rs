//! Gemini Provider Implementation
//!
//! Talks to the Google Generative Language REST API for both text generation
//! (`generateContent`) and embeddings (`embedContent`).
//!
//! Calls are blocking and never retried; callers decide how to degrade.
//!
//! # Examples
//!
//! ```no_run
//! use rolecheck_llm::GeminiProvider;
//! use rolecheck_domain::TextGenerator;
//!
//! let provider = GeminiProvider::new("my-api-key", "gemini-1.5-flash").unwrap();
//! let reply = provider.generate("List the roles in: ...").unwrap();
//! ```

use crate::LlmError;
use rolecheck_domain::{Embedder, TextGenerator};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default generation model
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default embedding model
pub const DEFAULT_EMBEDDING_MODEL: &str = "models/embedding-001";

/// Dimension of `models/embedding-001` vectors
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 768;

/// Default timeout for API requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Gemini API provider
pub struct GeminiProvider {
    endpoint: String,
    api_key: String,
    model: String,
    embedding_model: String,
    dimension: usize,
    client: reqwest::blocking::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    content: Content<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Option<EmbeddingValues>,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    #[serde(default)]
    values: Vec<f32>,
}

impl GeminiProvider {
    /// Create a new provider for `model` using the default endpoint and
    /// embedding model
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            dimension: DEFAULT_EMBEDDING_DIMENSION,
            client,
        })
    }

    /// Override the API endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a different embedding model and its vector dimension
    pub fn with_embedding_model(mut self, model: impl Into<String>, dimension: usize) -> Self {
        self.embedding_model = model.into();
        self.dimension = dimension;
        self
    }

    fn generate_url(&self) -> String {
        format!("{}/{}:generateContent", self.endpoint, model_path(&self.model))
    }

    fn embed_url(&self) -> String {
        format!(
            "{}/{}:embedContent",
            self.endpoint,
            model_path(&self.embedding_model)
        )
    }

    fn post<B: Serialize>(&self, url: &str, body: &B, model: &str) -> Result<String, LlmError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.text()?);
        }

        let error_text = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(match status.as_u16() {
            401 | 403 => LlmError::Unauthorized(error_text),
            404 => LlmError::ModelNotAvailable(model.to_string()),
            429 => LlmError::RateLimitExceeded,
            _ => LlmError::Communication(format!("HTTP {}: {}", status, error_text)),
        })
    }
}

impl TextGenerator for GeminiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: "BLOCK_NONE",
                })
                .collect(),
        };

        debug!("Sending {} prompt characters to {}", prompt.len(), self.model);
        let body = self.post(&self.generate_url(), &request, &self.model)?;
        parse_generate_response(&body)
    }
}

impl Embedder for GeminiProvider {
    type Error = LlmError;

    fn embed(&self, text: &str) -> Result<Vec<f32>, Self::Error> {
        let request = EmbedRequest {
            model: &self.embedding_model,
            content: Content {
                parts: vec![Part { text }],
            },
        };

        let body = self.post(&self.embed_url(), &request, &self.embedding_model)?;
        parse_embed_response(&body)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Model names may be given with or without the `models/` prefix
fn model_path(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

/// Concatenated text of the first candidate; no candidates yields ""
fn parse_generate_response(body: &str) -> Result<String, LlmError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        warn!("Gemini API returned no candidates");
        return Ok(String::new());
    };

    Ok(candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default())
}

/// Embedding values; a response without an embedding yields an empty vector
fn parse_embed_response(body: &str) -> Result<Vec<f32>, LlmError> {
    let response: EmbedResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse embedding: {}", e)))?;

    match response.embedding {
        Some(embedding) => Ok(embedding.values),
        None => {
            warn!("Gemini embedding API returned no embedding");
            Ok(Vec::new())
        }
    }
}
