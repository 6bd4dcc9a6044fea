//! Rolecheck LLM Provider Layer
//!
//! Text generation and embedding implementations for the capability traits
//! defined in `rolecheck-domain`.
//!
//! # Providers
//!
//! - `MockGenerator`: Deterministic generator for testing
//! - `GeminiProvider`: Google Generative Language API (generation and embeddings)
//!
//! # Examples
//!
//! ```
//! use rolecheck_llm::MockGenerator;
//! use rolecheck_domain::TextGenerator;
//!
//! let generator = MockGenerator::new("Software Engineer, Project Manager");
//! let result = generator.generate("test prompt").unwrap();
//! assert_eq!(result, "Software Engineer, Project Manager");
//! ```

#![warn(missing_docs)]

pub mod gemini;

use rolecheck_domain::TextGenerator;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use gemini::GeminiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// API key rejected
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            LlmError::InvalidResponse(e.to_string())
        } else {
            LlmError::Communication(e.to_string())
        }
    }
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Failure,
}

/// Mock text generator for deterministic testing
///
/// Returns pre-configured responses without making any network calls and
/// records every prompt it receives.
///
/// # Examples
///
/// ```
/// use rolecheck_llm::MockGenerator;
/// use rolecheck_domain::TextGenerator;
///
/// // Simple fixed response
/// let generator = MockGenerator::new("Fixed response");
/// assert_eq!(generator.generate("any prompt").unwrap(), "Fixed response");
///
/// // Per-prompt responses
/// let mut generator = MockGenerator::default();
/// generator.add_response("prompt1", "response1");
/// generator.add_error("prompt2");
/// assert_eq!(generator.generate("prompt1").unwrap(), "response1");
/// assert!(generator.generate("prompt2").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MockGenerator {
    default_reply: MockReply,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockGenerator {
    /// Create a generator with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_reply: MockReply::Text(response.into()),
            responses: Arc::new(Mutex::new(HashMap::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a generator that fails every call
    pub fn failing() -> Self {
        Self {
            default_reply: MockReply::Failure,
            ..Self::default()
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), MockReply::Failure);
    }

    /// Number of times generate was called
    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }

    /// Every prompt received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    /// Forget recorded prompts
    pub fn reset(&self) {
        lock(&self.prompts).clear();
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new("None")
    }
}

impl TextGenerator for MockGenerator {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        lock(&self.prompts).push(prompt.to_string());

        let reply = lock(&self.responses)
            .get(prompt)
            .cloned()
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Failure => Err(LlmError::Other("Mock error".to_string())),
        }
    }
}

// A panicking test thread must not poison the mock for the rest of the suite
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
