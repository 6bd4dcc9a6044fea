//! Configuration management for the CLI.
//!
//! Values are layered: built-in defaults, then a TOML file, then environment
//! variables (a `.env` file is loaded into the environment first), then
//! command-line flags.

use crate::error::{CliError, Result};
use rolecheck_extractor::{ExtractorConfig, IndexerConfig, QaConfig};
use rolecheck_llm::gemini::{DEFAULT_EMBEDDING_DIMENSION, DEFAULT_EMBEDDING_MODEL, DEFAULT_MODEL};
use rolecheck_reconciler::{FuzzyThreshold, ReconcilerConfig};
use rolecheck_sources::{RolePath, DEFAULT_ROLE_PATH};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Vector index used when none is configured
pub const DEFAULT_INDEX_NAME: &str = "role-comparison-index";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text generation and embedding service
    pub llm: LlmSettings,

    /// Vector store
    pub store: StoreSettings,

    /// Chunking and re-indexing
    pub indexer: IndexerConfig,

    /// Role extraction prompt
    pub extractor: ExtractorConfig,

    /// Retrieval question answering
    pub qa: QaConfig,

    /// Fuzzy matching
    pub reconciler: ReconcilerConfig,

    /// Path expression selecting roles in the XML file
    pub role_path: String,

    /// Output settings
    pub settings: Settings,
}

/// Gemini settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Generation model
    pub model: String,

    /// Embedding model
    pub embedding_model: String,

    /// Length of embedding vectors
    pub embedding_dimension: usize,
}

/// Pinecone settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Index name
    pub index_name: String,
}

/// Global output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Default configuration file path (`~/.rolecheck/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".rolecheck").join("config.toml"))
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the explicit file, else the default file when it exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Override values from the process environment.
    pub fn apply_env_vars(&mut self) -> Result<()> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Override values from `lookup`, which maps a variable name to its value.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(value) = get("GOOGLE_API_KEY") {
            self.llm.api_key = Some(value);
        }
        if let Some(value) = get("GEMINI_MODEL") {
            self.llm.model = value;
        }
        if let Some(value) = get("EMBEDDING_MODEL") {
            self.llm.embedding_model = value;
        }
        if let Some(value) = get("EMBEDDING_DIMENSION") {
            self.llm.embedding_dimension = parse_var("EMBEDDING_DIMENSION", &value)?;
        }
        if let Some(value) = get("PINECONE_API_KEY") {
            self.store.api_key = Some(value);
        }
        if let Some(value) = get("PINECONE_INDEX_NAME") {
            self.store.index_name = value;
        }
        if let Some(value) = get("PDF_CHUNK_SIZE") {
            self.indexer.chunk.size = parse_var("PDF_CHUNK_SIZE", &value)?;
        }
        if let Some(value) = get("PDF_CHUNK_OVERLAP") {
            self.indexer.chunk.overlap = parse_var("PDF_CHUNK_OVERLAP", &value)?;
        }
        if let Some(value) = get("INDEX_SETTLE_DELAY_MS") {
            self.indexer.settle_delay_ms = parse_var("INDEX_SETTLE_DELAY_MS", &value)?;
        }
        if let Some(value) = get("ROLE_EXTRACTION_PROMPT") {
            self.extractor.prompt_template = value;
        }
        if let Some(value) = get("RETRIEVAL_TOP_K") {
            self.qa.top_k = parse_var("RETRIEVAL_TOP_K", &value)?;
        }
        if let Some(value) = get("FUZZY_MATCH_THRESHOLD") {
            let threshold: u32 = parse_var("FUZZY_MATCH_THRESHOLD", &value)?;
            self.reconciler.fuzzy_threshold = FuzzyThreshold::new(threshold)?;
        }
        if let Some(value) = get("ROLE_XPATH") {
            self.role_path = value;
        }

        Ok(())
    }

    /// Check values that would make a run fail later.
    pub fn validate(&self) -> Result<()> {
        self.indexer.validate()?;
        self.extractor.validate()?;
        self.qa.validate()?;

        if self.llm.embedding_dimension == 0 {
            return Err(CliError::Config(
                "embedding dimension must be greater than 0".to_string(),
            ));
        }
        if self.store.index_name.trim().is_empty() {
            return Err(CliError::Config("index name must not be empty".to_string()));
        }
        self.role_path()?;

        Ok(())
    }

    /// Parsed role path expression.
    pub fn role_path(&self) -> Result<RolePath> {
        Ok(RolePath::parse(&self.role_path)?)
    }

    /// Gemini API key, required by commands that call the model.
    pub fn google_api_key(&self) -> Result<&str> {
        self.llm
            .api_key
            .as_deref()
            .ok_or(CliError::MissingCredential("GOOGLE_API_KEY"))
    }

    /// Pinecone API key, required by commands that touch the index.
    pub fn pinecone_api_key(&self) -> Result<&str> {
        self.store
            .api_key
            .as_deref()
            .ok_or(CliError::MissingCredential("PINECONE_API_KEY"))
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("{} has an invalid value '{}'", key, value)))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmSettings::default(),
            store: StoreSettings::default(),
            indexer: IndexerConfig::default(),
            extractor: ExtractorConfig::default(),
            qa: QaConfig::default(),
            reconciler: ReconcilerConfig::default(),
            role_path: DEFAULT_ROLE_PATH.to_string(),
            settings: Settings::default(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_dimension: DEFAULT_EMBEDDING_DIMENSION,
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            index_name: DEFAULT_INDEX_NAME.to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
