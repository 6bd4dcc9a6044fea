//! Pinecone vector store over its REST API
//!
//! Construction performs no I/O. [`VectorStore::ensure_ready`] describes the
//! index, creates it (serverless, cosine metric) when missing and polls until
//! it reports ready. Data-plane calls resolve the index host lazily and cache
//! it for the lifetime of the store.

use crate::StoreError;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use rolecheck_domain::{
    DeleteOutcome, MetadataFilter, QueryMatch, VectorId, VectorRecord, VectorStore,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::OnceLock;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Pinecone control plane
pub const CONTROL_PLANE_URL: &str = "https://api.pinecone.io";

/// API version sent with every request
pub const API_VERSION: &str = "2024-07";

/// Records sent per upsert request
const UPSERT_BATCH_SIZE: usize = 100;

/// Connection and provisioning settings for a Pinecone index
#[derive(Debug, Clone)]
pub struct PineconeConfig {
    /// API key sent in the `Api-Key` header
    pub api_key: String,

    /// Index name
    pub index_name: String,

    /// Vector dimension used when creating the index
    pub dimension: usize,

    /// Serverless cloud provider
    pub cloud: String,

    /// Serverless region
    pub region: String,

    /// Upper bound on waiting for a new index to become ready
    pub ready_timeout: Duration,

    /// Delay between readiness polls
    pub poll_interval: Duration,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Control plane base URL
    pub control_plane_url: String,
}

impl PineconeConfig {
    /// Settings for `index_name` with the default serverless placement
    pub fn new(api_key: impl Into<String>, index_name: impl Into<String>, dimension: usize) -> Self {
        Self {
            api_key: api_key.into(),
            index_name: index_name.into(),
            dimension,
            cloud: "aws".to_string(),
            region: "us-east-1".to_string(),
            ready_timeout: Duration::from_secs(120),
            poll_interval: Duration::from_secs(1),
            request_timeout: Duration::from_secs(30),
            control_plane_url: CONTROL_PLANE_URL.to_string(),
        }
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.api_key.trim().is_empty() {
            return Err(StoreError::Config("Pinecone API key is empty".to_string()));
        }
        if self.index_name.trim().is_empty() {
            return Err(StoreError::Config("Pinecone index name is empty".to_string()));
        }
        if self.dimension == 0 {
            return Err(StoreError::Config("Index dimension must be positive".to_string()));
        }
        Ok(())
    }
}

/// Vector store backed by a Pinecone serverless index
pub struct PineconeStore {
    config: PineconeConfig,
    client: Client,
    host: OnceLock<String>,
}

#[derive(Debug, Deserialize)]
struct IndexDescription {
    host: String,
    #[serde(default)]
    status: IndexStatus,
}

#[derive(Debug, Default, Deserialize)]
struct IndexStatus {
    #[serde(default)]
    ready: bool,
    #[serde(default)]
    state: String,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: Vec<UpsertVector<'a>>,
}

#[derive(Serialize)]
struct UpsertVector<'a> {
    id: &'a str,
    values: &'a [f32],
    metadata: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    #[serde(default)]
    upserted_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    include_values: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<RawMatch>,
}

#[derive(Deserialize)]
struct RawMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

impl PineconeStore {
    /// Create a store for the configured index
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: PineconeConfig) -> Result<Self, StoreError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "Api-Key",
            HeaderValue::from_str(config.api_key.trim())
                .map_err(|_| StoreError::Config("Invalid Pinecone API key".to_string()))?,
        );
        headers.insert(
            "X-Pinecone-API-Version",
            HeaderValue::from_static(API_VERSION),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            config,
            client,
            host: OnceLock::new(),
        })
    }

    /// Index name
    pub fn index_name(&self) -> &str {
        &self.config.index_name
    }

    fn index_url(&self) -> String {
        format!(
            "{}/indexes/{}",
            self.config.control_plane_url.trim_end_matches('/'),
            self.config.index_name
        )
    }

    /// Describe the index; `None` when it does not exist
    fn describe(&self) -> Result<Option<IndexDescription>, StoreError> {
        let response = self.client.get(self.index_url()).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response)?;
        Ok(Some(response.json()?))
    }

    fn create(&self) -> Result<(), StoreError> {
        let url = format!(
            "{}/indexes",
            self.config.control_plane_url.trim_end_matches('/')
        );
        let body = create_index_body(&self.config);

        info!(
            "Creating Pinecone index '{}' (dimension {})",
            self.config.index_name, self.config.dimension
        );
        let response = self.client.post(url).json(&body).send()?;
        // Another process may have created it in the meantime
        if response.status() == StatusCode::CONFLICT {
            return Ok(());
        }
        check_status(response)?;
        Ok(())
    }

    fn wait_until_ready(&self) -> Result<IndexDescription, StoreError> {
        let deadline = Instant::now() + self.config.ready_timeout;
        loop {
            match self.describe()? {
                Some(description) if description.status.ready => return Ok(description),
                Some(description) => {
                    debug!(
                        "Index '{}' not ready yet (state {})",
                        self.config.index_name, description.status.state
                    );
                }
                None => debug!("Index '{}' not visible yet", self.config.index_name),
            }

            if Instant::now() >= deadline {
                return Err(StoreError::NotReady(format!(
                    "'{}' not ready after {:?}",
                    self.config.index_name, self.config.ready_timeout
                )));
            }
            thread::sleep(self.config.poll_interval);
        }
    }

    /// Data-plane base URL, resolved once
    fn host(&self) -> Result<&str, StoreError> {
        if let Some(host) = self.host.get() {
            return Ok(host.as_str());
        }
        let description = self
            .describe()?
            .ok_or_else(|| StoreError::IndexNotFound(self.config.index_name.clone()))?;
        Ok(self
            .host
            .get_or_init(|| data_plane_url(&description.host))
            .as_str())
    }

    fn data_url(&self, path: &str) -> Result<String, StoreError> {
        Ok(format!("{}{}", self.host()?, path))
    }
}

impl VectorStore for PineconeStore {
    type Error = StoreError;

    fn ensure_ready(&self) -> Result<(), Self::Error> {
        let description = match self.describe()? {
            Some(description) if description.status.ready => description,
            Some(_) => self.wait_until_ready()?,
            None => {
                self.create()?;
                self.wait_until_ready()?
            }
        };

        let _ = self.host.set(data_plane_url(&description.host));
        info!("Pinecone index '{}' is ready", self.config.index_name);
        Ok(())
    }

    fn upsert(&self, records: &[VectorRecord]) -> Result<usize, Self::Error> {
        if records.is_empty() {
            return Ok(0);
        }
        for record in records {
            if record.values.len() != self.config.dimension {
                return Err(StoreError::DimensionMismatch {
                    expected: self.config.dimension,
                    actual: record.values.len(),
                });
            }
        }

        let url = self.data_url("/vectors/upsert")?;
        let mut written = 0;
        for batch in records.chunks(UPSERT_BATCH_SIZE) {
            let request = UpsertRequest {
                vectors: batch
                    .iter()
                    .map(|record| UpsertVector {
                        id: record.id.as_str(),
                        values: &record.values,
                        metadata: json!({
                            "document_id": record.metadata.document_id,
                            "chunk_index": record.metadata.chunk_index,
                            "content": record.metadata.content,
                        }),
                    })
                    .collect(),
            };
            let response = check_status(self.client.post(&url).json(&request).send()?)?;
            let body: UpsertResponse = response.json()?;
            written += body.upserted_count;
        }

        debug!("Upserted {} vectors into '{}'", written, self.config.index_name);
        Ok(written)
    }

    fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>, Self::Error> {
        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
            include_values: false,
        };
        let url = self.data_url("/query")?;
        let response = check_status(self.client.post(url).json(&request).send()?)?;
        let body: QueryResponse = response.json()?;

        Ok(body.matches.into_iter().map(into_query_match).collect())
    }

    fn delete(&self, filter: &MetadataFilter) -> Result<DeleteOutcome, Self::Error> {
        let body = delete_filter_body(filter)?;
        let url = self.data_url("/vectors/delete")?;
        let response = self.client.post(url).json(&body).send()?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(DeleteOutcome::NothingMatched);
        }
        check_status(response)?;
        // Pinecone does not report how many vectors a filtered delete removed
        Ok(DeleteOutcome::Deleted { count: None })
    }

    fn delete_all(&self) -> Result<(), Self::Error> {
        let url = self.data_url("/vectors/delete")?;
        let response = self
            .client
            .post(url)
            .json(&json!({ "deleteAll": true }))
            .send()?;

        if response.status() == StatusCode::NOT_FOUND {
            warn!("Index '{}' has nothing to wipe", self.config.index_name);
            return Ok(());
        }
        check_status(response)?;
        warn!("Deleted every vector in index '{}'", self.config.index_name);
        Ok(())
    }
}

fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .unwrap_or_else(|_| "<body unavailable>".to_string());
    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

fn data_plane_url(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

fn create_index_body(config: &PineconeConfig) -> Value {
    json!({
        "name": config.index_name,
        "dimension": config.dimension,
        "metric": "cosine",
        "spec": {
            "serverless": {
                "cloud": config.cloud,
                "region": config.region,
            }
        }
    })
}

fn delete_filter_body(filter: &MetadataFilter) -> Result<Value, StoreError> {
    if filter.is_empty() {
        return Err(StoreError::EmptyFilter);
    }

    let mut clauses = Map::new();
    if let Some(document_id) = &filter.document_id {
        clauses.insert("document_id".to_string(), json!({ "$eq": document_id }));
    }
    if let Some(chunk_index) = filter.chunk_index {
        clauses.insert("chunk_index".to_string(), json!({ "$eq": chunk_index }));
    }
    Ok(json!({ "filter": Value::Object(clauses) }))
}

fn into_query_match(raw: RawMatch) -> QueryMatch {
    let metadata = raw.metadata.unwrap_or_default();
    // Numbers come back as floats
    let chunk_index = metadata.get("chunk_index").and_then(|value| {
        value
            .as_u64()
            .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .map(|n| n as usize)
    });

    QueryMatch {
        id: VectorId::from_raw(raw.id),
        score: raw.score,
        document_id: metadata
            .get("document_id")
            .and_then(Value::as_str)
            .map(str::to_string),
        chunk_index,
        content: metadata
            .get("content")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}
