use crate::error::EmbedError;
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;

/// Boundary for turning text into fixed-length vectors.
///
/// One vector per input, same order, same dimensionality for the process
/// lifetime. A failing call fails atomically; no partial vector sets.
#[async_trait]
pub trait Embedder: Send + Sync {
    fn dimensions(&self) -> usize;

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError>;
}

#[async_trait]
impl Embedder for Box<dyn Embedder> {
    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        (**self).embed(texts).await
    }
}

/// Deterministic character-trigram hashing embedder.
///
/// Not a semantic model; it is the offline default and the test vehicle.
/// Swap in [`HttpEmbedder`] for a real sentence-embedding server.
#[derive(Debug, Clone, Copy)]
pub struct HashEmbedder {
    pub dimensions: usize,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
        }
    }
}

impl HashEmbedder {
    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0f32; self.dimensions.max(1)];
        let lowered = text.to_lowercase();
        let chars: Vec<char> = lowered.chars().collect();

        if chars.is_empty() {
            return vector;
        }

        for window in chars.windows(3) {
            let token = window.iter().collect::<String>();
            let mut hash = 1469598103934665603u64;
            for byte in token.bytes() {
                hash ^= byte as u64;
                hash = hash.wrapping_mul(1099511628211);
            }
            let bucket = (hash % vector.len() as u64) as usize;
            vector[bucket] += 1.0;
        }

        let magnitude = vector.iter().map(|value| value * value).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut vector {
                *value /= magnitude;
            }
        }

        vector
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }
}

/// Client for a sentence-embedding HTTP server exposing a batch
/// `POST /embed` endpoint that takes `{"inputs": [..]}` and returns one
/// vector per input.
pub struct HttpEmbedder {
    endpoint: String,
    dimensions: usize,
    client: Client,
}

impl HttpEmbedder {
    pub fn new(endpoint: impl Into<String>, dimensions: usize) -> Self {
        Self {
            endpoint: endpoint.into(),
            dimensions,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        let response = self
            .client
            .post(format!("{}/embed", self.endpoint))
            .json(&serde_json::json!({ "inputs": texts }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EmbedError::Backend {
                status: response.status().to_string(),
            });
        }

        let vectors: Vec<Vec<f32>> = response.json().await?;

        if vectors.len() != texts.len() {
            return Err(EmbedError::CountMismatch {
                expected: texts.len(),
                actual: vectors.len(),
            });
        }

        if let Some(vector) = vectors.iter().find(|vector| vector.len() != self.dimensions) {
            return Err(EmbedError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }

        Ok(vectors)
    }
}
