//! Document sources backed by the local filesystem and by HTTP.

#[cfg(any(feature = "fs", feature = "http"))]
use async_trait::async_trait;
#[cfg(any(feature = "fs", feature = "http"))]
use book_core::{DocumentSource, FetchError};
#[cfg(any(feature = "fs", feature = "http"))]
use serde_json::Value;

/// Reads the content document from a local file.
#[cfg(feature = "fs")]
#[derive(Debug, Clone)]
pub struct FileSource {
    path: std::path::PathBuf,
    location: String,
}

#[cfg(feature = "fs")]
impl FileSource {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        let location = path.display().to_string();
        Self { path, location }
    }
}

#[cfg(feature = "fs")]
#[async_trait]
impl DocumentSource for FileSource {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch(&self) -> Result<Value, FetchError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                location: self.location.clone(),
                source,
            })?;

        serde_json::from_str(&body).map_err(|source| FetchError::MalformedJson {
            location: self.location.clone(),
            source,
        })
    }
}

/// Fetches the content document with an HTTP GET.
///
/// Any non-success status fails the fetch. No retries.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured client (timeouts, proxies, headers).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Whether `input` looks like something this source can fetch.
    pub fn accepts(input: &str) -> bool {
        input.starts_with("http://") || input.starts_with("https://")
    }

    fn transport_error(&self, err: reqwest::Error) -> FetchError {
        FetchError::Transport {
            location: self.url.clone(),
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl DocumentSource for HttpSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                location: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        serde_json::from_str(&body).map_err(|source| FetchError::MalformedJson {
            location: self.url.clone(),
            source,
        })
    }
}
