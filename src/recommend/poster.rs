use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::PosterConfig;

/// External image lookup for a movie title.
#[async_trait]
pub trait PosterSource: Send + Sync {
    async fn lookup(&self, title: &str) -> Result<String, PosterError>;
}

/// Poster lookup against an OMDb compatible API.
pub struct OmdbClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl OmdbClient {
    pub fn new(api_url: &str, api_key: &str, timeout: Duration) -> Result<Self, PosterError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl PosterSource for OmdbClient {
    async fn lookup(&self, title: &str) -> Result<String, PosterError> {
        let response: OmdbResponse = self
            .client
            .get(&self.api_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.response != "True" {
            if let Some(error) = response.error {
                debug!("Poster lookup for {:?}: {}", title, error);
            }
            return Err(PosterError::NotFound(title.to_string()));
        }

        match response.poster {
            Some(url) if !url.is_empty() && url != "N/A" => Ok(url),
            _ => Err(PosterError::NotFound(title.to_string())),
        }
    }
}

/// Resolves an image URL for every movie. Lookup failures are logged and
/// replaced by the placeholder; they never reach the caller.
#[derive(Clone)]
pub struct PosterEnricher {
    source: Option<Arc<dyn PosterSource>>,
    placeholder: String,
}

impl PosterEnricher {
    pub fn new(source: Option<Arc<dyn PosterSource>>, placeholder: impl Into<String>) -> Self {
        Self {
            source,
            placeholder: placeholder.into(),
        }
    }

    pub fn from_config(config: &PosterConfig) -> Result<Self, PosterError> {
        let source: Option<Arc<dyn PosterSource>> = match config.api_key {
            Some(ref key) if !key.is_empty() => Some(Arc::new(OmdbClient::new(
                &config.api_url,
                key,
                Duration::from_secs(config.timeout_secs),
            )?)),
            _ => None,
        };
        Ok(Self::new(source, config.placeholder.clone()))
    }

    pub fn placeholder_url(&self, title: &str) -> String {
        self.placeholder
            .replace("{title}", &urlencoding::encode(title))
    }

    pub async fn fetch_poster(&self, title: &str) -> String {
        let Some(ref source) = self.source else {
            return self.placeholder_url(title);
        };

        match source.lookup(title).await {
            Ok(url) => url,
            Err(e) => {
                warn!("Poster lookup failed for {:?}: {}", title, e);
                self.placeholder_url(title)
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PosterError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("No poster found for {0}")]
    NotFound(String),
}
