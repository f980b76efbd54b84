//! Chunk sources for CSV ingestion
//!
//! Produces the raw byte stream the ingestor consumes, either from an HTTP(S)
//! endpoint or from a local file. Transport knows nothing about CSV.

use futures::stream::{self, BoxStream, StreamExt};
use reqwest::StatusCode;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::config::FinderConfig;
use crate::{CafeError, Result};

/// Ordered byte chunks; the first `Err` ends the stream
pub type ChunkStream = BoxStream<'static, Result<Vec<u8>>>;

/// Where a CSV payload comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSource {
    Url(String),
    File(PathBuf),
}

impl SheetSource {
    pub fn describe(&self) -> String {
        match self {
            SheetSource::Url(url) => url.clone(),
            SheetSource::File(path) => path.display().to_string(),
        }
    }
}

/// Opens chunk streams for sheet sources
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    read_chunk_size: usize,
}

impl Transport {
    pub fn new(config: &FinderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            read_chunk_size: config.read_chunk_size,
        })
    }

    pub async fn open(&self, source: &SheetSource) -> Result<ChunkStream> {
        match source {
            SheetSource::Url(url) => self.fetch_url(url).await,
            SheetSource::File(path) => self.open_file(path).await,
        }
    }

    /// GET a URL and stream its body.
    ///
    /// Non-success status is a transport failure. A response that declares
    /// no body (204, or `Content-Length: 0`) is [`CafeError::EmptyBody`].
    pub async fn fetch_url(&self, url: &str) -> Result<ChunkStream> {
        info!("Fetching sheet from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CafeError::transport(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CafeError::http_status(url, status.as_u16()));
        }
        if status == StatusCode::NO_CONTENT || response.content_length() == Some(0) {
            return Err(CafeError::empty_body(url));
        }
        debug!(
            "Response {} with content length {:?}",
            status,
            response.content_length()
        );

        let url = url.to_string();
        let chunks = response.bytes_stream().map(move |chunk| {
            chunk
                .map(|bytes| bytes.to_vec())
                .map_err(|e| CafeError::transport(url.as_str(), e.to_string()))
        });

        Ok(chunks.boxed())
    }

    /// Stream a local file in `read_chunk_size` pieces
    pub async fn open_file(&self, path: &Path) -> Result<ChunkStream> {
        info!("Reading sheet from {}", path.display());

        let file = File::open(path).await?;
        if file.metadata().await?.len() == 0 {
            return Err(CafeError::empty_body(path.display().to_string()));
        }

        let chunks = stream::try_unfold((file, self.read_chunk_size), |(file, size)| {
            read_chunk(file, size)
        });

        Ok(chunks.boxed())
    }
}

async fn read_chunk(mut file: File, size: usize) -> Result<Option<(Vec<u8>, (File, usize))>> {
    let mut buffer = vec![0u8; size];
    let read = file.read(&mut buffer).await?;
    if read == 0 {
        return Ok(None);
    }
    buffer.truncate(read);
    Ok(Some((buffer, (file, size))))
}
