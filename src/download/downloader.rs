use crate::download::error::DownloadError;
use crate::utils::ensure_parent_dir_exists;
use async_compression::tokio::bufread::GzipDecoder;
use futures_util::TryStreamExt;
use log::{info, warn};
use reqwest::Client;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::io::AsyncReadExt;
use tokio::task;
use tokio_util::io::StreamReader;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Fetches single composite files and stores them on disk.
#[derive(Debug, Clone, Default)]
pub struct RadarDownloader {
    client: Client,
}

impl RadarDownloader {
    pub fn new() -> RadarDownloader {
        RadarDownloader {
            client: Client::new(),
        }
    }

    /// Uses a preconfigured `reqwest` client (proxies, timeouts, ...).
    pub fn with_client(client: Client) -> RadarDownloader {
        RadarDownloader { client }
    }

    /// Downloads `url` and writes the body to `target`, replacing any previous file.
    ///
    /// Gzip compressed bodies are unpacked before writing. Returns the number
    /// of bytes written.
    pub async fn download(&self, url: &str, target: &Path) -> Result<u64, DownloadError> {
        info!("Downloading radar data from {}", url);
        let body = self.fetch(url).await?;
        let data = gunzip_if_compressed(body).await?;
        let written = data.len() as u64;

        let parent = Self::prepare_target(target).await?;
        Self::persist(data, parent, target.to_path_buf()).await?;
        info!("Stored {} bytes at {}", written, target.display());
        Ok(written)
    }

    /// Creates the directory of `target` and returns it.
    async fn prepare_target(target: &Path) -> Result<PathBuf, DownloadError> {
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        ensure_parent_dir_exists(target)
            .await
            .map_err(|e| DownloadError::TargetDirCreation(parent.clone(), e))?;
        Ok(parent)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    DownloadError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    DownloadError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let stream = response
            .bytes_stream()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
        let reader = StreamReader::new(stream);
        tokio::pin!(reader);
        let mut body = Vec::new();
        reader.read_to_end(&mut body).await?;
        Ok(body)
    }

    /// Writes into a temporary file next to `target` and renames it over the
    /// target, so readers never see a half written composite.
    async fn persist(data: Vec<u8>, dir: PathBuf, target: PathBuf) -> Result<(), DownloadError> {
        task::spawn_blocking(move || {
            let mut temp_file = NamedTempFile::new_in(&dir)
                .map_err(|e| DownloadError::FileWrite(target.clone(), e))?;
            temp_file
                .write_all(&data)
                .map_err(|e| DownloadError::FileWrite(target.clone(), e))?;
            temp_file
                .flush()
                .map_err(|e| DownloadError::FileWrite(target.clone(), e))?;
            temp_file
                .persist(&target)
                .map_err(|e| DownloadError::FileWrite(target.clone(), e.error))?;
            Ok::<(), DownloadError>(())
        })
        .await??;
        Ok(())
    }
}

/// Unpacks gzip data, passes anything else through unchanged.
pub(crate) async fn gunzip_if_compressed(bytes: Vec<u8>) -> Result<Vec<u8>, DownloadError> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(bytes);
    }
    let mut decoder = GzipDecoder::new(&bytes[..]);
    let mut decompressed = Vec::with_capacity(bytes.len() * 4);
    decoder
        .read_to_end(&mut decompressed)
        .await
        .map_err(DownloadError::DownloadIo)?;
    info!(
        "Decompressed {} gzip bytes into {}",
        bytes.len(),
        decompressed.len()
    );
    Ok(decompressed)
}
