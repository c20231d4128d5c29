use crate::composite::error::DecodeError;
use crate::download::error::{DownloadError, RequestError};
use crate::render::error::RenderError;
use crate::settings::SettingsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RadarError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Background task failed")]
    TaskJoin(#[from] tokio::task::JoinError),
}
