use log::info;
use std::io;
use std::path::{Path, PathBuf};

const CACHE_DIR_NAME: &str = "dwd_radar";

/// `dwd_radar` below the platform cache directory (e.g. `~/.cache/dwd_radar`).
pub fn get_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join(CACHE_DIR_NAME))
}

/// Creates the parent directory of `file` if it does not exist yet.
pub async fn ensure_parent_dir_exists(file: &Path) -> io::Result<()> {
    let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    match tokio::fs::metadata(parent).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("Path exists but is not a directory: {}", parent.display()),
                ));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating directory: {}", parent.display());
            tokio::fs::create_dir_all(parent).await
        }
        Err(e) => Err(e),
    }
}
