use super::error::InfrastructureError;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

pub struct LocalFileStorage;

impl LocalFileStorage {
    pub fn new() -> Self {
        Self
    }

    pub async fn exists(&self, path: &str) -> bool {
        fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
    }

    pub async fn read_image_impl(&self, path: &str) -> Result<Vec<u8>, InfrastructureError> {
        let data = fs::read(path).await.map_err(InfrastructureError::IoError)?;
        Ok(data)
    }

    // 一時ファイルに書いてから rename する。既存ファイルは完全なものにしか置き換わらない
    pub async fn save_image_impl(&self, path: &str, data: &[u8]) -> Result<(), InfrastructureError> {
        let target = Path::new(path);
        let temp_path = temp_path_for(target)?;

        if let Err(e) = write_and_sync(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp_path, target).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(InfrastructureError::IoError(e));
        }

        log::debug!("Saved {} bytes to {}", data.len(), target.display());
        Ok(())
    }
}

async fn write_and_sync(path: &Path, data: &[u8]) -> Result<(), InfrastructureError> {
    let mut file = File::create(path).await.map_err(InfrastructureError::IoError)?;
    file.write_all(data).await.map_err(InfrastructureError::IoError)?;
    file.flush().await.map_err(InfrastructureError::IoError)?;
    file.sync_all().await.map_err(InfrastructureError::IoError)?;
    Ok(())
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

// 同じディレクトリに置かないと rename がアトミックにならない
fn temp_path_for(target: &Path) -> Result<PathBuf, InfrastructureError> {
    let file_name = target.file_name().ok_or_else(|| {
        InfrastructureError::FileStorageError(format!("Not a file path: {}", target.display()))
    })?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(file_name);
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    temp_name.push(format!(".{}.{}.tmp", std::process::id(), seq));
    Ok(target.with_file_name(temp_name))
}
