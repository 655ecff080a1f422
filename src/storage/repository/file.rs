// 文件存储实现 - 每个键一个 JSON 文件

use super::LocalStorage;
use crate::storage::StorageError;
use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

/// 基于目录的键值存储
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// 创建文件存储,目录不存在时自动创建
    pub async fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        info!("初始化文件存储: {:?}", dir);
        Ok(Self { dir })
    }

    /// 存储目录
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.');
        if !valid || key.starts_with('.') {
            return Err(StorageError::InvalidKey(key.to_string()).into());
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl LocalStorage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        // 先写临时文件再重命名;每次写入使用独立的临时文件
        let tmp = self
            .dir
            .join(format!(".{}.{}.tmp", key, uuid::Uuid::new_v4().simple()));
        tokio::fs::write(&tmp, value).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn storage_type(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_storage_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("store")).await.unwrap();

        storage.set_item("app_notifications", "[]").await.unwrap();
        assert_eq!(
            storage.get_item("app_notifications").await.unwrap().as_deref(),
            Some("[]")
        );
        assert!(storage.dir().join("app_notifications.json").exists());

        storage.remove_item("app_notifications").await.unwrap();
        assert!(storage.get_item("app_notifications").await.unwrap().is_none());
        // 重复删除不报错
        storage.remove_item("app_notifications").await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writes_stay_readable() {
        let temp_dir = tempdir().unwrap();
        let storage = std::sync::Arc::new(FileStorage::new(temp_dir.path()).await.unwrap());

        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let storage = storage.clone();
                tokio::spawn(async move {
                    let value = format!("[{}]", "0,".repeat(200 * (i + 1)).trim_end_matches(','));
                    storage.set_item("app_notifications", &value).await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let content = storage.get_item("app_notifications").await.unwrap().unwrap();
        assert!(serde_json::from_str::<Vec<u8>>(&content).is_ok());

        let mut entries = tokio::fs::read_dir(temp_dir.path()).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec!["app_notifications.json".to_string()]);
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let temp_dir = tempdir().unwrap();
        let storage = FileStorage::new(temp_dir.path()).await.unwrap();

        assert!(storage.set_item("../escape", "x").await.is_err());
        assert!(storage.get_item("").await.is_err());
    }
}
