use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::RwLock;
use tracing::warn;

use crate::models::{ConfigPatch, DashboardConfig};

pub struct SettingsManager {
    path: PathBuf,
    data: RwLock<DashboardConfig>,
}

impl SettingsManager {
    pub async fn new(path: PathBuf) -> Result<Self> {
        Self::with_default(path, DashboardConfig::default()).await
    }

    /// 配置文件不存在时以 `default` 创建
    pub async fn with_default(path: PathBuf, default: DashboardConfig) -> Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let initial = match tokio::fs::read(&path).await {
            Ok(bytes) if !bytes.is_empty() => {
                serde_json::from_slice::<DashboardConfig>(&bytes).unwrap_or_else(|e| {
                    warn!("配置文件解析失败，使用默认配置: {}", e);
                    default.clone()
                })
            }
            _ => {
                let json = serde_json::to_string_pretty(&default)?;
                tokio::fs::write(&path, json).await?;
                default
            }
        };

        Ok(Self {
            path,
            data: RwLock::new(initial),
        })
    }

    pub async fn get(&self) -> DashboardConfig {
        self.data.read().await.clone()
    }

    pub async fn update(&self, update: ConfigPatch) -> Result<DashboardConfig> {
        let mut config = self.data.write().await;

        if let Some(dir) = update.storage_dir {
            config.storage_dir = dir;
        }
        if let Some(dir) = update.export_dir {
            config.export_dir = dir;
        }
        if let Some(dir) = update.log_dir {
            config.log_dir = Some(dir);
        }
        if let Some(seed) = update.seed_sample_notifications {
            config.seed_sample_notifications = seed;
        }
        if let Some(stagger) = update.notification_stagger_ms {
            config.notification_stagger_ms = stagger;
        }
        if let Some(delays) = update.loading_delays {
            config.loading_delays = delays;
        }
        if let Some(capacity) = update.event_bus_capacity {
            config.event_bus_capacity = capacity;
        }

        self.save(&config).await?;
        Ok(config.clone())
    }

    async fn save(&self, config: &DashboardConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_creates_default_config_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config").join("dashboard.json");

        let manager = SettingsManager::new(path.clone()).await.unwrap();
        assert!(path.exists());
        assert_eq!(manager.get().await, DashboardConfig::default());
    }

    #[tokio::test]
    async fn test_update_persists_patch() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("dashboard.json");

        let manager = SettingsManager::new(path.clone()).await.unwrap();
        let updated = manager
            .update(ConfigPatch {
                notification_stagger_ms: Some(10),
                seed_sample_notifications: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.notification_stagger_ms, 10);

        // 重新加载后应保留更新
        let reloaded = SettingsManager::new(path).await.unwrap().get().await;
        assert_eq!(reloaded.notification_stagger_ms, 10);
        assert!(!reloaded.seed_sample_notifications);
        assert_eq!(reloaded.event_bus_capacity, 256);
    }

    #[tokio::test]
    async fn test_corrupt_file_falls_back_to_default() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("dashboard.json");
        tokio::fs::write(&path, "{ broken").await.unwrap();

        let manager = SettingsManager::new(path).await.unwrap();
        assert_eq!(manager.get().await, DashboardConfig::default());
    }
}
