// 存储模块 - 统一的本地存储抽象层

// 子模块
pub mod repository;

// 重新导出主要类型
pub use repository::file::FileStorage;
pub use repository::memory::MemoryStorage;
pub use repository::LocalStorage;

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// 偏好设置存储键
pub const PREFERENCES_KEY: &str = "app_user_preferences";

/// 通知列表存储键
pub const NOTIFICATIONS_KEY: &str = "app_notifications";

/// 存储错误
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("存储空间不足: 写入 {key} 需要 {required} 字节, 配额 {quota} 字节")]
    QuotaExceeded {
        key: String,
        required: usize,
        quota: usize,
    },

    #[error("无效的存储键: {0:?}")]
    InvalidKey(String),
}

/// 读取并反序列化 JSON 值
pub async fn read_json<T: DeserializeOwned>(
    storage: &dyn LocalStorage,
    key: &str,
) -> Result<Option<T>> {
    match storage.get_item(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// 序列化并写入 JSON 值
pub async fn write_json<T: Serialize + ?Sized>(
    storage: &dyn LocalStorage,
    key: &str,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value)?;
    storage.set_item(key, &json).await
}
