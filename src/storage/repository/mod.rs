// Repository 抽象层 - 定义本地存储(键值)操作接口
//
// 与浏览器 localStorage 语义一致:键到字符串值的映射,后写覆盖先写

pub mod file;
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

/// 本地存储接口 - 所有存储实现必须实现此 trait
#[async_trait]
pub trait LocalStorage: Send + Sync {
    /// 读取键对应的值,不存在时返回 None
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// 写入键值(覆盖旧值)
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// 删除键
    async fn remove_item(&self, key: &str) -> Result<()>;

    /// 是否存在该键
    async fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.get_item(key).await?.is_some())
    }

    /// 存储类型名称(用于日志)
    fn storage_type(&self) -> &str;
}
