// 数据模型模块 - 定义应用配置相关的数据结构

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::time::Duration;

/// 配置的部分更新(未提供的字段保持不变)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigPatch {
    /// 本地存储目录
    pub storage_dir: Option<PathBuf>,
    /// 导出文件目录
    pub export_dir: Option<PathBuf>,
    /// 日志目录
    pub log_dir: Option<PathBuf>,
    /// 是否写入示例通知
    pub seed_sample_notifications: Option<bool>,
    /// 示例通知错峰间隔（毫秒）
    pub notification_stagger_ms: Option<u64>,
    /// 模拟加载延迟
    pub loading_delays: Option<LoadingDelays>,
    /// 事件总线容量
    pub event_bus_capacity: Option<usize>,
}

/// 模拟加载延迟设置（毫秒）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingDelays {
    /// 抽奖列表
    pub lotteries_ms: u64,
    /// 交易记录
    pub transactions_ms: u64,
    /// 文档
    pub documents_ms: u64,
    /// 注册请求
    pub register_ms: u64,
}

impl LoadingDelays {
    pub fn lotteries(&self) -> Duration {
        Duration::from_millis(self.lotteries_ms)
    }

    pub fn transactions(&self) -> Duration {
        Duration::from_millis(self.transactions_ms)
    }

    pub fn documents(&self) -> Duration {
        Duration::from_millis(self.documents_ms)
    }

    pub fn register(&self) -> Duration {
        Duration::from_millis(self.register_ms)
    }
}

impl Default for LoadingDelays {
    fn default() -> Self {
        Self {
            lotteries_ms: 300,
            transactions_ms: 450,
            documents_ms: 600,
            register_ms: 800,
        }
    }
}

/// 持久化的后台配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// 本地存储目录
    pub storage_dir: PathBuf,
    /// 导出文件目录
    pub export_dir: PathBuf,
    /// 日志目录（为空时使用平台默认目录）
    pub log_dir: Option<PathBuf>,
    /// 首次启动时是否写入示例通知
    pub seed_sample_notifications: bool,
    /// 示例通知错峰间隔（毫秒）
    pub notification_stagger_ms: u64,
    /// 模拟加载延迟
    pub loading_delays: LoadingDelays,
    /// 事件总线容量
    pub event_bus_capacity: usize,
}

impl DashboardConfig {
    /// 以某个数据目录为根的默认配置
    pub fn rooted_at(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            storage_dir: data_dir.join("storage"),
            export_dir: data_dir.join("exports"),
            ..Self::default()
        }
    }

    pub fn notification_stagger(&self) -> Duration {
        Duration::from_millis(self.notification_stagger_ms)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("data/storage"),
            export_dir: PathBuf::from("data/exports"),
            log_dir: None,
            seed_sample_notifications: true,
            notification_stagger_ms: 100,
            loading_delays: LoadingDelays::default(),
            event_bus_capacity: 256,
        }
    }
}
