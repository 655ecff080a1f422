// 事件总线 - 用于模块间解耦通信
//
// 实现发布/订阅模式,替代界面层的响应式依赖追踪
// 使用 tokio::sync::broadcast 实现高效的事件分发

use crate::notifications::{NotificationPriority, NotificationType};
use crate::theme::{ResolvedMode, UserPreferences};
use tokio::sync::broadcast;

/// 应用事件枚举 - 定义所有可能的状态变更事件
#[derive(Debug, Clone)]
pub enum AppEvent {
    // --- 偏好事件 ---

    /// 偏好设置已变更
    PreferencesChanged {
        preferences: UserPreferences,
    },

    /// 主题已应用到文档根节点
    ThemeApplied {
        mode: ResolvedMode,
    },

    // --- 通知事件 ---

    /// 新通知到达
    NotificationAdded {
        id: String,
        notification_type: NotificationType,
        priority: NotificationPriority,
    },

    /// 通知列表变更(已读、删除、清空)
    NotificationsChanged {
        total: usize,
        unread: usize,
    },

    // --- 数据事件 ---

    /// 模拟数据集加载完成
    DatasetLoaded {
        dataset: &'static str,
    },

    // --- 导出事件 ---

    /// 导出完成
    ExportCompleted {
        filename: String,
        bytes: usize,
    },

    /// 导出失败
    ExportFailed {
        filename: String,
        error: String,
    },

    // --- 系统事件 ---

    /// 本地存储写入失败
    StorageWriteFailed {
        key: String,
        error: String,
    },

    /// 配置更新事件
    ConfigUpdated,
}

/// 事件总线 - 用于模块间解耦通信
///
/// 使用 broadcast channel 实现发布/订阅模式
/// 支持多个订阅者同时接收事件
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    /// 创建新的事件总线
    ///
    /// # 参数
    /// - `capacity`: 事件缓冲区大小,建议 100-1000
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// 发布事件
    ///
    /// 如果没有订阅者,事件会被丢弃(这是正常的)
    pub fn publish(&self, event: AppEvent) {
        match self.sender.send(event) {
            Ok(receiver_count) => {
                tracing::trace!("事件已发布，订阅者数量: {}", receiver_count);
            }
            Err(_) => {
                tracing::trace!("事件已发布但无订阅者");
            }
        }
    }

    /// 订阅事件
    ///
    /// 返回一个接收器,可以用 `.recv().await` 接收事件
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    /// 获取当前订阅者数量
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
