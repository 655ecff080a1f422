// 系统领域管理器
//
// 负责日志、调度和通知相关的功能
// 包含 LogBroadcaster、Scheduler 和 NotificationStore 三个核心组件

use std::sync::Arc;
use crate::logger::LogBroadcaster;
use crate::notifications::NotificationStore;
use crate::scheduler::Scheduler;

/// 系统领域管理器 - 负责日志、调度和通知
#[derive(Clone)]
pub struct SystemDomain {
    log_broadcaster: Arc<LogBroadcaster>,
    scheduler: Arc<dyn Scheduler>,
    notifications: Arc<NotificationStore>,
}

impl SystemDomain {
    /// 创建新的系统领域管理器
    pub fn new(
        log_broadcaster: Arc<LogBroadcaster>,
        scheduler: Arc<dyn Scheduler>,
        notifications: Arc<NotificationStore>,
    ) -> Self {
        Self { log_broadcaster, scheduler, notifications }
    }

    /// 获取日志广播器
    pub fn get_logger(&self) -> &Arc<LogBroadcaster> {
        &self.log_broadcaster
    }

    /// 获取调度器
    pub fn get_scheduler(&self) -> &Arc<dyn Scheduler> {
        &self.scheduler
    }

    /// 获取通知存储
    pub fn get_notifications(&self) -> &Arc<NotificationStore> {
        &self.notifications
    }
}
