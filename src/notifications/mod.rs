// 通知模块 - 用户通知的存储与派生视图

pub mod format;
pub mod models;
pub mod store;

pub use format::format_relative_time;
pub use models::{
    display_order, Notification, NotificationPriority, NotificationType, NewNotification,
    NotifyOptions,
};
pub use store::{sample_notifications, NotificationStore};
