// 通知数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 通知类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Success,
    Warning,
    Error,
    Info,
    Transaction,
    System,
}

impl NotificationType {
    pub const ALL: [NotificationType; 6] = [
        NotificationType::Success,
        NotificationType::Warning,
        NotificationType::Error,
        NotificationType::Info,
        NotificationType::Transaction,
        NotificationType::System,
    ];

    /// 该类型的默认优先级
    pub fn default_priority(&self) -> NotificationPriority {
        match self {
            Self::Success => NotificationPriority::Normal,
            Self::Warning => NotificationPriority::High,
            Self::Error => NotificationPriority::Urgent,
            Self::Info => NotificationPriority::Normal,
            Self::Transaction => NotificationPriority::High,
            Self::System => NotificationPriority::Low,
        }
    }

    /// Material Design 图标名
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "mdi-check-circle",
            Self::Warning => "mdi-alert",
            Self::Error => "mdi-alert-circle",
            Self::Info => "mdi-information",
            Self::Transaction => "mdi-cash-multiple",
            Self::System => "mdi-cog",
        }
    }

    /// 主题色名
    pub fn color(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
            Self::Transaction => "primary",
            Self::System => "grey",
        }
    }
}

/// 通知优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    Low,
    Normal,
    High,
    Urgent,
}

impl NotificationPriority {
    /// 排序等级,越小越靠前
    pub fn rank(&self) -> u8 {
        match self {
            Self::Urgent => 0,
            Self::High => 1,
            Self::Normal => 2,
            Self::Low => 3,
        }
    }
}

/// 通知
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub priority: NotificationPriority,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

/// 新通知(不含 id、时间戳与已读标记)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub priority: NotificationPriority,
    #[serde(default)]
    pub action_url: Option<String>,
    #[serde(default)]
    pub action_label: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl NewNotification {
    /// 使用类型默认优先级创建
    pub fn new(
        notification_type: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            notification_type,
            priority: notification_type.default_priority(),
            action_url: None,
            action_label: None,
            avatar: None,
            metadata: None,
        }
    }

    pub fn with_action(mut self, url: impl Into<String>, label: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self.action_label = Some(label.into());
        self
    }

    pub fn with_options(mut self, options: NotifyOptions) -> Self {
        if let Some(priority) = options.priority {
            self.priority = priority;
        }
        if options.action_url.is_some() {
            self.action_url = options.action_url;
        }
        if options.action_label.is_some() {
            self.action_label = options.action_label;
        }
        if options.avatar.is_some() {
            self.avatar = options.avatar;
        }
        if options.metadata.is_some() {
            self.metadata = options.metadata;
        }
        self
    }
}

/// 快捷通知的可选参数
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotifyOptions {
    pub priority: Option<NotificationPriority>,
    pub action_url: Option<String>,
    pub action_label: Option<String>,
    pub avatar: Option<String>,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

/// 展示顺序:未读在前,其次按优先级,最后按时间倒序
pub fn display_order(a: &Notification, b: &Notification) -> Ordering {
    a.read
        .cmp(&b.read)
        .then_with(|| a.priority.rank().cmp(&b.priority.rank()))
        .then_with(|| b.timestamp.cmp(&a.timestamp))
}

/// 生成唯一 ID: notif_<毫秒时间戳>_<9位随机串>
pub fn generate_id(now: DateTime<Utc>) -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("notif_{}_{}", now.timestamp_millis(), &random[..9])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn item(read: bool, priority: NotificationPriority, age_secs: i64) -> Notification {
        Notification {
            id: format!("{:?}-{}-{}", priority, read, age_secs),
            title: "t".to_string(),
            message: "m".to_string(),
            notification_type: NotificationType::Info,
            priority,
            timestamp: Utc::now() - Duration::seconds(age_secs),
            read,
            action_url: None,
            action_label: None,
            avatar: None,
            metadata: None,
        }
    }

    #[test]
    fn test_display_order() {
        let mut items = vec![
            item(false, NotificationPriority::Low, 0),
            item(false, NotificationPriority::Urgent, 10),
            item(true, NotificationPriority::Urgent, 0),
        ];
        items.sort_by(display_order);

        assert!(!items[0].read);
        assert_eq!(items[0].priority, NotificationPriority::Urgent);
        assert_eq!(items[1].priority, NotificationPriority::Low);
        assert!(items[2].read);
    }

    #[test]
    fn test_same_priority_newest_first() {
        let mut items = vec![
            item(false, NotificationPriority::High, 60),
            item(false, NotificationPriority::High, 5),
        ];
        items.sort_by(display_order);
        assert!(items[0].timestamp > items[1].timestamp);
    }

    #[test]
    fn test_generate_id_format() {
        let now = Utc::now();
        let id = generate_id(now);
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "notif");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 9);
        assert_ne!(generate_id(now), generate_id(now));
    }

    #[test]
    fn test_options_override_priority() {
        let n = NewNotification::new(NotificationType::System, "a", "b").with_options(
            NotifyOptions {
                priority: Some(NotificationPriority::High),
                avatar: Some("x.png".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(n.priority, NotificationPriority::High);
        assert_eq!(n.avatar.as_deref(), Some("x.png"));
    }

    #[test]
    fn test_storage_format() {
        let json = serde_json::to_value(item(false, NotificationPriority::Normal, 0)).unwrap();
        assert_eq!(json["type"], "info");
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
        assert!(json.get("actionUrl").is_none());
    }
}
