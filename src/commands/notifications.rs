//! 通知中心命令
//!
//! 提供通知列表、已读标记、删除与清理接口

use serde::Serialize;
use std::collections::BTreeMap;

use crate::notifications::{format_relative_time, NewNotification, Notification, NotificationType};
use crate::AppState;

/// 通知中心视图
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationCenter {
    /// 未读优先、优先级、时间倒序
    pub items: Vec<Notification>,
    pub unread_count: usize,
    pub has_unread: bool,
}

/// 获取通知中心
pub async fn get_notifications(state: &AppState) -> Result<NotificationCenter, String> {
    let store = state.system_domain.get_notifications();
    Ok(NotificationCenter {
        items: store.sorted().await,
        unread_count: store.unread_count().await,
        has_unread: store.has_unread().await,
    })
}

/// 按类型分组的通知
pub async fn get_grouped_notifications(
    state: &AppState,
) -> Result<BTreeMap<NotificationType, Vec<Notification>>, String> {
    Ok(state.system_domain.get_notifications().grouped_by_type().await)
}

/// 新增通知
pub async fn push_notification(
    state: &AppState,
    notification: NewNotification,
) -> Result<Notification, String> {
    if notification.title.trim().is_empty() {
        return Err("通知标题不能为空".to_string());
    }
    Ok(state.system_domain.get_notifications().add(notification).await)
}

/// 标记单条已读
pub async fn mark_notification_read(state: &AppState, id: &str) -> Result<(), String> {
    if state.system_domain.get_notifications().mark_read(id).await {
        Ok(())
    } else {
        Err(format!("通知不存在: {}", id))
    }
}

pub async fn mark_all_notifications_read(state: &AppState) -> Result<(), String> {
    state.system_domain.get_notifications().mark_all_read().await;
    Ok(())
}

/// 删除单条通知
pub async fn remove_notification(state: &AppState, id: &str) -> Result<(), String> {
    if state.system_domain.get_notifications().remove(id).await {
        Ok(())
    } else {
        Err(format!("通知不存在: {}", id))
    }
}

pub async fn clear_all_notifications(state: &AppState) -> Result<(), String> {
    state.system_domain.get_notifications().clear_all().await;
    Ok(())
}

pub async fn clear_read_notifications(state: &AppState) -> Result<(), String> {
    state.system_domain.get_notifications().clear_read().await;
    Ok(())
}

/// 通知的相对时间文本
pub async fn format_notification_time(state: &AppState, id: &str) -> Result<String, String> {
    let notification = state
        .system_domain
        .get_notifications()
        .find(id)
        .await
        .ok_or_else(|| format!("通知不存在: {}", id))?;
    Ok(format_relative_time(notification.timestamp, chrono::Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::state_in;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_seeded_center() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path()).await;

        let center = get_notifications(&state).await.unwrap();
        assert_eq!(center.items.len(), 5);
        assert!(center.has_unread);

        let grouped = get_grouped_notifications(&state).await.unwrap();
        assert_eq!(grouped.len(), NotificationType::ALL.len());
    }

    #[tokio::test]
    async fn test_read_and_remove() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path()).await;
        clear_all_notifications(&state).await.unwrap();

        let created = push_notification(
            &state,
            NewNotification::new(NotificationType::Info, "به‌روزرسانی", "نسخه جدید"),
        )
        .await
        .unwrap();
        assert_eq!(
            format_notification_time(&state, &created.id).await.unwrap(),
            "همین الان"
        );

        mark_notification_read(&state, &created.id).await.unwrap();
        assert_eq!(get_notifications(&state).await.unwrap().unread_count, 0);
        assert!(mark_notification_read(&state, "notif_missing").await.is_err());

        clear_read_notifications(&state).await.unwrap();
        assert!(get_notifications(&state).await.unwrap().items.is_empty());
        assert!(remove_notification(&state, &created.id).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_title_rejected() {
        let dir = tempdir().unwrap();
        let state = state_in(dir.path()).await;
        let result =
            push_notification(&state, NewNotification::new(NotificationType::Error, " ", "x")).await;
        assert!(result.is_err());
    }
}
