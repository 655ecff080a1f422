// 通知存储 - 通知列表、派生视图与持久化

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{debug, info, warn};

use super::models::*;
use crate::event_bus::{AppEvent, EventBus};
use crate::scheduler::Scheduler;
use crate::storage::{self, LocalStorage, NOTIFICATIONS_KEY};

/// 通知存储
pub struct NotificationStore {
    storage: Arc<dyn LocalStorage>,
    event_bus: Arc<EventBus>,
    scheduler: Arc<dyn Scheduler>,
    notifications: RwLock<Vec<Notification>>,
    /// 快照到写入之间持有,保证写入顺序与变更顺序一致
    persist: Mutex<()>,
    initialized: Mutex<bool>,
    seed_samples: bool,
    seed_stagger: Duration,
}

impl NotificationStore {
    pub fn new(
        storage: Arc<dyn LocalStorage>,
        event_bus: Arc<EventBus>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Arc<Self> {
        Self::with_seeding(storage, event_bus, scheduler, true, Duration::from_millis(100))
    }

    pub fn with_seeding(
        storage: Arc<dyn LocalStorage>,
        event_bus: Arc<EventBus>,
        scheduler: Arc<dyn Scheduler>,
        seed_samples: bool,
        seed_stagger: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            storage,
            event_bus,
            scheduler,
            notifications: RwLock::new(Vec::new()),
            persist: Mutex::new(()),
            initialized: Mutex::new(false),
            seed_samples,
            seed_stagger,
        })
    }

    /// 一次性初始化:从存储加载,必要时错峰写入示例通知
    ///
    /// 只有存储中从未写入过通知且列表为空时才写入示例;
    /// 返回示例写入任务的句柄(未触发写入时为 None)
    pub async fn initialize(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let mut initialized = self.initialized.lock().await;
        if *initialized {
            return None;
        }
        *initialized = true;

        let has_stored = self.load().await;
        let is_empty = self.notifications.read().await.is_empty();
        info!(
            "通知已初始化: 存储中{}数据, 当前 {} 条",
            if has_stored { "有" } else { "无" },
            self.notifications.read().await.len()
        );

        if !self.seed_samples || has_stored || !is_empty {
            return None;
        }

        let store = Arc::clone(self);
        Some(tokio::spawn(async move {
            for (i, sample) in sample_notifications().into_iter().enumerate() {
                if i > 0 {
                    store.scheduler.sleep(store.seed_stagger).await;
                }
                store.add(sample).await;
            }
            debug!("示例通知写入完成");
        }))
    }

    /// 新增通知(插入到列表最前)
    pub async fn add(&self, new: NewNotification) -> Notification {
        let now = Utc::now();
        let notification = Notification {
            id: generate_id(now),
            title: new.title,
            message: new.message,
            notification_type: new.notification_type,
            priority: new.priority,
            timestamp: now,
            read: false,
            action_url: new.action_url,
            action_label: new.action_label,
            avatar: new.avatar,
            metadata: new.metadata,
        };

        {
            let mut list = self.notifications.write().await;
            list.insert(0, notification.clone());
        }

        self.event_bus.publish(AppEvent::NotificationAdded {
            id: notification.id.clone(),
            notification_type: notification.notification_type,
            priority: notification.priority,
        });
        self.commit().await;
        notification
    }

    /// 快捷通知:按类型的默认优先级创建
    pub async fn notify(
        &self,
        notification_type: NotificationType,
        title: &str,
        message: &str,
        options: NotifyOptions,
    ) -> Notification {
        self.add(NewNotification::new(notification_type, title, message).with_options(options))
            .await
    }

    pub async fn notify_success(&self, title: &str, message: &str, options: NotifyOptions) -> Notification {
        self.notify(NotificationType::Success, title, message, options).await
    }

    pub async fn notify_warning(&self, title: &str, message: &str, options: NotifyOptions) -> Notification {
        self.notify(NotificationType::Warning, title, message, options).await
    }

    pub async fn notify_error(&self, title: &str, message: &str, options: NotifyOptions) -> Notification {
        self.notify(NotificationType::Error, title, message, options).await
    }

    pub async fn notify_info(&self, title: &str, message: &str, options: NotifyOptions) -> Notification {
        self.notify(NotificationType::Info, title, message, options).await
    }

    pub async fn notify_transaction(&self, title: &str, message: &str, options: NotifyOptions) -> Notification {
        self.notify(NotificationType::Transaction, title, message, options).await
    }

    pub async fn notify_system(&self, title: &str, message: &str, options: NotifyOptions) -> Notification {
        self.notify(NotificationType::System, title, message, options).await
    }

    /// 标记为已读,返回是否找到
    pub async fn mark_read(&self, id: &str) -> bool {
        let found = {
            let mut list = self.notifications.write().await;
            match list.iter_mut().find(|n| n.id == id) {
                Some(n) => {
                    n.read = true;
                    true
                }
                None => false,
            }
        };
        if found {
            self.commit().await;
        }
        found
    }

    pub async fn mark_all_read(&self) {
        {
            let mut list = self.notifications.write().await;
            list.iter_mut().for_each(|n| n.read = true);
        }
        self.commit().await;
    }

    /// 删除通知,返回是否找到
    pub async fn remove(&self, id: &str) -> bool {
        let removed = {
            let mut list = self.notifications.write().await;
            match list.iter().position(|n| n.id == id) {
                Some(index) => {
                    list.remove(index);
                    true
                }
                None => false,
            }
        };
        if removed {
            self.commit().await;
        }
        removed
    }

    pub async fn clear_all(&self) {
        self.notifications.write().await.clear();
        self.commit().await;
    }

    pub async fn clear_read(&self) {
        self.notifications.write().await.retain(|n| !n.read);
        self.commit().await;
    }

    // ========== 派生视图 ==========

    /// 全部通知(最新插入的在前)
    pub async fn all(&self) -> Vec<Notification> {
        self.notifications.read().await.clone()
    }

    pub async fn find(&self, id: &str) -> Option<Notification> {
        self.notifications
            .read()
            .await
            .iter()
            .find(|n| n.id == id)
            .cloned()
    }

    pub async fn unread_count(&self) -> usize {
        self.notifications.read().await.iter().filter(|n| !n.read).count()
    }

    pub async fn has_unread(&self) -> bool {
        self.unread_count().await > 0
    }

    /// 未读通知,时间倒序
    pub async fn unread(&self) -> Vec<Notification> {
        self.filtered_newest_first(false).await
    }

    /// 已读通知,时间倒序
    pub async fn read(&self) -> Vec<Notification> {
        self.filtered_newest_first(true).await
    }

    /// 展示顺序的完整列表
    pub async fn sorted(&self) -> Vec<Notification> {
        let mut list = self.all().await;
        list.sort_by(display_order);
        list
    }

    /// 按类型分组(六种类型都会出现)
    pub async fn grouped_by_type(&self) -> BTreeMap<NotificationType, Vec<Notification>> {
        let mut groups: BTreeMap<NotificationType, Vec<Notification>> = NotificationType::ALL
            .iter()
            .map(|t| (*t, Vec::new()))
            .collect();
        for n in self.notifications.read().await.iter() {
            groups.entry(n.notification_type).or_default().push(n.clone());
        }
        groups
    }

    async fn filtered_newest_first(&self, read: bool) -> Vec<Notification> {
        let mut list: Vec<Notification> = self
            .notifications
            .read()
            .await
            .iter()
            .filter(|n| n.read == read)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        list
    }

    // ========== 持久化 ==========

    /// 加载存储,返回存储中是否已有通知数据
    async fn load(&self) -> bool {
        match storage::read_json::<Vec<Notification>>(self.storage.as_ref(), NOTIFICATIONS_KEY)
            .await
        {
            Ok(Some(stored)) => {
                *self.notifications.write().await = stored;
                true
            }
            Ok(None) => false,
            Err(e) => {
                // 数据损坏也视为曾经写入过,不再写示例
                warn!("加载通知失败: {}", e);
                true
            }
        }
    }

    /// 持久化并发布变更事件
    async fn commit(&self) {
        let _persist = self.persist.lock().await;
        let (snapshot, unread) = {
            let list = self.notifications.read().await;
            (list.clone(), list.iter().filter(|n| !n.read).count())
        };

        if let Err(e) = storage::write_json(self.storage.as_ref(), NOTIFICATIONS_KEY, &snapshot).await {
            warn!("保存通知失败: {}", e);
            self.event_bus.publish(AppEvent::StorageWriteFailed {
                key: NOTIFICATIONS_KEY.to_string(),
                error: e.to_string(),
            });
        }

        self.event_bus.publish(AppEvent::NotificationsChanged {
            total: snapshot.len(),
            unread,
        });
    }
}

/// 首次启动时写入的示例通知
pub fn sample_notifications() -> Vec<NewNotification> {
    vec![
        NewNotification::new(
            NotificationType::Success,
            "قرعه‌کشی جدید",
            "قرعه‌کشی هفتگی شماره ۱۲۵ ایجاد شد",
        )
        .with_action("/lotteries/125", "مشاهده"),
        NewNotification::new(
            NotificationType::Warning,
            "تراکنش مشکوک",
            "تراکنش با مبلغ غیرعادی شناسایی شد",
        )
        .with_action("/transactions?filter=suspicious", "بررسی"),
        NewNotification {
            priority: NotificationPriority::Normal,
            ..NewNotification::new(
                NotificationType::Transaction,
                "پرداخت موفق",
                "جایزه علی محمدی واریز شد - ۵,۰۰۰,۰۰۰ تومان",
            )
        },
        NewNotification::new(
            NotificationType::System,
            "به‌روزرسانی سیستم",
            "نسخه جدید سیستم در دسترس است",
        ),
        NewNotification::new(
            NotificationType::Error,
            "خطای پردازش",
            "خطا در پردازش گزارش ماهانه",
        )
        .with_action("/reports/errors", "جزئیات"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ImmediateScheduler;
    use crate::storage::{FileStorage, MemoryStorage};
    use tempfile::tempdir;

    fn store_with(storage: Arc<dyn LocalStorage>, seed: bool) -> Arc<NotificationStore> {
        NotificationStore::with_seeding(
            storage,
            Arc::new(EventBus::new(64)),
            ImmediateScheduler::new(),
            seed,
            Duration::from_millis(100),
        )
    }

    #[tokio::test]
    async fn test_add_defaults() {
        let store = store_with(Arc::new(MemoryStorage::new()), false);
        let before = Utc::now();
        let n = store
            .add(NewNotification::new(NotificationType::Info, "عنوان", "پیام"))
            .await;

        assert!(!n.read);
        assert!(n.timestamp >= before);
        assert!(n.id.starts_with("notif_"));
        assert_eq!(store.unread_count().await, 1);
        assert!(store.has_unread().await);
    }

    #[tokio::test]
    async fn test_add_prepends() {
        let store = store_with(Arc::new(MemoryStorage::new()), false);
        store.notify_info("a", "first", NotifyOptions::default()).await;
        let second = store.notify_info("b", "second", NotifyOptions::default()).await;

        let all = store.all().await;
        assert_eq!(all[0].id, second.id);
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_notify_canonical_priorities() {
        let store = store_with(Arc::new(MemoryStorage::new()), false);
        let o = NotifyOptions::default;

        assert_eq!(store.notify_success("t", "m", o()).await.priority, NotificationPriority::Normal);
        assert_eq!(store.notify_warning("t", "m", o()).await.priority, NotificationPriority::High);
        assert_eq!(store.notify_error("t", "m", o()).await.priority, NotificationPriority::Urgent);
        assert_eq!(store.notify_info("t", "m", o()).await.priority, NotificationPriority::Normal);
        assert_eq!(
            store.notify_transaction("t", "m", o()).await.priority,
            NotificationPriority::High
        );
        assert_eq!(store.notify_system("t", "m", o()).await.priority, NotificationPriority::Low);
    }

    #[tokio::test]
    async fn test_mark_read_and_clear_read() {
        let store = store_with(Arc::new(MemoryStorage::new()), false);
        let a = store.notify_info("a", "m", NotifyOptions::default()).await;
        store.notify_info("b", "m", NotifyOptions::default()).await;

        assert!(store.mark_read(&a.id).await);
        assert!(!store.mark_read("missing").await);
        assert_eq!(store.read().await.len(), 1);
        assert_eq!(store.unread().await.len(), 1);

        store.clear_read().await;
        assert_eq!(store.all().await.len(), 1);
        assert!(store.find(&a.id).await.is_none());

        store.mark_all_read().await;
        assert!(!store.has_unread().await);

        store.clear_all().await;
        assert!(store.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_remove() {
        let store = store_with(Arc::new(MemoryStorage::new()), false);
        let a = store.notify_error("a", "m", NotifyOptions::default()).await;
        assert!(store.remove(&a.id).await);
        assert!(!store.remove(&a.id).await);
    }

    #[tokio::test]
    async fn test_sorted_and_grouped() {
        let store = store_with(Arc::new(MemoryStorage::new()), false);
        let low = store.notify_system("low", "m", NotifyOptions::default()).await;
        let urgent = store.notify_error("urgent", "m", NotifyOptions::default()).await;
        let read_urgent = store.notify_error("read", "m", NotifyOptions::default()).await;
        store.mark_read(&read_urgent.id).await;

        let sorted = store.sorted().await;
        assert_eq!(sorted[0].id, urgent.id);
        assert_eq!(sorted[1].id, low.id);
        assert_eq!(sorted[2].id, read_urgent.id);

        let groups = store.grouped_by_type().await;
        assert_eq!(groups.len(), 6);
        assert_eq!(groups[&NotificationType::Error].len(), 2);
        assert_eq!(groups[&NotificationType::System].len(), 1);
        assert!(groups[&NotificationType::Info].is_empty());
    }

    #[tokio::test]
    async fn test_initialize_seeds_once() {
        let storage: Arc<dyn LocalStorage> = Arc::new(MemoryStorage::new());
        let store = store_with(storage.clone(), true);

        let handle = store.initialize().await.expect("应写入示例通知");
        handle.await.unwrap();
        assert_eq!(store.all().await.len(), 5);
        // 最后写入的示例排在最前
        assert_eq!(store.all().await[0].notification_type, NotificationType::Error);
        assert!(store.initialize().await.is_none());

        // 新会话:存储中已有数据,不再写示例,即使已经清空
        store.clear_all().await;
        let next = store_with(storage, true);
        assert!(next.initialize().await.is_none());
        assert!(next.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_persistence_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let storage: Arc<dyn LocalStorage> =
            Arc::new(FileStorage::new(temp_dir.path()).await.unwrap());

        let store = store_with(storage.clone(), false);
        let n = store
            .notify_transaction(
                "واریز",
                "مبلغ واریز شد",
                NotifyOptions {
                    action_url: Some("/transactions/1".to_string()),
                    ..Default::default()
                },
            )
            .await;

        let reloaded = store_with(storage, false);
        assert!(reloaded.initialize().await.is_none());
        let loaded = reloaded.find(&n.id).await.unwrap();
        assert_eq!(loaded.timestamp, n.timestamp);
        assert_eq!(loaded.action_url.as_deref(), Some("/transactions/1"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_persist_every_notification() {
        let temp_dir = tempdir().unwrap();
        let storage: Arc<dyn LocalStorage> =
            Arc::new(FileStorage::new(temp_dir.path()).await.unwrap());
        let event_bus = Arc::new(EventBus::new(256));
        let mut failures = event_bus.subscribe();
        let store = NotificationStore::with_seeding(
            storage.clone(),
            event_bus,
            ImmediateScheduler::new(),
            false,
            Duration::ZERO,
        );

        let tasks: Vec<_> = (0..40)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .notify_info(&format!("t{}", i), "m", NotifyOptions::default())
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        while let Ok(event) = failures.try_recv() {
            assert!(
                !matches!(event, AppEvent::StorageWriteFailed { .. }),
                "写入失败: {:?}",
                event
            );
        }

        let persisted: Vec<Notification> = storage::read_json(storage.as_ref(), NOTIFICATIONS_KEY)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(persisted.len(), 40);

        let reloaded = store_with(storage, false);
        reloaded.initialize().await;
        assert_eq!(reloaded.all().await.len(), 40);

        // 不留临时文件
        let mut entries = tokio::fs::read_dir(temp_dir.path()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            assert!(!entry.file_name().to_string_lossy().ends_with(".tmp"));
        }
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_memory_state() {
        let store = store_with(Arc::new(MemoryStorage::with_quota(10)), false);
        store.notify_warning("a", "m", NotifyOptions::default()).await;
        assert_eq!(store.all().await.len(), 1);
    }
}
