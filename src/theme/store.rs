// 偏好设置存储 - 主题、语言、布局偏好
//
// 每次变更:写入本地存储(失败只记录日志) → 应用到文档根节点 → 发布事件

use std::sync::{Arc, Weak};

use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::document::DocumentRoot;
use super::models::*;
use crate::event_bus::{AppEvent, EventBus};
use crate::storage::{self, LocalStorage, PREFERENCES_KEY};

/// 偏好设置存储
pub struct PreferenceStore {
    storage: Arc<dyn LocalStorage>,
    document: Arc<dyn DocumentRoot>,
    event_bus: Arc<EventBus>,
    preferences: RwLock<UserPreferences>,
    /// 变更到写入之间持有,保证写入顺序与变更顺序一致
    persist: Mutex<()>,
    /// 操作系统暗色模式信号
    system_dark: watch::Receiver<bool>,
    initialized: Mutex<bool>,
    watcher: Mutex<Option<JoinHandle<()>>>,
}

impl PreferenceStore {
    pub fn new(
        storage: Arc<dyn LocalStorage>,
        document: Arc<dyn DocumentRoot>,
        event_bus: Arc<EventBus>,
        system_dark: watch::Receiver<bool>,
    ) -> Arc<Self> {
        Arc::new(Self {
            storage,
            document,
            event_bus,
            preferences: RwLock::new(UserPreferences::default()),
            persist: Mutex::new(()),
            system_dark,
            initialized: Mutex::new(false),
            watcher: Mutex::new(None),
        })
    }

    /// 一次性初始化:加载存储、订阅系统主题、首次应用
    ///
    /// 重复调用不做任何事,返回 false
    pub async fn initialize(self: &Arc<Self>) -> bool {
        let mut initialized = self.initialized.lock().await;
        if *initialized {
            return false;
        }

        self.load().await;
        self.spawn_system_watcher().await;
        let prefs = self.get().await;
        self.apply(&prefs);

        *initialized = true;
        info!("偏好设置已初始化: {:?}", prefs.mode);
        true
    }

    pub async fn is_initialized(&self) -> bool {
        *self.initialized.lock().await
    }

    /// 停止系统主题订阅
    pub async fn shutdown(&self) {
        if let Some(handle) = self.watcher.lock().await.take() {
            handle.abort();
            debug!("系统主题订阅已停止");
        }
    }

    /// 获取当前偏好
    pub async fn get(&self) -> UserPreferences {
        self.preferences.read().await.clone()
    }

    /// 更新单个字段
    pub async fn set(&self, update: PreferenceUpdate) -> UserPreferences {
        self.mutate(|prefs| update.apply(prefs)).await
    }

    pub async fn set_mode(&self, mode: ThemeMode) -> UserPreferences {
        self.set(PreferenceUpdate::Mode(mode)).await
    }

    pub async fn set_accent_color(&self, color: AccentColor) -> UserPreferences {
        self.set(PreferenceUpdate::AccentColor(color)).await
    }

    pub async fn set_font_family(&self, font: FontFamily) -> UserPreferences {
        self.set(PreferenceUpdate::FontFamily(font)).await
    }

    pub async fn set_language(&self, language: Language) -> UserPreferences {
        self.set(PreferenceUpdate::Language(language)).await
    }

    /// 切换暗色模式
    ///
    /// `System` 模式下按解析后的实际主题取反,结果写为显式模式
    pub async fn toggle_dark_mode(&self) -> UserPreferences {
        let system_dark = self.system_dark_mode();
        self.mutate(|prefs| {
            prefs.mode = match prefs.mode.resolve(system_dark) {
                ResolvedMode::Dark => ThemeMode::Light,
                ResolvedMode::Light => ThemeMode::Dark,
            };
        })
        .await
    }

    pub async fn toggle_sidebar(&self) -> UserPreferences {
        self.mutate(|prefs| prefs.sidebar_collapsed = !prefs.sidebar_collapsed)
            .await
    }

    /// 恢复默认值
    pub async fn reset(&self) -> UserPreferences {
        self.mutate(|prefs| *prefs = UserPreferences::default()).await
    }

    /// 当前系统是否为暗色
    pub fn system_dark_mode(&self) -> bool {
        *self.system_dark.borrow()
    }

    /// 解析后的实际主题
    pub async fn actual_mode(&self) -> ResolvedMode {
        self.preferences
            .read()
            .await
            .mode
            .resolve(self.system_dark_mode())
    }

    pub async fn is_dark(&self) -> bool {
        self.actual_mode().await == ResolvedMode::Dark
    }

    pub async fn current_accent(&self) -> AccentPalette {
        self.preferences.read().await.accent_color.palette()
    }

    pub async fn current_font(&self) -> FontFamily {
        self.preferences.read().await.font_family
    }

    async fn mutate<F>(&self, f: F) -> UserPreferences
    where
        F: FnOnce(&mut UserPreferences),
    {
        let _persist = self.persist.lock().await;
        let snapshot = {
            let mut prefs = self.preferences.write().await;
            f(&mut prefs);
            prefs.clone()
        };

        // 读写锁释放后再执行副作用
        self.save(&snapshot).await;
        self.apply(&snapshot);
        self.event_bus.publish(AppEvent::PreferencesChanged {
            preferences: snapshot.clone(),
        });
        snapshot
    }

    async fn load(&self) {
        match storage::read_json::<UserPreferences>(self.storage.as_ref(), PREFERENCES_KEY).await {
            Ok(Some(stored)) => {
                *self.preferences.write().await = stored;
                debug!("已从本地存储加载偏好设置");
            }
            Ok(None) => {}
            Err(e) => warn!("加载偏好设置失败: {}", e),
        }
    }

    async fn save(&self, prefs: &UserPreferences) {
        if let Err(e) = storage::write_json(self.storage.as_ref(), PREFERENCES_KEY, prefs).await {
            warn!("保存偏好设置失败: {}", e);
            self.event_bus.publish(AppEvent::StorageWriteFailed {
                key: PREFERENCES_KEY.to_string(),
                error: e.to_string(),
            });
        }
    }

    /// 将偏好应用到文档根节点
    fn apply(&self, prefs: &UserPreferences) {
        let mode = prefs.mode.resolve(self.system_dark_mode());
        let is_dark = mode == ResolvedMode::Dark;
        let accent = prefs.accent_color.palette();
        let root = self.document.as_ref();

        root.set_attribute("data-theme", mode.as_str());
        root.toggle_class("theme-dark", is_dark);
        root.toggle_class("theme-light", !is_dark);

        root.set_style_property("--accent", accent.primary);
        root.set_style_property("--accent-weak", accent.light);
        root.set_style_property("--accent-strong", accent.dark);
        root.set_style_property("--accent-rgb", accent.rgb);

        for color in AccentColor::ALL {
            root.remove_class(&color.class_name());
        }
        root.add_class(&prefs.accent_color.class_name());

        root.set_style_property("--font-sans", prefs.font_family.css());
        root.toggle_class("reduced-motion", prefs.reduced_motion);
        root.toggle_class("compact-mode", prefs.compact_mode);

        root.set_attribute("lang", prefs.language.as_str());
        root.set_attribute("dir", prefs.language.direction());

        self.event_bus.publish(AppEvent::ThemeApplied { mode });
    }

    async fn spawn_system_watcher(self: &Arc<Self>) {
        let mut receiver = self.system_dark.clone();
        let weak: Weak<Self> = Arc::downgrade(self);

        let handle = tokio::spawn(async move {
            while receiver.changed().await.is_ok() {
                let dark = *receiver.borrow_and_update();
                let Some(store) = weak.upgrade() else {
                    break;
                };
                debug!("系统主题变化: dark={}", dark);

                let prefs = store.get().await;
                if prefs.mode == ThemeMode::System {
                    store.apply(&prefs);
                }
            }
        });

        *self.watcher.lock().await = Some(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::theme::InMemoryDocument;
    use tokio::time::{timeout, Duration};

    struct Fixture {
        store: Arc<PreferenceStore>,
        storage: Arc<MemoryStorage>,
        document: Arc<InMemoryDocument>,
        system: watch::Sender<bool>,
        event_bus: Arc<EventBus>,
    }

    fn fixture(system_dark: bool) -> Fixture {
        let storage = Arc::new(MemoryStorage::new());
        let document = Arc::new(InMemoryDocument::new());
        let event_bus = Arc::new(EventBus::new(64));
        let (system, receiver) = watch::channel(system_dark);
        let store = PreferenceStore::new(
            storage.clone(),
            document.clone(),
            event_bus.clone(),
            receiver,
        );
        Fixture {
            store,
            storage,
            document,
            system,
            event_bus,
        }
    }

    #[tokio::test]
    async fn test_initialize_runs_once() {
        let f = fixture(false);
        assert!(f.store.initialize().await);
        assert!(!f.store.initialize().await);
        assert!(f.store.is_initialized().await);
        assert_eq!(f.document.attribute("data-theme").as_deref(), Some("light"));
        assert_eq!(f.document.attribute("dir").as_deref(), Some("rtl"));
        f.store.shutdown().await;
    }

    #[tokio::test]
    async fn test_initialize_loads_stored_preferences() {
        let f = fixture(false);
        f.storage
            .set_item(PREFERENCES_KEY, r#"{"mode":"dark","language":"en"}"#)
            .await
            .unwrap();

        f.store.initialize().await;
        let prefs = f.store.get().await;
        assert_eq!(prefs.mode, ThemeMode::Dark);
        assert_eq!(prefs.language, Language::En);
        assert!(f.document.has_class("theme-dark"));
        assert_eq!(f.document.attribute("dir").as_deref(), Some("ltr"));
        f.store.shutdown().await;
    }

    #[tokio::test]
    async fn test_set_persists_and_applies() {
        let f = fixture(false);
        let mut events = f.event_bus.subscribe();

        f.store.set_accent_color(AccentColor::Orange).await;

        let stored: UserPreferences =
            storage::read_json(f.storage.as_ref(), PREFERENCES_KEY).await.unwrap().unwrap();
        assert_eq!(stored.accent_color, AccentColor::Orange);
        assert!(f.document.has_class("accent-orange"));
        assert!(!f.document.has_class("accent-green"));
        assert_eq!(f.document.style_property("--accent").as_deref(), Some("#ff9800"));
        assert_eq!(f.document.style_property("--accent-rgb").as_deref(), Some("255, 152, 0"));

        let mut saw_change = false;
        while let Ok(event) = events.try_recv() {
            if let AppEvent::PreferencesChanged { preferences } = event {
                saw_change = preferences.accent_color == AccentColor::Orange;
            }
        }
        assert!(saw_change);
    }

    #[tokio::test]
    async fn test_toggle_dark_mode_from_system_inverts_resolved_value() {
        let f = fixture(true);
        f.store.set_mode(ThemeMode::System).await;
        assert!(f.store.is_dark().await);

        let prefs = f.store.toggle_dark_mode().await;
        assert_eq!(prefs.mode, ThemeMode::Light);

        let prefs = f.store.toggle_dark_mode().await;
        assert_eq!(prefs.mode, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn test_toggle_sidebar() {
        let f = fixture(false);
        assert!(f.store.toggle_sidebar().await.sidebar_collapsed);
        assert!(!f.store.toggle_sidebar().await.sidebar_collapsed);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let f = fixture(false);
        f.store.set_mode(ThemeMode::Dark).await;
        f.store.set_font_family(FontFamily::Peyda).await;
        f.store.set_language(Language::En).await;
        f.store.set(PreferenceUpdate::CompactMode(true)).await;
        f.store.set(PreferenceUpdate::SoundEnabled(false)).await;
        f.store.toggle_sidebar().await;

        let prefs = f.store.reset().await;
        assert_eq!(prefs, UserPreferences::default());
        assert!(!f.document.has_class("compact-mode"));
        assert_eq!(
            f.document.style_property("--font-sans").as_deref(),
            Some(FontFamily::Vazir.css())
        );
    }

    #[tokio::test]
    async fn test_storage_failure_is_swallowed() {
        let storage = Arc::new(MemoryStorage::with_quota(4));
        let document = Arc::new(InMemoryDocument::new());
        let (_system, receiver) = watch::channel(false);
        let store = PreferenceStore::new(
            storage,
            document.clone(),
            Arc::new(EventBus::new(8)),
            receiver,
        );

        // 写入失败不影响内存状态与文档效果
        let prefs = store.set_mode(ThemeMode::Dark).await;
        assert_eq!(prefs.mode, ThemeMode::Dark);
        assert_eq!(document.attribute("data-theme").as_deref(), Some("dark"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_toggles_persist_latest_state() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(crate::storage::FileStorage::new(temp_dir.path()).await.unwrap());
        let (_system, receiver) = watch::channel(false);
        let store = PreferenceStore::new(
            storage.clone(),
            Arc::new(InMemoryDocument::new()),
            Arc::new(EventBus::new(256)),
            receiver,
        );

        let tasks: Vec<_> = (0..21)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.toggle_sidebar().await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let in_memory = store.get().await;
        assert!(in_memory.sidebar_collapsed);
        let stored: UserPreferences = storage::read_json(storage.as_ref(), PREFERENCES_KEY)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, in_memory);
    }

    #[tokio::test]
    async fn test_system_signal_reapplies_in_system_mode() {
        let f = fixture(false);
        f.store.initialize().await;
        f.store.set_mode(ThemeMode::System).await;
        assert_eq!(f.document.attribute("data-theme").as_deref(), Some("light"));

        let mut events = f.event_bus.subscribe();
        f.system.send(true).unwrap();

        // 等待订阅任务重新应用主题
        let applied = timeout(Duration::from_secs(1), async {
            loop {
                if let Ok(AppEvent::ThemeApplied { mode }) = events.recv().await {
                    if mode == ResolvedMode::Dark {
                        break;
                    }
                }
            }
        })
        .await;
        assert!(applied.is_ok());
        assert_eq!(f.document.attribute("data-theme").as_deref(), Some("dark"));
        f.store.shutdown().await;
    }
}
