//! 应用程序初始化和启动
//!
//! 负责后台状态层的完整启动流程，包括：
//! - 设置加载
//! - 日志系统初始化
//! - 各领域模块初始化
//! - 偏好与通知存储的一次性初始化
//! - 退出时的清理

use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::domains::{AppearanceDomain, MembersDomain, StorageDomain, SystemDomain};
use crate::event_bus::{AppEvent, EventBus};
use crate::logger::{self, LogBroadcaster};
use crate::mock::MockContext;
use crate::models::DashboardConfig;
use crate::notifications::NotificationStore;
use crate::scheduler::{Scheduler, TokioScheduler};
use crate::settings::SettingsManager;
use crate::storage::FileStorage;
use crate::table::DirectorySink;
use crate::theme::{InMemoryDocument, PreferenceStore};
use crate::utils;
use crate::AppState;

/// 配置文件名
pub const CONFIG_FILE: &str = "dashboard.json";

/// 构建应用状态(不初始化日志,不触发存储加载)
///
/// 需在 tokio 运行时中调用
pub async fn bootstrap(
    data_dir: &Path,
    scheduler: Arc<dyn Scheduler>,
    log_broadcaster: Arc<LogBroadcaster>,
) -> anyhow::Result<AppState> {
    // 先初始化设置管理器，以便读取目录配置
    let settings = Arc::new(
        SettingsManager::with_default(
            data_dir.join(CONFIG_FILE),
            DashboardConfig::rooted_at(data_dir),
        )
        .await?,
    );
    let config = settings.get().await;

    let event_bus = Arc::new(EventBus::new(config.event_bus_capacity));

    // 存储与导出
    let storage = Arc::new(FileStorage::new(&config.storage_dir).await?);
    let export_sink = Arc::new(DirectorySink::new(&config.export_dir).with_events(event_bus.clone()));
    let storage_domain = Arc::new(StorageDomain::new(storage.clone(), export_sink, settings));

    // 外观
    let (system_dark_tx, system_dark_rx) = watch::channel(false);
    let document = Arc::new(InMemoryDocument::new());
    let preferences = PreferenceStore::new(
        storage.clone(),
        document.clone(),
        event_bus.clone(),
        system_dark_rx,
    );
    let appearance_domain = Arc::new(AppearanceDomain::new(
        preferences,
        document,
        Arc::new(system_dark_tx),
    ));

    // 通知与系统
    let notifications = NotificationStore::with_seeding(
        storage,
        event_bus.clone(),
        scheduler.clone(),
        config.seed_sample_notifications,
        config.notification_stagger(),
    );
    let system_domain = Arc::new(SystemDomain::new(
        log_broadcaster,
        scheduler.clone(),
        notifications,
    ));

    // 会员
    let mock_context = MockContext::new(scheduler, event_bus.clone(), config.loading_delays.clone());
    let members_domain = Arc::new(MembersDomain::new(mock_context));

    info!("应用状态已构建: 存储目录 {:?}", config.storage_dir);

    Ok(AppState {
        appearance_domain,
        members_domain,
        storage_domain,
        system_domain,
        event_bus,
    })
}

/// 一次性初始化偏好与通知存储
///
/// 示例通知在后台错峰写入,返回该任务的句柄(未触发写入时为 None)
pub async fn initialize(state: &AppState) -> Option<JoinHandle<()>> {
    state
        .appearance_domain
        .get_preferences()
        .initialize()
        .await;

    let seeding = state.system_domain.get_notifications().initialize().await;

    let unread = state.system_domain.get_notifications().unread_count().await;
    info!("初始化完成: {} 条未读通知", unread);
    seeding
}

/// 等待示例通知写入完成
pub async fn wait_seeding(seeding: Option<JoinHandle<()>>) {
    if let Some(handle) = seeding {
        if let Err(e) = handle.await {
            warn!("示例通知写入任务异常结束: {}", e);
        }
    }
}

/// 退出前清理
pub async fn shutdown(state: &AppState) {
    state.appearance_domain.get_preferences().shutdown().await;
    info!("应用已关闭");
}

/// 应用程序入口点
///
/// 1. 数据目录与设置加载
/// 2. 日志系统初始化
/// 3. 领域模块初始化
/// 4. 等待退出信号
pub async fn run() -> anyhow::Result<()> {
    let data_dir = utils::get_data_dir().map_err(anyhow::Error::msg)?;
    tokio::fs::create_dir_all(&data_dir).await?;

    // 创建日志广播器
    let log_broadcaster = Arc::new(LogBroadcaster::new());

    let settings = SettingsManager::with_default(
        data_dir.join(CONFIG_FILE),
        DashboardConfig::rooted_at(&data_dir),
    )
    .await?;
    let log_dir = match settings.get().await.log_dir {
        Some(dir) => dir,
        None => utils::get_log_dir().map_err(anyhow::Error::msg)?,
    };

    // 初始化日志系统（带界面推送功能）
    let _guard = logger::init_with_broadcaster(&log_dir, log_broadcaster.clone())?;
    info!("初始化会员抽奖管理后台...");

    let state = bootstrap(&data_dir, Arc::new(TokioScheduler), log_broadcaster).await?;
    let seeding = initialize(&state).await;

    // 事件日志
    let mut events = state.event_bus.subscribe();
    let event_logger = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                AppEvent::StorageWriteFailed { key, error } => {
                    warn!("存储写入失败 [{}]: {}", key, error)
                }
                other => tracing::debug!("事件: {:?}", other),
            }
        }
    });

    tokio::signal::ctrl_c().await?;
    info!("收到退出信号");

    event_logger.abort();
    if let Some(handle) = seeding {
        handle.abort();
    }
    shutdown(&state).await;
    Ok(())
}
