// 会员抽奖管理后台 - 状态与数据层主库

// 声明模块
pub mod app;
pub mod commands;
pub mod crud;
pub mod domains;
pub mod event_bus;
pub mod logger;
pub mod mock;
pub mod models;
pub mod notifications;
pub mod registration;
pub mod routes;
pub mod scheduler;
pub mod settings;
pub mod storage;
pub mod table;
pub mod theme;
pub mod utils;

use std::sync::Arc;

use domains::{AppearanceDomain, MembersDomain, StorageDomain, SystemDomain};
use event_bus::EventBus;

/// 应用状态（按领域分组）
///
/// - 外观领域：负责主题、字体、语言等用户偏好
/// - 会员领域：负责会员名册与会员详情数据
/// - 存储领域：负责本地存储、导出与设置管理
/// - 系统领域：负责日志、调度与通知
/// - 事件总线：用于领域间解耦通信
#[derive(Clone)]
pub struct AppState {
    /// 外观领域管理器
    pub appearance_domain: Arc<AppearanceDomain>,
    /// 会员领域管理器
    pub members_domain: Arc<MembersDomain>,
    /// 存储领域管理器
    pub storage_domain: Arc<StorageDomain>,
    /// 系统领域管理器
    pub system_domain: Arc<SystemDomain>,
    /// 事件总线
    pub event_bus: Arc<EventBus>,
}

pub use app::run;
