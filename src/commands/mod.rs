//! 命令模块
//!
//! 提供界面层调用的所有命令接口，按功能分组：
//! - config: 配置管理命令
//! - preferences: 外观偏好命令
//! - notifications: 通知中心命令
//! - members: 会员管理与导出命令
//! - registration: 注册命令
//! - navigation: 路由解析命令

pub mod config;
pub mod members;
pub mod navigation;
pub mod notifications;
pub mod preferences;
pub mod registration;

// 重新导出所有命令
pub use config::*;
pub use members::*;
pub use navigation::*;
pub use notifications::*;
pub use preferences::*;
pub use registration::*;

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;
    use std::sync::Arc;

    use crate::logger::LogBroadcaster;
    use crate::scheduler::ImmediateScheduler;
    use crate::AppState;

    /// 以临时目录为根启动并初始化完整状态
    pub async fn state_in(dir: &Path) -> AppState {
        let state = crate::app::bootstrap(
            dir,
            ImmediateScheduler::new(),
            Arc::new(LogBroadcaster::new()),
        )
        .await
        .unwrap();
        crate::app::wait_seeding(crate::app::initialize(&state).await).await;
        state
    }
}
