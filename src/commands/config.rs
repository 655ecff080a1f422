//! 配置管理命令
//!
//! 提供后台配置的读取和更新接口

use tracing::info;

use crate::models::{ConfigPatch, DashboardConfig};
use crate::AppState;

/// 获取后台配置
pub async fn get_dashboard_config(state: &AppState) -> Result<DashboardConfig, String> {
    Ok(state.storage_domain.get_settings().get().await)
}

/// 更新配置
///
/// 目录类设置在下次启动时生效
pub async fn update_dashboard_config(
    state: &AppState,
    patch: ConfigPatch,
) -> Result<DashboardConfig, String> {
    let updated = state
        .storage_domain
        .get_settings()
        .update(patch)
        .await
        .map_err(|e| e.to_string())?;

    info!("后台配置已更新");
    state.event_bus.publish(crate::event_bus::AppEvent::ConfigUpdated);
    Ok(updated)
}

/// 开关界面日志推送
pub async fn set_frontend_logging(state: &AppState, enabled: bool) -> Result<(), String> {
    state.system_domain.get_logger().set_enabled(enabled);
    info!("界面日志推送已{}", if enabled { "开启" } else { "关闭" });
    Ok(())
}
