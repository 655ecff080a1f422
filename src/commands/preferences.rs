//! 外观偏好命令
//!
//! 提供主题模式、强调色、字体、语言与侧边栏状态的读写接口

use serde::Serialize;

use crate::theme::{AccentPalette, PreferenceUpdate, ResolvedMode, UserPreferences};
use crate::AppState;

/// 界面渲染所需的完整主题状态
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeState {
    pub preferences: UserPreferences,
    pub actual_mode: ResolvedMode,
    pub is_dark: bool,
    pub system_dark_mode: bool,
    pub accent: AccentPalette,
    pub font_css: &'static str,
}

/// 获取偏好设置
pub async fn get_preferences(state: &AppState) -> Result<UserPreferences, String> {
    Ok(state.appearance_domain.get_preferences().get().await)
}

/// 获取主题状态
pub async fn get_theme_state(state: &AppState) -> Result<ThemeState, String> {
    let store = state.appearance_domain.get_preferences();
    Ok(ThemeState {
        preferences: store.get().await,
        actual_mode: store.actual_mode().await,
        is_dark: store.is_dark().await,
        system_dark_mode: store.system_dark_mode(),
        accent: store.current_accent().await,
        font_css: store.current_font().await.css(),
    })
}

/// 更新单项偏好
pub async fn update_preference(
    state: &AppState,
    update: PreferenceUpdate,
) -> Result<UserPreferences, String> {
    Ok(state.appearance_domain.get_preferences().set(update).await)
}

/// 在浅色与深色之间切换
pub async fn toggle_dark_mode(state: &AppState) -> Result<UserPreferences, String> {
    Ok(state.appearance_domain.get_preferences().toggle_dark_mode().await)
}

pub async fn toggle_sidebar(state: &AppState) -> Result<UserPreferences, String> {
    Ok(state.appearance_domain.get_preferences().toggle_sidebar().await)
}

/// 恢复默认偏好
pub async fn reset_preferences(state: &AppState) -> Result<UserPreferences, String> {
    Ok(state.appearance_domain.get_preferences().reset().await)
}

/// 更新系统深色模式信号
pub async fn set_system_dark_mode(state: &AppState, dark: bool) -> Result<(), String> {
    state.appearance_domain.set_system_dark(dark);
    Ok(())
}
