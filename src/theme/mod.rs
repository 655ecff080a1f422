// 主题模块 - 用户偏好设置与文档效果

pub mod document;
pub mod models;
pub mod store;

pub use document::{DocumentRoot, DocumentSnapshot, InMemoryDocument};
pub use models::{
    AccentColor, AccentPalette, FontFamily, Language, PreferenceUpdate, ResolvedMode, ThemeMode,
    UserPreferences,
};
pub use store::PreferenceStore;
