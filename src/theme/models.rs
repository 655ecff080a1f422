// 偏好设置数据模型

use serde::{Deserialize, Serialize};

/// 主题模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// 跟随操作系统
    System,
}

/// 解析 `System` 之后的实际主题
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedMode {
    Light,
    Dark,
}

impl ResolvedMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl ThemeMode {
    /// 结合系统暗色信号解析实际主题
    pub fn resolve(self, system_dark: bool) -> ResolvedMode {
        match self {
            Self::Light => ResolvedMode::Light,
            Self::Dark => ResolvedMode::Dark,
            Self::System if system_dark => ResolvedMode::Dark,
            Self::System => ResolvedMode::Light,
        }
    }
}

/// 强调色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    Green,
    Blue,
    Purple,
    Orange,
    Teal,
}

/// 强调色色板
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccentPalette {
    pub primary: &'static str,
    pub light: &'static str,
    pub dark: &'static str,
    pub rgb: &'static str,
}

impl AccentColor {
    pub const ALL: [AccentColor; 5] = [
        AccentColor::Green,
        AccentColor::Blue,
        AccentColor::Purple,
        AccentColor::Orange,
        AccentColor::Teal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Orange => "orange",
            Self::Teal => "teal",
        }
    }

    /// 文档根节点上的辅助类名
    pub fn class_name(&self) -> String {
        format!("accent-{}", self.as_str())
    }

    pub fn palette(&self) -> AccentPalette {
        match self {
            Self::Green => AccentPalette {
                primary: "#4caf50",
                light: "#e8f5e9",
                dark: "#2e7d32",
                rgb: "76, 175, 80",
            },
            Self::Blue => AccentPalette {
                primary: "#2196f3",
                light: "#e3f2fd",
                dark: "#1565c0",
                rgb: "33, 150, 243",
            },
            Self::Purple => AccentPalette {
                primary: "#7e57c2",
                light: "#ede7f6",
                dark: "#512da8",
                rgb: "126, 87, 194",
            },
            Self::Orange => AccentPalette {
                primary: "#ff9800",
                light: "#fff3e0",
                dark: "#e65100",
                rgb: "255, 152, 0",
            },
            Self::Teal => AccentPalette {
                primary: "#009688",
                light: "#e0f2f1",
                dark: "#00695c",
                rgb: "0, 150, 136",
            },
        }
    }
}

/// 字体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    Vazir,
    Iransans,
    Peyda,
}

impl FontFamily {
    /// 界面上显示的字体名
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Vazir => "وزیر",
            Self::Iransans => "ایران سنس",
            Self::Peyda => "پیدا",
        }
    }

    /// CSS font-family 声明
    pub fn css(&self) -> &'static str {
        match self {
            Self::Vazir => "'vazir', 'Vazirmatn', sans-serif",
            Self::Iransans => "'IRANSansX', 'IRANSans', sans-serif",
            Self::Peyda => "'Peyda', sans-serif",
        }
    }
}

/// 界面语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Fa,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fa => "fa",
            Self::En => "en",
        }
    }

    /// 文字方向
    pub fn direction(&self) -> &'static str {
        match self {
            Self::Fa => "rtl",
            Self::En => "ltr",
        }
    }
}

/// 用户偏好设置
///
/// 以 camelCase 存储;反序列化时缺失字段取默认值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub mode: ThemeMode,
    pub accent_color: AccentColor,
    pub font_family: FontFamily,
    pub language: Language,
    pub reduced_motion: bool,
    pub compact_mode: bool,
    pub sidebar_collapsed: bool,
    pub notifications_enabled: bool,
    pub sound_enabled: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Light,
            accent_color: AccentColor::Green,
            font_family: FontFamily::Vazir,
            language: Language::Fa,
            reduced_motion: false,
            compact_mode: false,
            sidebar_collapsed: false,
            notifications_enabled: true,
            sound_enabled: true,
        }
    }
}

/// 单字段更新
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "camelCase")]
pub enum PreferenceUpdate {
    Mode(ThemeMode),
    AccentColor(AccentColor),
    FontFamily(FontFamily),
    Language(Language),
    ReducedMotion(bool),
    CompactMode(bool),
    SidebarCollapsed(bool),
    NotificationsEnabled(bool),
    SoundEnabled(bool),
}

impl PreferenceUpdate {
    pub fn apply(self, prefs: &mut UserPreferences) {
        match self {
            Self::Mode(v) => prefs.mode = v,
            Self::AccentColor(v) => prefs.accent_color = v,
            Self::FontFamily(v) => prefs.font_family = v,
            Self::Language(v) => prefs.language = v,
            Self::ReducedMotion(v) => prefs.reduced_motion = v,
            Self::CompactMode(v) => prefs.compact_mode = v,
            Self::SidebarCollapsed(v) => prefs.sidebar_collapsed = v,
            Self::NotificationsEnabled(v) => prefs.notifications_enabled = v,
            Self::SoundEnabled(v) => prefs.sound_enabled = v,
        }
    }
}
