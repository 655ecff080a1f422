// 外观领域管理器
//
// 负责用户偏好与系统深色模式信号

use std::sync::Arc;
use tokio::sync::watch;
use crate::theme::{DocumentRoot, PreferenceStore};

/// 外观领域管理器 - 负责主题、字体、语言等偏好
#[derive(Clone)]
pub struct AppearanceDomain {
    preferences: Arc<PreferenceStore>,
    document: Arc<dyn DocumentRoot>,
    system_dark: Arc<watch::Sender<bool>>,
}

impl AppearanceDomain {
    /// 创建新的外观领域管理器
    pub fn new(
        preferences: Arc<PreferenceStore>,
        document: Arc<dyn DocumentRoot>,
        system_dark: Arc<watch::Sender<bool>>,
    ) -> Self {
        Self { preferences, document, system_dark }
    }

    /// 获取偏好存储
    pub fn get_preferences(&self) -> &Arc<PreferenceStore> {
        &self.preferences
    }

    /// 获取文档根
    pub fn get_document(&self) -> &Arc<dyn DocumentRoot> {
        &self.document
    }

    /// 更新系统深色模式信号(值未变化时不通知)
    pub fn set_system_dark(&self, dark: bool) {
        self.system_dark.send_if_modified(|current| {
            if *current == dark {
                false
            } else {
                *current = dark;
                true
            }
        });
    }
}
