// 存储领域管理器
//
// 负责本地存储、导出和设置管理相关的功能
// 包含 LocalStorage、ExportSink 和 SettingsManager 三个核心组件

use std::sync::Arc;
use crate::settings::SettingsManager;
use crate::storage::LocalStorage;
use crate::table::ExportSink;

/// 存储领域管理器 - 负责本地存储、导出和设置
#[derive(Clone)]
pub struct StorageDomain {
    storage: Arc<dyn LocalStorage>,
    export_sink: Arc<dyn ExportSink>,
    settings: Arc<SettingsManager>,
}

impl StorageDomain {
    /// 创建新的存储领域管理器
    pub fn new(
        storage: Arc<dyn LocalStorage>,
        export_sink: Arc<dyn ExportSink>,
        settings: Arc<SettingsManager>,
    ) -> Self {
        Self { storage, export_sink, settings }
    }

    /// 获取本地存储
    pub fn get_storage(&self) -> &Arc<dyn LocalStorage> {
        &self.storage
    }

    /// 获取导出接收方
    pub fn get_export_sink(&self) -> &Arc<dyn ExportSink> {
        &self.export_sink
    }

    /// 获取设置管理器
    pub fn get_settings(&self) -> &Arc<SettingsManager> {
        &self.settings
    }
}
