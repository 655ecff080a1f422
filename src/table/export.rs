// 导出 - CSV/JSON 生成与文件投递

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

use crate::event_bus::{AppEvent, EventBus};
use crate::utils::validate_export_filename;

pub const CSV_MIME: &str = "text/csv;charset=utf-8;";
pub const JSON_MIME: &str = "application/json;charset=utf-8;";
pub const UTF8_BOM: &str = "\u{feff}";

/// 导出列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportHeader {
    pub key: String,
    pub title: String,
}

impl ExportHeader {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
        }
    }
}

/// 待投递的导出文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// 导出文件的接收方(浏览器下载、本地目录等)
#[async_trait]
pub trait ExportSink: Send + Sync {
    async fn deliver(&self, file: ExportFile) -> Result<()>;
}

/// 单元格转义:整体加引号,内部引号加倍
pub fn quote_cell(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// 默认文件名 `export_<毫秒>.<扩展名>`
pub fn default_filename(extension: &str) -> String {
    format!(
        "export_{}.{}",
        chrono::Utc::now().timestamp_millis(),
        extension
    )
}

/// 将导出写入目录
pub struct DirectorySink {
    dir: PathBuf,
    event_bus: Option<std::sync::Arc<EventBus>>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            event_bus: None,
        }
    }

    /// 投递结果发布到事件总线
    pub fn with_events(mut self, event_bus: std::sync::Arc<EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn write(&self, file: &ExportFile) -> Result<PathBuf> {
        validate_export_filename(&file.filename).map_err(anyhow::Error::msg)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("创建导出目录失败: {:?}", self.dir))?;

        let path = self.dir.join(file.filename.trim());
        tokio::fs::write(&path, &file.bytes)
            .await
            .with_context(|| format!("写入导出文件失败: {:?}", path))?;
        Ok(path)
    }
}

#[async_trait]
impl ExportSink for DirectorySink {
    async fn deliver(&self, file: ExportFile) -> Result<()> {
        match self.write(&file).await {
            Ok(path) => {
                info!("导出完成: {:?} ({} 字节)", path, file.bytes.len());
                if let Some(bus) = &self.event_bus {
                    bus.publish(AppEvent::ExportCompleted {
                        filename: file.filename.clone(),
                        bytes: file.bytes.len(),
                    });
                }
                Ok(())
            }
            Err(e) => {
                if let Some(bus) = &self.event_bus {
                    bus.publish(AppEvent::ExportFailed {
                        filename: file.filename.clone(),
                        error: format!("{:#}", e),
                    });
                }
                Err(e)
            }
        }
    }
}

/// 内存接收方(命令层预览与测试)
#[derive(Default)]
pub struct MemorySink {
    files: Mutex<Vec<ExportFile>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> Vec<ExportFile> {
        self.files.lock().map(|f| f.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<ExportFile> {
        self.files.lock().ok().and_then(|f| f.last().cloned())
    }
}

#[async_trait]
impl ExportSink for MemorySink {
    async fn deliver(&self, file: ExportFile) -> Result<()> {
        debug!("内存导出: {}", file.filename);
        self.files
            .lock()
            .map_err(|_| anyhow::anyhow!("导出缓冲区锁已损坏"))?
            .push(file);
        Ok(())
    }
}
