// CRUD 错误类型

use super::record::RecordId;

#[derive(Debug, thiserror::Error)]
pub enum CrudError {
    #[error("记录不存在: {0}")]
    NotFound(RecordId),

    #[error("{stage} 钩子失败: {message}")]
    Hook {
        stage: &'static str,
        message: String,
    },

    #[error("删除被拒绝: {0}")]
    Vetoed(RecordId),

    #[error("记录序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("无效记录: {0}")]
    InvalidRecord(String),
}

impl CrudError {
    pub(crate) fn hook(stage: &'static str, error: anyhow::Error) -> Self {
        Self::Hook {
            stage,
            message: format!("{:#}", error),
        }
    }
}
