// CRUD 记录抽象 - 唯一 ID + 任意字段

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::error::CrudError;

/// 部分字段(用于新建、更新与表单暂存)
pub type Patch = serde_json::Map<String, Value>;

/// 动态记录:任意 JSON 对象,`id` 字段为主键
pub type DynamicRecord = serde_json::Map<String, Value>;

/// 记录 ID(数字或字符串)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// 数字形式(字符串 ID 尝试按整数解析)
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Number),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Number(n) => Value::from(*n),
            Self::Text(s) => Value::from(s.clone()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// 可被 CRUD 管理的记录
pub trait CrudRecord: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> RecordId;
}

impl CrudRecord for DynamicRecord {
    fn id(&self) -> RecordId {
        self.get("id")
            .and_then(RecordId::from_value)
            .unwrap_or_else(|| RecordId::Text(String::new()))
    }
}

/// 记录转为字段表
pub fn to_patch<T: Serialize>(record: &T) -> Result<Patch, CrudError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(CrudError::InvalidRecord(format!(
            "记录必须序列化为对象, 实际为 {}",
            other
        ))),
    }
}

/// 从字段表构造记录,`id` 字段以参数为准
pub fn build_record<T: CrudRecord>(mut fields: Patch, id: &RecordId) -> Result<T, CrudError> {
    fields.insert("id".to_string(), id.to_value());
    Ok(serde_json::from_value(Value::Object(fields))?)
}

/// 将 `changes` 覆盖到已有记录上,保持原 ID
pub fn merge_record<T: CrudRecord>(existing: &T, changes: &Patch) -> Result<T, CrudError> {
    let mut fields = to_patch(existing)?;
    for (key, value) in changes {
        fields.insert(key.clone(), value.clone());
    }
    build_record(fields, &existing.id())
}

/// 下一个 ID:现有数字 ID 的最大值 + 1(无数字 ID 时为 1)
pub fn next_id<T: CrudRecord>(items: &[T]) -> i64 {
    items
        .iter()
        .filter_map(|item| item.id().as_number())
        .fold(0, i64::max)
        + 1
}
