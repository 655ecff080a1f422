// 表格过滤与文本化

use serde_json::Value;

/// 过滤条件(字段名 -> 值)
pub type Filters = serde_json::Map<String, Value>;

/// 值的文本形式:字符串原样输出,空值为空串,其他为 JSON 文本
pub fn text_of(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 过滤值是否生效(null 与空串视为未设置)
pub fn is_active(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// 单个字段是否满足过滤条件
///
/// 字符串条件按文本形式做不区分大小写的包含匹配,其他条件要求完全相等;
/// 缺失字段不匹配任何条件
pub fn field_matches(field: Option<&Value>, expected: &Value) -> bool {
    let Some(actual) = field else {
        return false;
    };
    match expected {
        Value::String(needle) => text_of(actual)
            .to_lowercase()
            .contains(&needle.to_lowercase()),
        _ => actual == expected,
    }
}

/// 默认过滤策略:所有生效条件同时满足
pub fn matches_all(record: &Value, filters: &Filters) -> bool {
    filters
        .iter()
        .filter(|(_, expected)| is_active(expected))
        .all(|(key, expected)| field_matches(record.get(key), expected))
}

/// 全文搜索:任一字段的文本形式包含关键字
pub fn matches_search(record: &Value, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    match record {
        Value::Object(map) => map
            .values()
            .any(|value| text_of(value).to_lowercase().contains(&needle)),
        other => text_of(other).to_lowercase().contains(&needle),
    }
}
