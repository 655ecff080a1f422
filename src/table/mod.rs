// 通用数据表 - 搜索、过滤、分页与导出
//
// 表格不持有记录,所有查询都以记录切片为参数,可叠加在 CRUD 列表之上

pub mod export;
pub mod filter;

pub use export::{
    default_filename, quote_cell, DirectorySink, ExportFile, ExportHeader, ExportSink, MemorySink,
    CSV_MIME, JSON_MIME, UTF8_BOM,
};
pub use filter::{field_matches, matches_all, matches_search, text_of, Filters};

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

/// 列格式化函数
pub type Formatter = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// 自定义过滤函数(设置后且存在过滤键时单独决定结果)
pub type FilterPredicate<T> = Arc<dyn Fn(&T, &Filters) -> bool + Send + Sync>;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

pub struct DataTable<T> {
    search: String,
    items_per_page: usize,
    filters: Filters,
    initial_filters: Filters,
    filter_fn: Option<FilterPredicate<T>>,
    formatters: HashMap<String, Formatter>,
}

impl<T> Default for DataTable<T> {
    fn default() -> Self {
        Self {
            search: String::new(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            filters: Filters::new(),
            initial_filters: Filters::new(),
            filter_fn: None,
            formatters: HashMap::new(),
        }
    }
}

impl<T: Serialize> DataTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    /// 初始过滤条件(`clear_filters` 会恢复到这里)
    pub fn with_initial_filters(mut self, filters: Filters) -> Self {
        self.filters = filters.clone();
        self.initial_filters = filters;
        self
    }

    /// 自定义过滤谓词
    ///
    /// 存在任一过滤键时由谓词单独决定是否保留,内置字段匹配不再参与;
    /// 全局搜索仍然生效,因此 CSV/JSON 导出同样只包含命中搜索的记录
    pub fn with_filter_fn(
        mut self,
        predicate: impl Fn(&T, &Filters) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.filter_fn = Some(Arc::new(predicate));
        self
    }

    pub fn with_formatter(
        mut self,
        key: impl Into<String>,
        formatter: impl Fn(&Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.formatters.insert(key.into(), Arc::new(formatter));
        self
    }

    // ========== 状态 ==========

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page;
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn set_filter(&mut self, key: impl Into<String>, value: Value) {
        self.filters.insert(key.into(), value);
    }

    /// 恢复为初始过滤条件
    pub fn clear_filters(&mut self) {
        self.filters = self.initial_filters.clone();
    }

    // ========== 查询 ==========

    fn includes(&self, item: &T) -> bool {
        let record = serde_json::to_value(item).unwrap_or(Value::Null);

        let passes_filters = match &self.filter_fn {
            Some(predicate) if !self.filters.is_empty() => predicate(item, &self.filters),
            _ => matches_all(&record, &self.filters),
        };

        passes_filters && matches_search(&record, &self.search)
    }

    /// 过滤后的记录(过滤条件与全局搜索同时生效,导出也基于此视图)
    pub fn filtered_items<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.includes(item)).collect()
    }

    /// 第 `page` 页(从 1 开始);每页条数为 0 时返回全部
    pub fn page<'a>(&self, items: &'a [T], page: usize) -> Vec<&'a T> {
        let filtered = self.filtered_items(items);
        if self.items_per_page == 0 {
            return filtered;
        }
        let start = page.saturating_sub(1) * self.items_per_page;
        filtered
            .into_iter()
            .skip(start)
            .take(self.items_per_page)
            .collect()
    }

    pub fn page_count(&self, items: &[T]) -> usize {
        let total = self.filtered_items(items).len();
        if self.items_per_page == 0 {
            return usize::from(total > 0);
        }
        total.div_ceil(self.items_per_page)
    }

    pub fn format_value(&self, key: &str, value: &Value) -> String {
        match self.formatters.get(key) {
            Some(formatter) => formatter(value),
            None => text_of(value),
        }
    }

    // ========== 导出 ==========

    /// 生成 CSV 文本(不含 BOM)
    pub fn to_csv(&self, items: &[T], headers: &[ExportHeader]) -> String {
        let mut lines = Vec::with_capacity(items.len() + 1);
        lines.push(
            headers
                .iter()
                .map(|h| h.title.as_str())
                .collect::<Vec<_>>()
                .join(","),
        );

        for item in self.filtered_items(items) {
            let record = serde_json::to_value(item).unwrap_or(Value::Null);
            let row = headers
                .iter()
                .map(|h| {
                    let value = record.get(&h.key).unwrap_or(&Value::Null);
                    quote_cell(&self.format_value(&h.key, value))
                })
                .collect::<Vec<_>>()
                .join(",");
            lines.push(row);
        }

        lines.join("\n")
    }

    /// 导出 CSV(UTF-8 BOM),文件名缺省为 `export_<毫秒>.csv`
    pub async fn export_to_csv(
        &self,
        items: &[T],
        headers: &[ExportHeader],
        filename: Option<&str>,
        sink: &dyn ExportSink,
    ) -> bool {
        let filename = filename
            .map(str::to_string)
            .unwrap_or_else(|| default_filename("csv"));
        let content = format!("{}{}", UTF8_BOM, self.to_csv(items, headers));

        let file = ExportFile {
            filename,
            mime_type: CSV_MIME.to_string(),
            bytes: content.into_bytes(),
        };
        deliver(file, sink).await
    }

    /// 导出 JSON(缩进格式),文件名缺省为 `export_<毫秒>.json`
    pub async fn export_to_json(
        &self,
        items: &[T],
        filename: Option<&str>,
        sink: &dyn ExportSink,
    ) -> bool {
        let filename = filename
            .map(str::to_string)
            .unwrap_or_else(|| default_filename("json"));

        let content = match serde_json::to_string_pretty(&self.filtered_items(items)) {
            Ok(content) => content,
            Err(e) => {
                error!("导出 JSON 失败: {}", e);
                return false;
            }
        };

        let file = ExportFile {
            filename,
            mime_type: JSON_MIME.to_string(),
            bytes: content.into_bytes(),
        };
        deliver(file, sink).await
    }
}

async fn deliver(file: ExportFile, sink: &dyn ExportSink) -> bool {
    let filename = file.filename.clone();
    match sink.deliver(file).await {
        Ok(()) => {
            debug!("导出已投递: {}", filename);
            true
        }
        Err(e) => {
            error!("导出 {} 失败: {:#}", filename, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use async_trait::async_trait;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Value> {
        value.as_array().cloned().unwrap()
    }

    struct BrokenSink;

    #[async_trait]
    impl ExportSink for BrokenSink {
        async fn deliver(&self, _file: ExportFile) -> anyhow::Result<()> {
            bail!("磁盘已满")
        }
    }

    #[test]
    fn test_status_filter() {
        let items = rows(json!([{"status": "active"}, {"status": "suspended"}]));
        let mut table = DataTable::new();
        table.set_filter("status", json!("active"));

        let filtered = table.filtered_items(&items);
        assert_eq!(filtered, vec![&items[0]]);
    }

    #[test]
    fn test_clear_filters_restores_initial() {
        let mut initial = Filters::new();
        initial.insert("type".into(), json!("purchase"));
        let mut table: DataTable<Value> = DataTable::new().with_initial_filters(initial.clone());

        table.set_filter("status", json!("done"));
        assert_eq!(table.filters().len(), 2);
        table.clear_filters();
        assert_eq!(table.filters(), &initial);
    }

    #[test]
    fn test_custom_predicate_decides_alone() {
        let items = rows(json!([{"amount": 10}, {"amount": 500}]));
        let mut table = DataTable::new().with_filter_fn(|item: &Value, filters: &Filters| {
            let min = filters.get("min").and_then(Value::as_i64).unwrap_or(0);
            item["amount"].as_i64().unwrap_or(0) >= min
        });

        // 无过滤键时走默认策略
        assert_eq!(table.filtered_items(&items).len(), 2);

        table.set_filter("min", json!(100));
        assert_eq!(table.filtered_items(&items), vec![&items[1]]);
    }

    #[test]
    fn test_custom_predicate_still_honours_search() {
        let items = rows(json!([
            {"name": "alpha", "amount": 500},
            {"name": "beta", "amount": 700},
        ]));
        let mut table = DataTable::new().with_filter_fn(|item: &Value, filters: &Filters| {
            let min = filters.get("min").and_then(Value::as_i64).unwrap_or(0);
            item["amount"].as_i64().unwrap_or(0) >= min
        });
        table.set_filter("min", json!(100));
        table.set_search("BET");

        assert_eq!(table.filtered_items(&items), vec![&items[1]]);
        let csv = table.to_csv(&items, &[ExportHeader::new("name", "Name")]);
        assert_eq!(csv, "Name\n\"beta\"");
    }

    #[test]
    fn test_search_and_pagination() {
        let items: Vec<Value> = (1..=25)
            .map(|i| json!({"id": i, "name": if i % 5 == 0 { "winner" } else { "member" }}))
            .collect();
        let mut table = DataTable::new();

        assert_eq!(table.page_count(&items), 3);
        assert_eq!(table.page(&items, 3).len(), 5);
        assert_eq!(table.page(&items, 2)[0]["id"], json!(11));
        assert!(table.page(&items, 4).is_empty());

        table.set_search("WIN");
        assert_eq!(table.filtered_items(&items).len(), 5);
        assert_eq!(table.page_count(&items), 1);

        table.set_items_per_page(0);
        assert_eq!(table.page(&items, 9).len(), 5);
    }

    #[test]
    fn test_csv_quotes_cells() {
        let items = rows(json!([{"id": 1, "name": "a,b"}]));
        let table = DataTable::new();
        let csv = table.to_csv(&items, &[ExportHeader::new("name", "Name")]);
        assert_eq!(csv, "Name\n\"a,b\"");
    }

    #[test]
    fn test_csv_uses_formatters_and_filtered_view() {
        let items = rows(json!([
            {"title": "x \"vip\"", "amount": 1500, "status": "active"},
            {"title": "y", "amount": 20, "status": "closed"},
        ]));
        let mut table = DataTable::new()
            .with_formatter("amount", |v: &Value| format!("{} ریال", text_of(v)));
        table.set_filter("status", json!("active"));

        let csv = table.to_csv(
            &items,
            &[
                ExportHeader::new("title", "عنوان"),
                ExportHeader::new("amount", "مبلغ"),
                ExportHeader::new("missing", "-"),
            ],
        );
        assert_eq!(csv, "عنوان,مبلغ,-\n\"x \"\"vip\"\"\",\"1500 ریال\",\"\"");
    }

    #[tokio::test]
    async fn test_export_csv_prefixes_bom() {
        let items = rows(json!([{"name": "a"}]));
        let table = DataTable::new();
        let sink = MemorySink::new();

        assert!(
            table
                .export_to_csv(&items, &[ExportHeader::new("name", "Name")], None, &sink)
                .await
        );

        let file = sink.last().unwrap();
        assert!(file.filename.starts_with("export_") && file.filename.ends_with(".csv"));
        assert_eq!(file.mime_type, CSV_MIME);
        assert_eq!(String::from_utf8(file.bytes).unwrap(), "\u{feff}Name\n\"a\"");
    }

    #[tokio::test]
    async fn test_export_json_pretty() {
        let items = rows(json!([{"id": 1}, {"id": 2}]));
        let mut table = DataTable::new();
        table.set_filter("id", json!(2));
        let sink = MemorySink::new();

        assert!(table.export_to_json(&items, Some("members.json"), &sink).await);

        let file = sink.last().unwrap();
        assert_eq!(file.filename, "members.json");
        assert_eq!(file.mime_type, JSON_MIME);
        let text = String::from_utf8(file.bytes).unwrap();
        assert_eq!(text, "[\n  {\n    \"id\": 2\n  }\n]");
    }

    #[tokio::test]
    async fn test_export_failure_returns_false() {
        let items = rows(json!([{"id": 1}]));
        let table = DataTable::new();
        assert!(!table.export_to_json(&items, None, &BrokenSink).await);
        assert!(!table.export_to_csv(&items, &[], None, &BrokenSink).await);
    }
}
