// 文档根节点抽象 - 主题效果的落地目标
//
// 渲染层读取这里的属性、类名和 CSS 自定义属性

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

/// 文档根节点的可变接口
pub trait DocumentRoot: Send + Sync {
    fn set_attribute(&self, name: &str, value: &str);

    fn add_class(&self, name: &str);

    fn remove_class(&self, name: &str);

    /// 按 `on` 添加或移除类名
    fn toggle_class(&self, name: &str, on: bool) {
        if on {
            self.add_class(name);
        } else {
            self.remove_class(name);
        }
    }

    fn set_style_property(&self, name: &str, value: &str);
}

/// 文档根节点状态快照
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentSnapshot {
    pub attributes: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
    pub style: BTreeMap<String, String>,
}

/// 内存中的文档根节点
#[derive(Debug, Default)]
pub struct InMemoryDocument {
    state: Mutex<DocumentSnapshot>,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        self.state.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.attributes.get(name).cloned())
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.state
            .lock()
            .map(|s| s.classes.contains(name))
            .unwrap_or(false)
    }

    pub fn style_property(&self, name: &str) -> Option<String> {
        self.state.lock().ok().and_then(|s| s.style.get(name).cloned())
    }
}

impl DocumentRoot for InMemoryDocument {
    fn set_attribute(&self, name: &str, value: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn add_class(&self, name: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.classes.insert(name.to_string());
        }
    }

    fn remove_class(&self, name: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.classes.remove(name);
        }
    }

    fn set_style_property(&self, name: &str, value: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.style.insert(name.to_string(), value.to_string());
        }
    }
}
