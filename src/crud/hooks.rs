// CRUD 生命周期钩子与表单校验
//
// 钩子按注册顺序依次执行,任一钩子出错即中止当前操作

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::record::{CrudRecord, Patch, RecordId};

#[async_trait]
pub trait BeforeCreate<T: CrudRecord>: Send + Sync {
    /// 可改写待创建的字段
    async fn before_create(&self, draft: Patch) -> Result<Patch>;
}

#[async_trait]
pub trait AfterCreate<T: CrudRecord>: Send + Sync {
    async fn after_create(&self, record: &T) -> Result<()>;
}

#[async_trait]
pub trait BeforeUpdate<T: CrudRecord>: Send + Sync {
    /// 可改写待更新的字段
    async fn before_update(&self, id: &RecordId, changes: Patch) -> Result<Patch>;
}

#[async_trait]
pub trait AfterUpdate<T: CrudRecord>: Send + Sync {
    async fn after_update(&self, record: &T) -> Result<()>;
}

#[async_trait]
pub trait BeforeDelete<T: CrudRecord>: Send + Sync {
    /// 返回 false 表示拒绝删除
    async fn before_delete(&self, record: &T) -> Result<bool>;
}

#[async_trait]
pub trait AfterDelete<T: CrudRecord>: Send + Sync {
    async fn after_delete(&self, record: &T) -> Result<()>;
}

/// 表单校验结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            valid: false,
            errors,
        }
    }
}

/// 表单校验器(由界面表单组件提供)
#[async_trait]
pub trait FormValidator: Send + Sync {
    async fn validate(&self, form: &Patch) -> ValidationResult;
}

/// 钩子注册表
pub struct CrudHooks<T: CrudRecord> {
    pub(crate) before_create: Vec<Arc<dyn BeforeCreate<T>>>,
    pub(crate) after_create: Vec<Arc<dyn AfterCreate<T>>>,
    pub(crate) before_update: Vec<Arc<dyn BeforeUpdate<T>>>,
    pub(crate) after_update: Vec<Arc<dyn AfterUpdate<T>>>,
    pub(crate) before_delete: Vec<Arc<dyn BeforeDelete<T>>>,
    pub(crate) after_delete: Vec<Arc<dyn AfterDelete<T>>>,
}

impl<T: CrudRecord> Default for CrudHooks<T> {
    fn default() -> Self {
        Self {
            before_create: Vec::new(),
            after_create: Vec::new(),
            before_update: Vec::new(),
            after_update: Vec::new(),
            before_delete: Vec::new(),
            after_delete: Vec::new(),
        }
    }
}

impl<T: CrudRecord> Clone for CrudHooks<T> {
    fn clone(&self) -> Self {
        Self {
            before_create: self.before_create.clone(),
            after_create: self.after_create.clone(),
            before_update: self.before_update.clone(),
            after_update: self.after_update.clone(),
            before_delete: self.before_delete.clone(),
            after_delete: self.after_delete.clone(),
        }
    }
}

impl<T: CrudRecord> CrudHooks<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before_create(mut self, hook: impl BeforeCreate<T> + 'static) -> Self {
        self.before_create.push(Arc::new(hook));
        self
    }

    pub fn after_create(mut self, hook: impl AfterCreate<T> + 'static) -> Self {
        self.after_create.push(Arc::new(hook));
        self
    }

    pub fn before_update(mut self, hook: impl BeforeUpdate<T> + 'static) -> Self {
        self.before_update.push(Arc::new(hook));
        self
    }

    pub fn after_update(mut self, hook: impl AfterUpdate<T> + 'static) -> Self {
        self.after_update.push(Arc::new(hook));
        self
    }

    pub fn before_delete(mut self, hook: impl BeforeDelete<T> + 'static) -> Self {
        self.before_delete.push(Arc::new(hook));
        self
    }

    pub fn after_delete(mut self, hook: impl AfterDelete<T> + 'static) -> Self {
        self.after_delete.push(Arc::new(hook));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.before_create.is_empty()
            && self.after_create.is_empty()
            && self.before_update.is_empty()
            && self.after_update.is_empty()
            && self.before_delete.is_empty()
            && self.after_delete.is_empty()
    }
}
