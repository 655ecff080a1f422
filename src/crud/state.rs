// 通用 CRUD 状态 - 列表、选择、对话框与生命周期钩子

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

use super::error::CrudError;
use super::hooks::{CrudHooks, FormValidator};
use super::record::{build_record, merge_record, next_id, to_patch, CrudRecord, Patch, RecordId};

/// 对话框开关
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogState {
    pub form: bool,
    pub view: bool,
    pub delete: bool,
    pub bulk_delete: bool,
}

/// 单个管理页面的 CRUD 状态
///
/// 所有修改都经由 `&mut self`,由调用方决定共享方式
pub struct CrudState<T: CrudRecord> {
    items: Vec<T>,
    selected: Vec<T>,
    loading: bool,
    dialogs: DialogState,
    is_edit: bool,
    form_item: Patch,
    view_item: Option<T>,
    delete_item: Option<T>,
    validator: Option<Arc<dyn FormValidator>>,
    hooks: CrudHooks<T>,
}

impl<T: CrudRecord> CrudState<T> {
    pub fn new(initial: Vec<T>) -> Self {
        Self::with_hooks(initial, CrudHooks::default())
    }

    pub fn with_hooks(initial: Vec<T>, hooks: CrudHooks<T>) -> Self {
        Self {
            items: initial,
            selected: Vec::new(),
            loading: false,
            dialogs: DialogState::default(),
            is_edit: false,
            form_item: Patch::new(),
            view_item: None,
            delete_item: None,
            validator: None,
            hooks,
        }
    }

    // ========== 读取 ==========

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn selected(&self) -> &[T] {
        &self.selected
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn dialogs(&self) -> DialogState {
        self.dialogs
    }

    pub fn is_edit(&self) -> bool {
        self.is_edit
    }

    pub fn form_item(&self) -> &Patch {
        &self.form_item
    }

    pub fn view_item(&self) -> Option<&T> {
        self.view_item.as_ref()
    }

    pub fn delete_item(&self) -> Option<&T> {
        self.delete_item.as_ref()
    }

    pub fn hooks_mut(&mut self) -> &mut CrudHooks<T> {
        &mut self.hooks
    }

    pub fn find_by_id(&self, id: &RecordId) -> Option<&T> {
        self.items.iter().find(|item| &item.id() == id)
    }

    // ========== 表单 ==========

    /// 绑定表单校验器
    pub fn bind_form(&mut self, validator: Arc<dyn FormValidator>) {
        self.validator = Some(validator);
    }

    pub fn unbind_form(&mut self) {
        self.validator = None;
    }

    pub fn set_form_field(&mut self, key: &str, value: Value) {
        self.form_item.insert(key.to_string(), value);
    }

    // ========== 选择 ==========

    /// 按 ID 选择(不存在的 ID 被忽略)
    pub fn select(&mut self, ids: &[RecordId]) {
        self.selected = self
            .items
            .iter()
            .filter(|item| ids.contains(&item.id()))
            .cloned()
            .collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    // ========== 数据操作 ==========

    /// 新建记录(置于列表首位)
    pub async fn create(&mut self, draft: Patch) -> Option<T> {
        self.loading = true;
        let result = self.try_create(draft).await;
        self.loading = false;

        match result {
            Ok(record) => Some(record),
            Err(e) => {
                error!("创建记录失败: {}", e);
                None
            }
        }
    }

    async fn try_create(&mut self, draft: Patch) -> Result<T, CrudError> {
        let mut draft = draft;
        for hook in self.hooks.before_create.clone() {
            draft = hook
                .before_create(draft)
                .await
                .map_err(|e| CrudError::hook("beforeCreate", e))?;
        }

        let id = RecordId::Number(next_id(&self.items));
        let record: T = build_record(draft, &id)?;
        self.items.insert(0, record.clone());
        debug!("记录已创建: {}", id);

        // 创建后钩子失败时记录不回滚
        for hook in self.hooks.after_create.clone() {
            hook.after_create(&record)
                .await
                .map_err(|e| CrudError::hook("afterCreate", e))?;
        }

        Ok(record)
    }

    /// 更新记录,ID 始终保持不变
    pub async fn update(&mut self, id: &RecordId, changes: Patch) -> Option<T> {
        self.loading = true;
        let result = self.try_update(id, changes).await;
        self.loading = false;

        match result {
            Ok(record) => Some(record),
            Err(e) => {
                error!("更新记录失败: {}", e);
                None
            }
        }
    }

    async fn try_update(&mut self, id: &RecordId, changes: Patch) -> Result<T, CrudError> {
        let mut changes = changes;
        for hook in self.hooks.before_update.clone() {
            changes = hook
                .before_update(id, changes)
                .await
                .map_err(|e| CrudError::hook("beforeUpdate", e))?;
        }

        let index = self
            .items
            .iter()
            .position(|item| &item.id() == id)
            .ok_or_else(|| CrudError::NotFound(id.clone()))?;

        let updated = merge_record(&self.items[index], &changes)?;
        self.items[index] = updated.clone();
        debug!("记录已更新: {}", id);

        for hook in self.hooks.after_update.clone() {
            hook.after_update(&updated)
                .await
                .map_err(|e| CrudError::hook("afterUpdate", e))?;
        }

        Ok(updated)
    }

    /// 删除单条记录
    pub async fn remove(&mut self, id: &RecordId) -> bool {
        self.loading = true;
        let result = self.try_remove(id).await;
        self.loading = false;

        match result {
            Ok(()) => true,
            Err(CrudError::Vetoed(id)) => {
                debug!("删除被钩子拒绝: {}", id);
                false
            }
            Err(e) => {
                error!("删除记录失败: {}", e);
                false
            }
        }
    }

    async fn try_remove(&mut self, id: &RecordId) -> Result<(), CrudError> {
        let index = self
            .items
            .iter()
            .position(|item| &item.id() == id)
            .ok_or_else(|| CrudError::NotFound(id.clone()))?;
        let record = self.items[index].clone();

        self.check_delete(&record).await?;

        self.items.remove(index);
        self.selected.retain(|item| &item.id() != id);
        debug!("记录已删除: {}", id);

        for hook in self.hooks.after_delete.clone() {
            hook.after_delete(&record)
                .await
                .map_err(|e| CrudError::hook("afterDelete", e))?;
        }

        Ok(())
    }

    /// 批量删除:全部通过删除前钩子才会删除,否则不删除任何记录
    pub async fn bulk_remove(&mut self, ids: &[RecordId]) -> bool {
        self.loading = true;
        let result = self.try_bulk_remove(ids).await;
        self.loading = false;

        match result {
            Ok(count) => {
                debug!("批量删除完成: {} 条", count);
                true
            }
            Err(CrudError::Vetoed(id)) => {
                debug!("批量删除被钩子拒绝: {}", id);
                false
            }
            Err(e) => {
                error!("批量删除失败: {}", e);
                false
            }
        }
    }

    async fn try_bulk_remove(&mut self, ids: &[RecordId]) -> Result<usize, CrudError> {
        let doomed: Vec<T> = self
            .items
            .iter()
            .filter(|item| ids.contains(&item.id()))
            .cloned()
            .collect();

        for record in &doomed {
            self.check_delete(record).await?;
        }

        self.items.retain(|item| !ids.contains(&item.id()));
        self.selected.retain(|item| !ids.contains(&item.id()));

        for record in &doomed {
            for hook in self.hooks.after_delete.clone() {
                hook.after_delete(record)
                    .await
                    .map_err(|e| CrudError::hook("afterDelete", e))?;
            }
        }

        Ok(doomed.len())
    }

    async fn check_delete(&self, record: &T) -> Result<(), CrudError> {
        for hook in &self.hooks.before_delete {
            let allowed = hook
                .before_delete(record)
                .await
                .map_err(|e| CrudError::hook("beforeDelete", e))?;
            if !allowed {
                return Err(CrudError::Vetoed(record.id()));
            }
        }
        Ok(())
    }

    // ========== 对话框 ==========

    pub fn open_create(&mut self, defaults: Patch) {
        self.is_edit = false;
        self.form_item = defaults;
        self.dialogs.form = true;
    }

    pub fn open_view(&mut self, record: &T) {
        self.view_item = Some(record.clone());
        self.dialogs.view = true;
    }

    pub fn open_edit(&mut self, record: &T) {
        self.is_edit = true;
        self.form_item = match to_patch(record) {
            Ok(fields) => fields,
            Err(e) => {
                warn!("无法载入编辑表单: {}", e);
                Patch::new()
            }
        };
        self.dialogs.form = true;
    }

    pub fn open_delete(&mut self, record: &T) {
        self.delete_item = Some(record.clone());
        self.dialogs.delete = true;
    }

    /// 无选择时不打开
    pub fn open_bulk_delete(&mut self) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        self.dialogs.bulk_delete = true;
        true
    }

    /// 保存表单:校验通过后按编辑状态新建或更新,成功才关闭并清空表单
    pub async fn save_item(&mut self) -> bool {
        if let Some(validator) = self.validator.clone() {
            let result = validator.validate(&self.form_item).await;
            if !result.valid {
                debug!("表单校验未通过: {:?}", result.errors);
                return false;
            }
        }

        let form = self.form_item.clone();
        let edit_id = if self.is_edit {
            form.get("id").and_then(RecordId::from_value)
        } else {
            None
        };

        let saved = match edit_id {
            Some(id) => self.update(&id, form).await.is_some(),
            None => self.create(form).await.is_some(),
        };

        if saved {
            self.dialogs.form = false;
            self.form_item.clear();
        }
        saved
    }

    pub async fn confirm_delete(&mut self) -> bool {
        let Some(record) = self.delete_item.clone() else {
            return false;
        };

        let removed = self.remove(&record.id()).await;
        if removed {
            self.dialogs.delete = false;
            self.delete_item = None;
        }
        removed
    }

    pub async fn confirm_bulk_delete(&mut self) -> bool {
        if self.selected.is_empty() {
            return false;
        }

        let ids: Vec<RecordId> = self.selected.iter().map(|item| item.id()).collect();
        let removed = self.bulk_remove(&ids).await;
        if removed {
            self.dialogs.bulk_delete = false;
            self.selected.clear();
        }
        removed
    }

    pub fn close_dialogs(&mut self) {
        self.dialogs = DialogState::default();
        self.form_item.clear();
        self.view_item = None;
        self.delete_item = None;
    }
}
