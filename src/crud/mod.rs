// 通用 CRUD 模块

pub mod error;
pub mod hooks;
pub mod record;
pub mod state;

pub use error::CrudError;
pub use hooks::{
    AfterCreate, AfterDelete, AfterUpdate, BeforeCreate, BeforeDelete, BeforeUpdate, CrudHooks,
    FormValidator, ValidationResult,
};
pub use record::{CrudRecord, DynamicRecord, Patch, RecordId};
pub use state::{CrudState, DialogState};
