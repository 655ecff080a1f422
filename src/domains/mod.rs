// 领域模块 - 用于组织应用的业务逻辑
//
// 将 AppState 按业务领域分组,实现单一职责原则
// 包含4个领域:外观、会员、存储、系统

pub mod appearance;
pub mod members;
pub mod storage;
pub mod system;

pub use appearance::AppearanceDomain;
pub use members::MembersDomain;
pub use storage::StorageDomain;
pub use system::SystemDomain;
