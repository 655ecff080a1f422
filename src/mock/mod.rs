// 模拟数据模块 - 会员、抽奖、交易与文档
//
// 生成函数是纯函数(同一会员 ID 得到同一数据集),
// 加载延迟通过调度器注入

pub mod documents;
pub mod financial;
pub mod loading;
pub mod lotteries;
pub mod members;
pub mod transactions;

use std::sync::Arc;

use crate::event_bus::EventBus;
use crate::models::LoadingDelays;
use crate::scheduler::Scheduler;

pub use documents::{generate_documents, DocumentItem, DocumentStatus, DocumentType, Documents};
pub use financial::MemberFinancial;
pub use loading::LoadingFlag;
pub use lotteries::{
    generate_lotteries, Lotteries, LotteryFilters, LotteryItem, LotteryResult, LotteryStatus,
    LotteryType,
};
pub use members::{member_roster, Member, MemberFilters, MemberStatus, MembersData, PenaltyStatus};
pub use transactions::{
    generate_transactions, Totals, TransactionFilters, TransactionItem, TransactionStatus,
    TransactionType, Transactions,
};

/// 模拟数据视图的共享依赖
#[derive(Clone)]
pub struct MockContext {
    pub scheduler: Arc<dyn Scheduler>,
    pub event_bus: Arc<EventBus>,
    pub delays: LoadingDelays,
}

impl MockContext {
    pub fn new(
        scheduler: Arc<dyn Scheduler>,
        event_bus: Arc<EventBus>,
        delays: LoadingDelays,
    ) -> Self {
        Self {
            scheduler,
            event_bus,
            delays,
        }
    }
}
