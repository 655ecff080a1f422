// 会员财务详情 - 抽奖、交易与文档的组合视图

use super::documents::{DocumentItem, Documents};
use super::lotteries::{Lotteries, LotteryItem};
use super::transactions::{Totals, TransactionItem, Transactions};
use super::MockContext;

/// 单个会员详情页的数据
///
/// 三个数据集各自独立结束加载
pub struct MemberFinancial {
    member_id: i64,
    pub lotteries: Lotteries,
    pub transactions: Transactions,
    pub documents: Documents,
}

impl MemberFinancial {
    pub fn mount(member_id: i64, ctx: &MockContext) -> Self {
        let lotteries = Lotteries::mount(member_id, ctx);
        let transactions = Transactions::mount(member_id, lotteries.items(), ctx);
        let documents = Documents::mount(lotteries.items(), ctx);

        Self {
            member_id,
            lotteries,
            transactions,
            documents,
        }
    }

    pub fn member_id(&self) -> i64 {
        self.member_id
    }

    pub fn is_loading(&self) -> bool {
        self.lotteries.loading().is_loading()
            || self.transactions.loading().is_loading()
            || self.documents.loading().is_loading()
    }

    /// 等待全部数据集加载结束
    pub async fn wait_loaded(&self) {
        tokio::join!(
            self.lotteries.loading().wait(),
            self.transactions.loading().wait(),
            self.documents.loading().wait(),
        );
    }

    pub fn filtered_lotteries(&self) -> Vec<&LotteryItem> {
        self.lotteries.filtered()
    }

    pub fn filtered_transactions(&self) -> Vec<&TransactionItem> {
        self.transactions.filtered()
    }

    pub fn documents(&self) -> &[DocumentItem] {
        self.documents.items()
    }

    pub fn totals(&self) -> Totals {
        self.transactions.totals()
    }
}
