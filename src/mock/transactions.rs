// 会员交易记录 - 模拟数据与收支汇总

use serde::{Deserialize, Serialize};

use super::loading::LoadingFlag;
use super::lotteries::{member_seed, LotteryItem};
use super::MockContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Installment,
    Refund,
    Penalty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Paid,
    Pending,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lottery_id: Option<i64>,
    pub date: String,
    /// 退款为正,其他为负
    pub amount: i64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// 生成交易列表:14 + 种子 条,ID 从 3000 开始,循环关联抽奖
pub fn generate_transactions(member_id: i64, lotteries: &[LotteryItem]) -> Vec<TransactionItem> {
    (0..14 + member_seed(member_id))
        .map(|i| {
            let transaction_type = if i % 5 == 0 {
                TransactionType::Refund
            } else if i % 3 == 0 {
                TransactionType::Penalty
            } else {
                TransactionType::Installment
            };
            let status = if i % 4 == 0 {
                TransactionStatus::Pending
            } else if i % 5 == 0 {
                TransactionStatus::Failed
            } else {
                TransactionStatus::Paid
            };
            let (amount, note) = match transaction_type {
                TransactionType::Refund => (2_000_000, "بازگشت"),
                TransactionType::Penalty => (-150_000, "دیرکرد"),
                TransactionType::Installment => (-1_500_000, "قسط ماهانه"),
            };

            TransactionItem {
                id: 3000 + i as i64,
                lottery_id: if lotteries.is_empty() {
                    None
                } else {
                    Some(lotteries[i % lotteries.len()].id)
                },
                date: format!("۱۴۰۴/۱{}/۰{}", i % 9, i % 3 + 1),
                amount,
                transaction_type,
                status,
                note: Some(note.to_string()),
            }
        })
        .collect()
}

/// 交易过滤条件(`None` 表示全部)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionFilters {
    pub lottery_id: Option<i64>,
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub status: Option<TransactionStatus>,
}

impl TransactionFilters {
    pub fn matches(&self, item: &TransactionItem) -> bool {
        self.lottery_id.map_or(true, |id| item.lottery_id == Some(id))
            && self
                .transaction_type
                .map_or(true, |t| item.transaction_type == t)
            && self.status.map_or(true, |s| item.status == s)
    }

    pub fn apply<'a>(&self, items: &'a [TransactionItem]) -> Vec<&'a TransactionItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

/// 收支汇总
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// 退款合计
    pub income: i64,
    /// 其他交易金额绝对值合计
    pub deductions: i64,
    pub net: i64,
}

impl Totals {
    pub fn of<'a>(items: impl IntoIterator<Item = &'a TransactionItem>) -> Self {
        let (income, deductions) =
            items
                .into_iter()
                .fold((0i64, 0i64), |(income, deductions), t| {
                    if t.transaction_type == TransactionType::Refund {
                        (income + t.amount, deductions)
                    } else {
                        (income, deductions + t.amount.abs())
                    }
                });
        Self {
            income,
            deductions,
            net: income - deductions,
        }
    }
}

/// 会员交易列表视图
pub struct Transactions {
    items: Vec<TransactionItem>,
    loading: LoadingFlag,
    pub filters: TransactionFilters,
}

impl Transactions {
    pub fn mount(member_id: i64, lotteries: &[LotteryItem], ctx: &MockContext) -> Self {
        let loading = LoadingFlag::new();
        loading.finish_after(ctx, ctx.delays.transactions(), "transactions");
        Self {
            items: generate_transactions(member_id, lotteries),
            loading,
            filters: TransactionFilters::default(),
        }
    }

    pub fn items(&self) -> &[TransactionItem] {
        &self.items
    }

    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    pub fn filtered(&self) -> Vec<&TransactionItem> {
        self.filters.apply(&self.items)
    }

    /// 过滤后交易的汇总
    pub fn totals(&self) -> Totals {
        Totals::of(self.filtered())
    }
}
