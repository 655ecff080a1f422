// 会员抽奖记录 - 按会员 ID 生成的模拟数据

use serde::{Deserialize, Serialize};

use super::loading::LoadingFlag;
use super::MockContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotteryType {
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotteryStatus {
    Active,
    Completed,
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotteryResult {
    Winner,
    NotWinner,
    Replaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Missed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub date: String,
    pub amount: i64,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPayment {
    pub id: i64,
    pub due_date: String,
    pub amount: i64,
}

/// 罚款或奖励
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub id: i64,
    pub date: String,
    pub amount: i64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotteryItem {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub lottery_type: LotteryType,
    pub status: LotteryStatus,
    pub tickets: u32,
    pub join_date: String,
    pub result: LotteryResult,
    pub chance_multiplier: u32,
    pub payments: Vec<Payment>,
    pub schedule: Vec<ScheduledPayment>,
    pub penalties: Vec<Adjustment>,
    pub bonuses: Vec<Adjustment>,
}

const INSTALLMENT: i64 = 1_500_000;
const LATE_PENALTY: i64 = 150_000;
const LOYALTY_BONUS: i64 = 500_000;

/// 会员种子(0..7)
pub fn member_seed(member_id: i64) -> usize {
    member_id.rem_euclid(7) as usize
}

/// 生成会员的抽奖列表:6 + 种子 条,ID 从 1000 开始
pub fn generate_lotteries(member_id: i64) -> Vec<LotteryItem> {
    (0..6 + member_seed(member_id)).map(build_lottery).collect()
}

fn build_lottery(i: usize) -> LotteryItem {
    let id = 1000 + i as i64;
    let lottery_type = if i % 2 == 0 {
        LotteryType::Monthly
    } else {
        LotteryType::Weekly
    };
    let (status, result) = match i % 3 {
        0 => (LotteryStatus::Completed, LotteryResult::Winner),
        1 => (LotteryStatus::Active, LotteryResult::NotWinner),
        _ => (LotteryStatus::Suspended, LotteryResult::Replaced),
    };

    let payments: Vec<Payment> = (0..4)
        .map(|p| {
            let missed = p % 3 == 0;
            Payment {
                id: id * 10 + p,
                date: format!("۱۴۰۴/۰{}", p + 1),
                amount: INSTALLMENT,
                status: if missed {
                    PaymentStatus::Missed
                } else {
                    PaymentStatus::Paid
                },
                note: Some(if missed { "تاخیر" } else { "—" }.to_string()),
            }
        })
        .collect();

    let schedule = (0..4)
        .map(|s| ScheduledPayment {
            id: id * 100 + s,
            due_date: format!("۱۴۰۴/۱{}", s),
            amount: INSTALLMENT,
        })
        .collect();

    let penalties = payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Missed)
        .enumerate()
        .map(|(k, p)| Adjustment {
            id: id * 1000 + k as i64,
            date: p.date.clone(),
            amount: LATE_PENALTY,
            reason: "جریمه دیرکرد".to_string(),
        })
        .collect();

    let bonuses = if result == LotteryResult::Winner {
        vec![Adjustment {
            id: id * 2000,
            date: "۱۴۰۴/۱۲/۰۱".to_string(),
            amount: LOYALTY_BONUS,
            reason: "پاداش وفاداری".to_string(),
        }]
    } else {
        Vec::new()
    };

    LotteryItem {
        id,
        name: format!("قرعه\u{200c}کشی {}", i + 1),
        lottery_type,
        status,
        tickets: (i as u32 + 1) * 2,
        join_date: format!("۱۴۰۴/۰{}/۰{}", i % 9 + 1, i % 3 + 1),
        result,
        chance_multiplier: 1 + (i % 3) as u32,
        payments,
        schedule,
        penalties,
        bonuses,
    }
}

/// 抽奖过滤条件(`None` 表示全部)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LotteryFilters {
    pub name: String,
    #[serde(rename = "type")]
    pub lottery_type: Option<LotteryType>,
    pub status: Option<LotteryStatus>,
    pub result: Option<LotteryResult>,
}

impl LotteryFilters {
    pub fn matches(&self, item: &LotteryItem) -> bool {
        (self.name.is_empty() || item.name.contains(&self.name))
            && self.lottery_type.map_or(true, |t| item.lottery_type == t)
            && self.status.map_or(true, |s| item.status == s)
            && self.result.map_or(true, |r| item.result == r)
    }

    pub fn apply<'a>(&self, items: &'a [LotteryItem]) -> Vec<&'a LotteryItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

/// 会员抽奖列表视图
pub struct Lotteries {
    items: Vec<LotteryItem>,
    loading: LoadingFlag,
    pub filters: LotteryFilters,
}

impl Lotteries {
    /// 生成数据并安排加载结束(需在 tokio 运行时中调用)
    pub fn mount(member_id: i64, ctx: &MockContext) -> Self {
        let loading = LoadingFlag::new();
        loading.finish_after(ctx, ctx.delays.lotteries(), "lotteries");
        Self {
            items: generate_lotteries(member_id),
            loading,
            filters: LotteryFilters::default(),
        }
    }

    pub fn items(&self) -> &[LotteryItem] {
        &self.items
    }

    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    pub fn filtered(&self) -> Vec<&LotteryItem> {
        self.filters.apply(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_follows_member_seed() {
        assert_eq!(generate_lotteries(7).len(), 6);
        assert_eq!(generate_lotteries(1003).len(), 6 + 2);
        assert_eq!(generate_lotteries(-1).len(), 6 + 6);
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(generate_lotteries(1004), generate_lotteries(1004));
    }

    #[test]
    fn test_first_lottery_shape() {
        let items = generate_lotteries(0);
        let first = &items[0];

        assert_eq!(first.id, 1000);
        assert_eq!(first.name, "قرعه\u{200c}کشی 1");
        assert_eq!(first.lottery_type, LotteryType::Monthly);
        assert_eq!(first.status, LotteryStatus::Completed);
        assert_eq!(first.result, LotteryResult::Winner);
        assert_eq!(first.tickets, 2);
        assert_eq!(first.join_date, "۱۴۰۴/۰1/۰1");
        // 第 0 与第 3 期缺交
        assert_eq!(first.penalties.len(), 2);
        assert_eq!(first.penalties[1].date, "۱۴۰۴/۰4");
        assert_eq!(first.bonuses.len(), 1);
        assert_eq!(first.bonuses[0].id, 2_000_000);

        let second = &items[1];
        assert_eq!(second.lottery_type, LotteryType::Weekly);
        assert_eq!(second.result, LotteryResult::NotWinner);
        assert!(second.bonuses.is_empty());
        assert_eq!(second.schedule[3].id, 100_103);
    }

    #[test]
    fn test_filters() {
        let items = generate_lotteries(0);
        let filters = LotteryFilters {
            status: Some(LotteryStatus::Active),
            ..Default::default()
        };
        let ids: Vec<i64> = filters.apply(&items).iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1001, 1004]);

        let filters = LotteryFilters {
            name: "کشی 6".to_string(),
            lottery_type: Some(LotteryType::Weekly),
            ..Default::default()
        };
        assert_eq!(filters.apply(&items).len(), 1);
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(&generate_lotteries(0)[1]).unwrap();
        assert_eq!(value["type"], "weekly");
        assert_eq!(value["result"], "not_winner");
        assert!(value.get("joinDate").is_some());
        assert!(value.get("chanceMultiplier").is_some());
    }
}
