// 会员名册 - 固定的 12 位会员,叠加 CRUD 状态与过滤

use serde::{Deserialize, Serialize};
use tokio::time::Duration;

use super::loading::LoadingFlag;
use super::MockContext;
use crate::crud::{CrudRecord, CrudState, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberStatus {
    Active,
    SuspendedTemp,
    SuspendedPermanent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyStatus {
    #[serde(rename = "none")]
    Clear,
    Temporary,
    Permanent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuspensionUnit {
    Months,
    Years,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspensionDuration {
    pub value: u32,
    pub unit: SuspensionUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    pub avatar: String,
    pub full_name: String,
    pub status: MemberStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspension_duration: Option<SuspensionDuration>,
    pub total_lotteries_joined: u32,
    pub active_lotteries_count: u32,
    pub total_tickets_owned: u32,
    pub penalty_status: PenaltyStatus,
    pub registration_date: String,
    pub national_id: String,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub total_contributions: i64,
    pub last_activity: String,
}

impl CrudRecord for Member {
    fn id(&self) -> RecordId {
        RecordId::Number(self.id)
    }
}

/// 固定会员名册
pub fn member_roster() -> Vec<Member> {
    vec![
        Member {
            id: 1001,
            avatar: "https://i.pravatar.cc/150?img=1".to_string(),
            full_name: "علی احمدی".to_string(),
            status: MemberStatus::Active,
            suspension_duration: None,
            total_lotteries_joined: 8,
            active_lotteries_count: 3,
            total_tickets_owned: 24,
            penalty_status: PenaltyStatus::Clear,
            registration_date: "۱۴۰۳/۰۳/۱۵".to_string(),
            national_id: "0012345678".to_string(),
            phone: "09121234567".to_string(),
            email: "ali.ahmadi@example.com".to_string(),
            address: Some("تهران، خیابان آزادی".to_string()),
            total_contributions: 45000000,
            last_activity: "۱۴۰۴/۱۰/۱۵".to_string(),
        },
        Member {
            id: 1002,
            avatar: "https://i.pravatar.cc/150?img=5".to_string(),
            full_name: "سارا محمدی".to_string(),
            status: MemberStatus::Active,
            suspension_duration: None,
            total_lotteries_joined: 12,
            active_lotteries_count: 5,
            total_tickets_owned: 35,
            penalty_status: PenaltyStatus::Clear,
            registration_date: "۱۴۰۲/۱۲/۲۰".to_string(),
            national_id: "0012345679".to_string(),
            phone: "09121234568".to_string(),
            email: "sara.mohammadi@example.com".to_string(),
            address: Some("مشهد، خیابان امام رضا".to_string()),
            total_contributions: 72000000,
            last_activity: "۱۴۰۴/۱۰/۱۴".to_string(),
        },
        Member {
            id: 1003,
            avatar: "https://i.pravatar.cc/150?img=8".to_string(),
            full_name: "رضا کریمی".to_string(),
            status: MemberStatus::SuspendedTemp,
            suspension_duration: Some(SuspensionDuration { value: 6, unit: SuspensionUnit::Months }),
            total_lotteries_joined: 5,
            active_lotteries_count: 0,
            total_tickets_owned: 15,
            penalty_status: PenaltyStatus::Temporary,
            registration_date: "۱۴۰۳/۰۵/۱۰".to_string(),
            national_id: "0012345680".to_string(),
            phone: "09121234569".to_string(),
            email: "reza.karimi@example.com".to_string(),
            address: Some("اصفهان، خیابان چهارباغ".to_string()),
            total_contributions: 28000000,
            last_activity: "۱۴۰۴/۰۸/۲۵".to_string(),
        },
        Member {
            id: 1004,
            avatar: "https://i.pravatar.cc/150?img=9".to_string(),
            full_name: "فاطمه نوری".to_string(),
            status: MemberStatus::Active,
            suspension_duration: None,
            total_lotteries_joined: 15,
            active_lotteries_count: 7,
            total_tickets_owned: 48,
            penalty_status: PenaltyStatus::Clear,
            registration_date: "۱۴۰۲/۰۸/۰۵".to_string(),
            national_id: "0012345681".to_string(),
            phone: "09121234570".to_string(),
            email: "fatemeh.noori@example.com".to_string(),
            address: Some("شیراز، خیابان ولیعصر".to_string()),
            total_contributions: 95000000,
            last_activity: "۱۴۰۴/۱۰/۱۶".to_string(),
        },
        Member {
            id: 1005,
            avatar: "https://i.pravatar.cc/150?img=12".to_string(),
            full_name: "محمد رضایی".to_string(),
            status: MemberStatus::SuspendedPermanent,
            suspension_duration: None,
            total_lotteries_joined: 3,
            active_lotteries_count: 0,
            total_tickets_owned: 8,
            penalty_status: PenaltyStatus::Permanent,
            registration_date: "۱۴۰۳/۰۱/۱۲".to_string(),
            national_id: "0012345682".to_string(),
            phone: "09121234571".to_string(),
            email: "mohammad.rezaei@example.com".to_string(),
            address: Some("تبریز، خیابان امام خمینی".to_string()),
            total_contributions: 12000000,
            last_activity: "۱۴۰۴/۰۷/۰۱".to_string(),
        },
        Member {
            id: 1006,
            avatar: "https://i.pravatar.cc/150?img=20".to_string(),
            full_name: "زهرا حسینی".to_string(),
            status: MemberStatus::Active,
            suspension_duration: None,
            total_lotteries_joined: 10,
            active_lotteries_count: 4,
            total_tickets_owned: 30,
            penalty_status: PenaltyStatus::Clear,
            registration_date: "۱۴۰۲/۱۱/۲۸".to_string(),
            national_id: "0012345683".to_string(),
            phone: "09121234572".to_string(),
            email: "zahra.hosseini@example.com".to_string(),
            address: Some("کرج، خیابان شهید بهشتی".to_string()),
            total_contributions: 58000000,
            last_activity: "۱۴۰۴/۱۰/۱۶".to_string(),
        },
        Member {
            id: 1007,
            avatar: "https://i.pravatar.cc/150?img=33".to_string(),
            full_name: "حسن علیزاده".to_string(),
            status: MemberStatus::Active,
            suspension_duration: None,
            total_lotteries_joined: 6,
            active_lotteries_count: 2,
            total_tickets_owned: 18,
            penalty_status: PenaltyStatus::Clear,
            registration_date: "۱۴۰۳/۰۴/۲۰".to_string(),
            national_id: "0012345684".to_string(),
            phone: "09121234573".to_string(),
            email: "hasan.alizadeh@example.com".to_string(),
            address: Some("اهواز، خیابان کیانپارس".to_string()),
            total_contributions: 36000000,
            last_activity: "۱۴۰۴/۱۰/۱۵".to_string(),
        },
        Member {
            id: 1008,
            avatar: "https://i.pravatar.cc/150?img=25".to_string(),
            full_name: "مریم صادقی".to_string(),
            status: MemberStatus::SuspendedTemp,
            suspension_duration: Some(SuspensionDuration { value: 1, unit: SuspensionUnit::Years }),
            total_lotteries_joined: 4,
            active_lotteries_count: 0,
            total_tickets_owned: 12,
            penalty_status: PenaltyStatus::Temporary,
            registration_date: "۱۴۰۳/۰۲/۱۸".to_string(),
            national_id: "0012345685".to_string(),
            phone: "09121234574".to_string(),
            email: "maryam.sadeghi@example.com".to_string(),
            address: Some("قم، خیابان امین".to_string()),
            total_contributions: 24000000,
            last_activity: "۱۴۰۴/۰۶/۱۰".to_string(),
        },
        Member {
            id: 1009,
            avatar: "https://i.pravatar.cc/150?img=36".to_string(),
            full_name: "امیر حسن‌پور".to_string(),
            status: MemberStatus::Active,
            suspension_duration: None,
            total_lotteries_joined: 20,
            active_lotteries_count: 9,
            total_tickets_owned: 60,
            penalty_status: PenaltyStatus::Clear,
            registration_date: "۱۴۰۲/۰۶/۰۸".to_string(),
            national_id: "0012345686".to_string(),
            phone: "09121234575".to_string(),
            email: "amir.hasanpour@example.com".to_string(),
            address: Some("کرمان، خیابان جمهوری".to_string()),
            total_contributions: 125000000,
            last_activity: "۱۴۰۴/۱۰/۱۶".to_string(),
        },
        Member {
            id: 1010,
            avatar: "https://i.pravatar.cc/150?img=47".to_string(),
            full_name: "نسرین مرادی".to_string(),
            status: MemberStatus::Active,
            suspension_duration: None,
            total_lotteries_joined: 7,
            active_lotteries_count: 3,
            total_tickets_owned: 21,
            penalty_status: PenaltyStatus::Clear,
            registration_date: "۱۴۰۳/۰۷/۱۲".to_string(),
            national_id: "0012345687".to_string(),
            phone: "09121234576".to_string(),
            email: "nasrin.moradi@example.com".to_string(),
            address: Some("رشت، خیابان معلم".to_string()),
            total_contributions: 42000000,
            last_activity: "۱۴۰۴/۱۰/۱۴".to_string(),
        },
        Member {
            id: 1011,
            avatar: "https://i.pravatar.cc/150?img=52".to_string(),
            full_name: "علیرضا جعفری".to_string(),
            status: MemberStatus::Active,
            suspension_duration: None,
            total_lotteries_joined: 9,
            active_lotteries_count: 4,
            total_tickets_owned: 27,
            penalty_status: PenaltyStatus::Clear,
            registration_date: "۱۴۰۳/۰۶/۲۵".to_string(),
            national_id: "0012345688".to_string(),
            phone: "09121234577".to_string(),
            email: "alireza.jafari@example.com".to_string(),
            address: Some("یزد، خیابان دهم فروردین".to_string()),
            total_contributions: 52000000,
            last_activity: "۱۴۰۴/۱۰/۱۵".to_string(),
        },
        Member {
            id: 1012,
            avatar: "https://i.pravatar.cc/150?img=16".to_string(),
            full_name: "شیوا رحمانی".to_string(),
            status: MemberStatus::Active,
            suspension_duration: None,
            total_lotteries_joined: 11,
            active_lotteries_count: 5,
            total_tickets_owned: 33,
            penalty_status: PenaltyStatus::Clear,
            registration_date: "۱۴۰۲/۱۰/۱۵".to_string(),
            national_id: "0012345689".to_string(),
            phone: "09121234578".to_string(),
            email: "shiva.rahmani@example.com".to_string(),
            address: Some("زنجان، خیابان سعدی".to_string()),
            total_contributions: 68000000,
            last_activity: "۱۴۰۴/۱۰/۱۶".to_string(),
        },    ]
}

/// 会员过滤条件(`None` 表示全部)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberFilters {
    /// 姓名、手机号或身份证号包含的关键字
    pub query: String,
    pub status: Option<MemberStatus>,
    pub penalty_status: Option<PenaltyStatus>,
}

impl MemberFilters {
    pub fn matches(&self, member: &Member) -> bool {
        let query = self.query.trim();
        (query.is_empty()
            || member.full_name.contains(query)
            || member.phone.contains(query)
            || member.national_id.contains(query))
            && self.status.map_or(true, |s| member.status == s)
            && self.penalty_status.map_or(true, |p| member.penalty_status == p)
    }
}

/// 会员列表页数据
pub struct MembersData {
    pub crud: CrudState<Member>,
    loading: LoadingFlag,
    pub filters: MemberFilters,
}

impl MembersData {
    /// 名册为本地常量,加载标志在下一次调度时结束
    pub fn mount(ctx: &MockContext) -> Self {
        let loading = LoadingFlag::new();
        loading.finish_after(ctx, Duration::ZERO, "members");
        Self {
            crud: CrudState::new(member_roster()),
            loading,
            filters: MemberFilters::default(),
        }
    }

    pub fn members(&self) -> &[Member] {
        self.crud.items()
    }

    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    pub fn find(&self, id: i64) -> Option<&Member> {
        self.crud.find_by_id(&RecordId::Number(id))
    }

    pub fn filtered(&self) -> Vec<&Member> {
        self.members()
            .iter()
            .filter(|m| self.filters.matches(m))
            .collect()
    }
}
