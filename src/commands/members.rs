//! 会员管理命令
//!
//! 提供会员列表、详情、编辑删除与导出接口

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::crud::{Patch, RecordId};
use crate::mock::{
    DocumentItem, LotteryFilters, LotteryItem, Member, MemberFilters, Totals, TransactionFilters,
    TransactionItem,
};
use crate::table::{text_of, DataTable, ExportHeader};
use crate::utils::{validate_export_filename, validate_member_id};
use crate::AppState;

/// 会员详情页数据
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberFinancialView {
    pub member: Member,
    pub lotteries: Vec<LotteryItem>,
    pub transactions: Vec<TransactionItem>,
    pub documents: Vec<DocumentItem>,
    pub totals: Totals,
}

fn member_status_label(value: &Value) -> String {
    match value.as_str() {
        Some("active") => "فعال".to_string(),
        Some("suspended-temp") => "تعلیق موقت".to_string(),
        Some("suspended-permanent") => "تعلیق دائم".to_string(),
        _ => text_of(value),
    }
}

fn members_table() -> DataTable<Member> {
    DataTable::new().with_formatter("status", member_status_label)
}

fn member_headers() -> Vec<ExportHeader> {
    vec![
        ExportHeader::new("id", "شناسه"),
        ExportHeader::new("fullName", "نام و نام خانوادگی"),
        ExportHeader::new("phone", "تلفن همراه"),
        ExportHeader::new("nationalId", "کد ملی"),
        ExportHeader::new("status", "وضعیت"),
        ExportHeader::new("totalContributions", "مجموع مشارکت"),
    ]
}

fn check_filename(filename: Option<&str>) -> Result<(), String> {
    match filename {
        Some(name) => validate_export_filename(name),
        None => Ok(()),
    }
}

/// 获取过滤后的会员列表
pub async fn list_members(state: &AppState, filters: MemberFilters) -> Result<Vec<Member>, String> {
    let mut members = state.members_domain.get_members().write().await;
    members.filters = filters;
    Ok(members.filtered().into_iter().cloned().collect())
}

/// 获取单个会员
pub async fn get_member(state: &AppState, id: i64) -> Result<Member, String> {
    validate_member_id(id)?;
    let members = state.members_domain.get_members().read().await;
    members
        .find(id)
        .cloned()
        .ok_or_else(|| format!("会员不存在: {}", id))
}

/// 更新会员字段
pub async fn update_member(state: &AppState, id: i64, changes: Patch) -> Result<Member, String> {
    validate_member_id(id)?;
    let mut members = state.members_domain.get_members().write().await;
    let updated = members
        .crud
        .update(&RecordId::Number(id), changes)
        .await
        .ok_or_else(|| format!("更新会员失败: {}", id))?;
    info!("会员已更新: {}", id);
    Ok(updated)
}

/// 删除会员
pub async fn delete_member(state: &AppState, id: i64) -> Result<(), String> {
    validate_member_id(id)?;
    let mut members = state.members_domain.get_members().write().await;
    if members.crud.remove(&RecordId::Number(id)).await {
        info!("会员已删除: {}", id);
        Ok(())
    } else {
        Err(format!("删除会员失败: {}", id))
    }
}

/// 批量删除会员(全部成功或全部不删)
pub async fn bulk_delete_members(state: &AppState, ids: Vec<i64>) -> Result<usize, String> {
    for id in &ids {
        validate_member_id(*id)?;
    }
    let record_ids: Vec<RecordId> = ids.iter().map(|id| RecordId::Number(*id)).collect();

    let mut members = state.members_domain.get_members().write().await;
    let before = members.members().len();
    if members.crud.bulk_remove(&record_ids).await {
        Ok(before - members.members().len())
    } else {
        Err("批量删除会员失败".to_string())
    }
}

/// 获取会员详情(等待模拟加载结束)
pub async fn get_member_financial(
    state: &AppState,
    id: i64,
    lottery_filters: Option<LotteryFilters>,
    transaction_filters: Option<TransactionFilters>,
) -> Result<MemberFinancialView, String> {
    let member = get_member(state, id).await?;

    let mut financial = state.members_domain.open_financial(id);
    if let Some(filters) = lottery_filters {
        financial.lotteries.filters = filters;
    }
    if let Some(filters) = transaction_filters {
        financial.transactions.filters = filters;
    }
    financial.wait_loaded().await;

    Ok(MemberFinancialView {
        member,
        lotteries: financial.filtered_lotteries().into_iter().cloned().collect(),
        transactions: financial
            .filtered_transactions()
            .into_iter()
            .cloned()
            .collect(),
        documents: financial.documents().to_vec(),
        totals: financial.totals(),
    })
}

/// 导出会员列表为 CSV(使用当前过滤条件)
pub async fn export_members_csv(state: &AppState, filename: Option<String>) -> Result<(), String> {
    check_filename(filename.as_deref())?;
    let members = state.members_domain.get_members().read().await;
    let visible: Vec<Member> = members.filtered().into_iter().cloned().collect();

    let sink = state.storage_domain.get_export_sink();
    if members_table()
        .export_to_csv(&visible, &member_headers(), filename.as_deref(), &**sink)
        .await
    {
        Ok(())
    } else {
        Err("导出会员 CSV 失败".to_string())
    }
}

/// 导出会员列表为 JSON(使用当前过滤条件)
pub async fn export_members_json(state: &AppState, filename: Option<String>) -> Result<(), String> {
    check_filename(filename.as_deref())?;
    let members = state.members_domain.get_members().read().await;
    let visible: Vec<Member> = members.filtered().into_iter().cloned().collect();

    let sink = state.storage_domain.get_export_sink();
    if members_table()
        .export_to_json(&visible, filename.as_deref(), &**sink)
        .await
    {
        Ok(())
    } else {
        Err("导出会员 JSON 失败".to_string())
    }
}

/// 导出会员交易记录为 CSV
pub async fn export_member_transactions_csv(
    state: &AppState,
    id: i64,
    filters: Option<TransactionFilters>,
    filename: Option<String>,
) -> Result<(), String> {
    check_filename(filename.as_deref())?;
    let view = get_member_financial(state, id, None, filters).await?;

    let headers = vec![
        ExportHeader::new("id", "شناسه"),
        ExportHeader::new("date", "تاریخ"),
        ExportHeader::new("type", "نوع"),
        ExportHeader::new("amount", "مبلغ"),
        ExportHeader::new("status", "وضعیت"),
        ExportHeader::new("note", "توضیحات"),
    ];
    let table: DataTable<TransactionItem> = DataTable::new();
    let sink = state.storage_domain.get_export_sink();
    if table
        .export_to_csv(&view.transactions, &headers, filename.as_deref(), &**sink)
        .await
    {
        Ok(())
    } else {
        Err(format!("导出会员 {} 的交易失败", id))
    }
}
