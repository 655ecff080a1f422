// 会员文档 - 固定的三份模拟文档

use serde::{Deserialize, Serialize};

use super::loading::LoadingFlag;
use super::lotteries::LotteryItem;
use super::MockContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Receipt,
    Form,
    Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Approved,
    Pending,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentItem {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lottery_id: Option<i64>,
    pub title: String,
    #[serde(rename = "type")]
    pub document_type: DocumentType,
    pub status: DocumentStatus,
    pub url: String,
}

/// 前三个抽奖各关联一份文档(不足时不关联)
pub fn generate_documents(lotteries: &[LotteryItem]) -> Vec<DocumentItem> {
    let lottery_id = |index: usize| lotteries.get(index).map(|l| l.id);

    vec![
        DocumentItem {
            id: 1,
            lottery_id: lottery_id(0),
            title: "رسید پرداخت شماره ۱".to_string(),
            document_type: DocumentType::Receipt,
            status: DocumentStatus::Approved,
            url: "https://via.placeholder.com/1200x800.png?text=Receipt+1".to_string(),
        },
        DocumentItem {
            id: 2,
            lottery_id: lottery_id(1),
            title: "رسید پرداخت شماره ۲".to_string(),
            document_type: DocumentType::Receipt,
            status: DocumentStatus::Pending,
            url: "https://via.placeholder.com/1200x800.png?text=Receipt+2".to_string(),
        },
        DocumentItem {
            id: 3,
            lottery_id: lottery_id(2),
            title: "فرم احراز هویت".to_string(),
            document_type: DocumentType::Form,
            status: DocumentStatus::Rejected,
            url: "https://via.placeholder.com/1000x1400.png?text=KYC+Form".to_string(),
        },
    ]
}

pub struct Documents {
    items: Vec<DocumentItem>,
    loading: LoadingFlag,
}

impl Documents {
    pub fn mount(lotteries: &[LotteryItem], ctx: &MockContext) -> Self {
        let loading = LoadingFlag::new();
        loading.finish_after(ctx, ctx.delays.documents(), "documents");
        Self {
            items: generate_documents(lotteries),
            loading,
        }
    }

    pub fn items(&self) -> &[DocumentItem] {
        &self.items
    }

    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::lotteries::generate_lotteries;

    #[test]
    fn test_documents_link_first_lotteries() {
        let docs = generate_documents(&generate_lotteries(0));
        let links: Vec<Option<i64>> = docs.iter().map(|d| d.lottery_id).collect();
        assert_eq!(links, vec![Some(1000), Some(1001), Some(1002)]);
        assert_eq!(docs[2].document_type, DocumentType::Form);
    }

    #[test]
    fn test_documents_without_lotteries() {
        let docs = generate_documents(&[]);
        assert_eq!(docs.len(), 3);
        assert!(docs.iter().all(|d| d.lottery_id.is_none()));
        let value = serde_json::to_value(&docs[0]).unwrap();
        assert!(value.get("lotteryId").is_none());
        assert_eq!(value["type"], "receipt");
    }
}
