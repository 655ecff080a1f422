// 会员领域管理器
//
// 负责会员名册与会员详情的模拟数据

use std::sync::Arc;
use tokio::sync::RwLock;
use crate::mock::{MemberFinancial, MembersData, MockContext};

/// 会员领域管理器 - 负责会员列表、详情与注册延迟
#[derive(Clone)]
pub struct MembersDomain {
    members: Arc<RwLock<MembersData>>,
    mock_context: MockContext,
}

impl MembersDomain {
    /// 创建新的会员领域管理器(需在 tokio 运行时中调用)
    pub fn new(mock_context: MockContext) -> Self {
        let members = MembersData::mount(&mock_context);
        Self {
            members: Arc::new(RwLock::new(members)),
            mock_context,
        }
    }

    /// 获取会员列表数据
    pub fn get_members(&self) -> &Arc<RwLock<MembersData>> {
        &self.members
    }

    /// 获取模拟数据依赖
    pub fn get_mock_context(&self) -> &MockContext {
        &self.mock_context
    }

    /// 打开会员详情(每次重新生成)
    pub fn open_financial(&self, member_id: i64) -> MemberFinancial {
        MemberFinancial::mount(member_id, &self.mock_context)
    }
}
