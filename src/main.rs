// 会员抽奖管理后台入口

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lottery_dashboard_lib::run().await
}
