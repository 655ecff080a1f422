// 调度器 - 模拟网络延迟与错峰任务
//
// 所有"异步到达"的效果(加载延迟、示例通知错峰插入、注册请求延迟)
// 都通过该 trait 注入,测试中可替换为立即完成的实现

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::time::Duration;

/// 延迟调度接口
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// 等待指定时长
    async fn sleep(&self, delay: Duration);
}

/// 基于 tokio 定时器的真实调度器
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn sleep(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// 立即完成的调度器
///
/// 只让出一次执行权,不真正等待;记录被请求的延迟次数
#[derive(Debug, Default)]
pub struct ImmediateScheduler {
    calls: AtomicUsize,
}

impl ImmediateScheduler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 已请求的延迟次数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Scheduler for ImmediateScheduler {
    async fn sleep(&self, _delay: Duration) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
    }
}
