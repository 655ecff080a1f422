// 模拟加载标志 - 在预定延迟后由 true 变为 false

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::debug;

use super::MockContext;
use crate::event_bus::AppEvent;

#[derive(Debug, Clone)]
pub struct LoadingFlag {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for LoadingFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingFlag {
    /// 初始为加载中
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(true);
        Self { tx: Arc::new(tx) }
    }

    pub fn is_loading(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    pub fn finish(&self) {
        self.tx.send_replace(false);
    }

    /// 等待加载结束
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // 发送端由自身持有,不会提前关闭
        let _ = rx.wait_for(|loading| !*loading).await;
    }

    /// 经调度器延迟后结束加载,并发布 `DatasetLoaded`
    pub fn finish_after(
        &self,
        ctx: &MockContext,
        delay: Duration,
        dataset: &'static str,
    ) -> JoinHandle<()> {
        let flag = self.clone();
        let scheduler = ctx.scheduler.clone();
        let event_bus = ctx.event_bus.clone();

        tokio::spawn(async move {
            scheduler.sleep(delay).await;
            flag.finish();
            debug!("数据集加载完成: {}", dataset);
            event_bus.publish(AppEvent::DatasetLoaded { dataset });
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::EventBus;
    use crate::models::LoadingDelays;
    use crate::scheduler::ImmediateScheduler;

    #[tokio::test]
    async fn test_finish_after_flips_flag_and_publishes() {
        let bus = Arc::new(EventBus::new(8));
        let mut rx = bus.subscribe();
        let scheduler = ImmediateScheduler::new();
        let ctx = MockContext::new(scheduler.clone(), bus.clone(), LoadingDelays::default());

        let flag = LoadingFlag::new();
        assert!(flag.is_loading());

        flag.finish_after(&ctx, Duration::from_millis(300), "lotteries")
            .await
            .unwrap();

        assert!(!flag.is_loading());
        assert_eq!(scheduler.calls(), 1);
        assert!(matches!(
            rx.recv().await.unwrap(),
            AppEvent::DatasetLoaded { dataset: "lotteries" }
        ));
    }

    #[tokio::test]
    async fn test_wait_returns_after_finish() {
        let flag = LoadingFlag::new();
        let waiter = {
            let flag = flag.clone();
            tokio::spawn(async move { flag.wait().await })
        };
        flag.finish();
        waiter.await.unwrap();
        assert!(!*flag.subscribe().borrow());
    }
}
