use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// 以有限的并发度执行一组异步任务
///
/// 返回结果的顺序与输入顺序一致，与各任务完成的先后无关。
pub async fn do_parallel_with_limit<F, T>(futures: Vec<F>, max_concurrent: usize) -> Vec<T>
where
    F: Future<Output = T>,
{
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));

    let controlled_futures = futures.into_iter().map(|future| {
        let semaphore = Arc::clone(&semaphore);
        async move {
            // 信号量不会被关闭，acquire 只会在拿到许可后返回
            let _permit = semaphore.acquire().await;
            future.await
        }
    });

    join_all(controlled_futures).await
}
