//! 外部服务调用的超时与重试策略

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{ContactsConfig, LLMConfig};
use crate::errors::{ResearchError, Result};

/// 单次外部调用的策略
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallPolicy {
    /// 暂时性错误的重试次数（不含首次调用）
    pub retry_attempts: u32,
    /// 首次重试前的等待时间，之后每次翻倍
    pub retry_delay: Duration,
    /// 每一次尝试的超时时间
    pub timeout: Duration,
}

impl CallPolicy {
    pub fn new(retry_attempts: u32, retry_delay: Duration, timeout: Duration) -> Self {
        Self {
            retry_attempts,
            retry_delay,
            timeout,
        }
    }

    /// 第 `retry` 次重试（从0开始）前的等待时间，带少量随机抖动
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        let base = self.retry_delay.saturating_mul(2u32.saturating_pow(retry));
        let jitter_cap = (self.retry_delay.as_millis() / 4) as u64;
        if jitter_cap == 0 {
            return base;
        }
        let jitter = rand::rng().random_range(0..=jitter_cap);
        base + Duration::from_millis(jitter)
    }
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self::new(2, Duration::from_millis(500), Duration::from_secs(60))
    }
}

impl From<&LLMConfig> for CallPolicy {
    fn from(config: &LLMConfig) -> Self {
        Self::new(
            config.retry_attempts,
            Duration::from_millis(config.retry_delay_ms),
            Duration::from_secs(config.timeout_seconds),
        )
    }
}

impl From<&ContactsConfig> for CallPolicy {
    fn from(config: &ContactsConfig) -> Self {
        Self::new(
            config.retry_attempts,
            Duration::from_millis(config.retry_delay_ms),
            Duration::from_secs(config.timeout_seconds),
        )
    }
}

/// 带超时与指数退避的通用重试逻辑
///
/// 只有暂时性错误（服务不可用、超时）会被重试；校验错误直接返回。
pub async fn retry_with_backoff<T, F, Fut>(name: &str, policy: &CallPolicy, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut retries = 0;

    loop {
        let outcome = match tokio::time::timeout(policy.timeout, operation()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ResearchError::Timeout(policy.timeout.as_millis() as u64)),
        };

        match outcome {
            Ok(value) => {
                if retries > 0 {
                    debug!(call = name, retries, "外部调用在重试后成功");
                }
                return Ok(value);
            }
            Err(err) if err.is_transient() && retries < policy.retry_attempts => {
                let delay = policy.backoff_delay(retries);
                retries += 1;
                warn!(
                    call = name,
                    attempt = retries,
                    max_retries = policy.retry_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "调用外部服务出错，准备重试"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => {
                warn!(call = name, retries, error = %err, "调用外部服务失败，放弃");
                return Err(err);
            }
        }
    }
}
