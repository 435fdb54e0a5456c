//! 调研流程的错误分类
//!
//! 只有 [`ResearchError::Configuration`] 会中断整个调研流程，其余错误都会被
//! 记录到对应品牌分支的状态字段中。

/// 调研流程错误
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResearchError {
    /// 缺少凭据或必要配置，在任何分支开始之前即终止
    #[error("configuration error: {0}")]
    Configuration(String),

    /// 网络或外部服务的暂时性故障，按重试策略重试
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// 外部服务返回了无法解析或不符合预期结构的内容，不重试
    #[error("validation error: {0}")]
    Validation(String),

    /// 调用超出时限，按服务不可用处理
    #[error("timed out after {0} ms")]
    Timeout(u64),
}

pub type Result<T> = std::result::Result<T, ResearchError>;

impl ResearchError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::ServiceUnavailable(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// 是否属于可重试的暂时性错误
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ServiceUnavailable(_) | Self::Timeout(_))
    }
}

impl From<reqwest::Error> for ResearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Validation(err.to_string())
        } else {
            Self::ServiceUnavailable(err.to_string())
        }
    }
}
