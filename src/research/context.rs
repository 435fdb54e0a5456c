use std::sync::Arc;

use crate::config::Config;
use crate::contacts::{ContactLookup, HunterClient};
use crate::errors::Result;
use crate::llm::client::{LLMClient, TextGenerator};
use crate::utils::retry::CallPolicy;

/// 一次调研运行所需的配置与外部服务客户端
///
/// 由调用方显式构造并向下传递，运行结束后随之释放，不存在进程级的全局客户端。
#[derive(Clone)]
pub struct ResearchContext {
    /// 配置
    pub config: Config,
    /// 生成式文本服务
    pub text_generator: Arc<dyn TextGenerator>,
    /// 联系人查询服务
    pub contact_lookup: Arc<dyn ContactLookup>,
}

impl ResearchContext {
    /// 校验配置并创建真实的服务客户端
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let text_generator = Arc::new(LLMClient::new(config.llm.clone())?);
        let contact_lookup = Arc::new(HunterClient::new(config.contacts.clone()));

        Ok(Self::with_services(config, text_generator, contact_lookup))
    }

    /// 使用指定的服务实现创建上下文
    pub fn with_services(
        config: Config,
        text_generator: Arc<dyn TextGenerator>,
        contact_lookup: Arc<dyn ContactLookup>,
    ) -> Self {
        Self {
            config,
            text_generator,
            contact_lookup,
        }
    }

    /// 生成式文本调用的超时与重试策略
    pub fn llm_policy(&self) -> CallPolicy {
        CallPolicy::from(&self.config.llm)
    }

    /// 联系人查询调用的超时与重试策略
    pub fn contacts_policy(&self) -> CallPolicy {
        CallPolicy::from(&self.config.contacts)
    }
}
