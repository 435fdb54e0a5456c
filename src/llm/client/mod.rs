//! LLM客户端 - 提供统一的生成式文本服务接口

use async_trait::async_trait;
use rig::completion::{CompletionError, PromptError};
use tracing::debug;

use crate::config::LLMConfig;
use crate::errors::{ResearchError, Result};

mod providers;
pub mod types;
pub mod utils;

pub use types::{GenerationRequest, TextGenerator};

use providers::ProviderClient;

/// LLM客户端 - 基于 rig 的 provider 实现 [`TextGenerator`]
///
/// 客户端本身不做重试，超时与重试由调用方的 [`crate::utils::retry::CallPolicy`] 负责。
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: LLMConfig) -> Result<Self> {
        let client = ProviderClient::new(&config).map_err(|e| {
            ResearchError::configuration(format!(
                "failed to initialize LLM provider `{}`: {}",
                config.provider, e
            ))
        })?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl TextGenerator for LLMClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let agent = self
            .client
            .create_agent(&request.system_prompt, &self.config);
        let user_prompt = request.render_user_prompt();

        debug!(
            call = %request.name,
            provider = %self.config.provider,
            model = %self.config.model,
            structured = request.response_schema.is_some(),
            "调用模型服务"
        );

        agent.prompt(&user_prompt).await.map_err(|e| {
            classify_prompt_error(&e, &format!("{} ({})", self.config.provider, request.name))
        })
    }
}

/// 无法解码或不符合预期的模型响应不会因重试而改变，归为校验错误；其余按暂时性故障处理
fn classify_prompt_error(err: &PromptError, call: &str) -> ResearchError {
    match err {
        PromptError::CompletionError(
            CompletionError::JsonError(_) | CompletionError::ResponseError(_),
        ) => ResearchError::validation(format!("{}: {}", call, err)),
        _ => ResearchError::unavailable(format!("{}: {}", call, err)),
    }
}
