use async_trait::async_trait;
use schemars::JsonSchema;
use serde_json::Value;

use crate::errors::Result;

/// 一次生成式文本调用
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// 调用名称，用于日志
    pub name: String,
    /// 系统指令
    pub system_prompt: String,
    /// 用户指令
    pub user_prompt: String,
    /// 期望的返回结构（JSON Schema），为空时返回自由文本
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    pub fn new(
        name: impl Into<String>,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            response_schema: None,
        }
    }

    /// 要求以 `T` 的 JSON 结构返回
    pub fn with_schema<T: JsonSchema>(mut self) -> Self {
        let schema = schemars::schema_for!(T);
        self.response_schema = serde_json::to_value(&schema).ok();
        self
    }

    /// 最终发送给模型的用户指令，结构化请求会附带 schema 说明
    pub fn render_user_prompt(&self) -> String {
        match &self.response_schema {
            Some(schema) => format!(
                "{}\n\nRespond with a single JSON document only, no prose. It must validate against this JSON Schema:\n```json\n{}\n```",
                self.user_prompt,
                serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string())
            ),
            None => self.user_prompt.clone(),
        }
    }
}

/// 生成式文本服务
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// 返回模型的原始文本输出
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}
