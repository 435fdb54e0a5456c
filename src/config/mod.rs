use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::errors::ResearchError;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "brand-scout.toml";

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    #[default]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "openrouter")]
    OpenRouter,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::OpenRouter => write!(f, "openrouter"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "openrouter" => Ok(LLMProvider::OpenRouter),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    /// LLM模型配置
    pub llm: LLMConfig,

    /// 联系人查询服务配置
    pub contacts: ContactsConfig,

    /// 调研流程配置
    pub research: ResearchConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// 使用的模型
    pub model: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 暂时性错误的重试次数（不含首次调用）
    pub retry_attempts: u32,

    /// 首次重试间隔（毫秒），之后按指数增长
    pub retry_delay_ms: u64,

    /// 单次调用超时时间（秒）
    pub timeout_seconds: u64,

    /// 品牌分支的最大并发数
    pub max_parallels: usize,
}

/// 联系人查询服务（Hunter.io domain search）配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ContactsConfig {
    /// API KEY
    pub api_key: String,

    /// API基地址
    pub api_base_url: String,

    /// 每个域名最多返回的联系人数量
    pub limit: u32,

    /// 暂时性错误的重试次数（不含首次调用）
    pub retry_attempts: u32,

    /// 首次重试间隔（毫秒）
    pub retry_delay_ms: u64,

    /// 单次调用超时时间（秒）
    pub timeout_seconds: u64,
}

/// 调研流程配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ResearchConfig {
    /// 最多发现的相似品牌数量
    pub max_candidates: usize,

    /// 报告输出目录
    pub output_path: PathBuf,

    /// 是否将报告写入磁盘
    pub save_report: bool,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 在任何分支开始之前校验必要配置
    pub fn validate(&self) -> crate::errors::Result<()> {
        if self.llm.provider != LLMProvider::Ollama && self.llm.api_key.trim().is_empty() {
            return Err(ResearchError::configuration(format!(
                "missing API key for LLM provider `{}`",
                self.llm.provider
            )));
        }
        if self.llm.model.trim().is_empty() {
            return Err(ResearchError::configuration("LLM model is not set"));
        }
        if self.contacts.api_key.trim().is_empty() {
            return Err(ResearchError::configuration(
                "missing API key for the contact lookup service",
            ));
        }
        if self.research.max_candidates == 0 {
            return Err(ResearchError::configuration(
                "max_candidates must be at least 1",
            ));
        }
        if self.llm.max_parallels == 0 {
            return Err(ResearchError::configuration(
                "max_parallels must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.openai.com/v1"),
            model: String::from("gpt-4o-mini"),
            max_tokens: 2048,
            temperature: 0.7,
            retry_attempts: 2,
            retry_delay_ms: 500,
            timeout_seconds: 60,
            max_parallels: 3,
        }
    }
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("HUNTER_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.hunter.io/v2"),
            limit: 10,
            retry_attempts: 2,
            retry_delay_ms: 500,
            timeout_seconds: 30,
        }
    }
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            max_candidates: 5,
            output_path: PathBuf::from("./brand-scout.out"),
            save_report: true,
        }
    }
}
