use crate::config::{Config, DEFAULT_CONFIG_FILE, LLMProvider};
use crate::types::{ResearchRequest, SenderProfile};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// brand-scout - 发现相似品牌、补全联系人并生成外联邮件草稿
#[derive(Parser, Debug)]
#[command(name = "brand-scout")]
#[command(
    about = "Discovers brands comparable to a seed brand, finds categorized contacts for each one and drafts a tailored outreach email per brand."
)]
#[command(version)]
pub struct Args {
    /// 种子品牌
    #[arg(short, long)]
    pub brand: String,

    /// 发件人姓名
    #[arg(long, default_value = "")]
    pub sender_name: String,

    /// 发件人所属品牌，缺省为种子品牌
    #[arg(long)]
    pub sender_brand: Option<String>,

    /// 发件人职位
    #[arg(long, default_value = "")]
    pub sender_role: String,

    /// 发件人专长
    #[arg(long, default_value = "")]
    pub sender_expertise: String,

    /// 外联目标
    #[arg(short, long, default_value = "explore a brand partnership")]
    pub goal: String,

    /// 期望对方采取的行动
    #[arg(long, default_value = "schedule a short introductory call")]
    pub cta: String,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 最多发现的相似品牌数量
    #[arg(short = 'n', long)]
    pub max_candidates: Option<usize>,

    /// 品牌分支的最大并发数
    #[arg(long)]
    pub max_parallels: Option<usize>,

    /// LLM Provider (openai, deepseek, openrouter, anthropic, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// 使用的模型
    #[arg(short, long)]
    pub model: Option<String>,

    /// 联系人查询服务 API KEY
    #[arg(long)]
    pub contacts_api_key: Option<String>,

    /// 报告输出目录
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// 不将报告写入磁盘
    #[arg(long)]
    pub no_save: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(&self) -> Result<Config> {
        let mut config = if let Some(config_path) = &self.config {
            // 显式指定的配置文件必须可读
            Config::from_file(config_path)
                .context(format!("无法读取配置文件 {:?}", config_path))?
        } else {
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(DEFAULT_CONFIG_FILE);

            if default_config_path.exists() {
                Config::from_file(&default_config_path)
                    .context(format!("无法读取默认配置文件 {:?}", default_config_path))?
            } else {
                Config::default()
            }
        };

        // 覆盖LLM配置
        if let Some(provider_str) = &self.llm_provider {
            match provider_str.parse::<LLMProvider>() {
                Ok(provider) => config.llm.provider = provider,
                Err(_) => eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用 {}",
                    provider_str, config.llm.provider
                ),
            }
        }
        if let Some(llm_api_base_url) = &self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url.clone();
        }
        if let Some(llm_api_key) = &self.llm_api_key {
            config.llm.api_key = llm_api_key.clone();
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        if let Some(max_parallels) = self.max_parallels {
            config.llm.max_parallels = max_parallels;
        }

        // 联系人查询配置
        if let Some(contacts_api_key) = &self.contacts_api_key {
            config.contacts.api_key = contacts_api_key.clone();
        }

        // 调研流程配置
        if let Some(max_candidates) = self.max_candidates {
            config.research.max_candidates = max_candidates;
        }
        if let Some(output_path) = &self.output_path {
            config.research.output_path = output_path.clone();
        }
        if self.no_save {
            config.research.save_report = false;
        }

        config.verbose = config.verbose || self.verbose;

        Ok(config)
    }

    /// 构造调研请求
    pub fn to_request(&self) -> ResearchRequest {
        let sender = SenderProfile {
            name: self.sender_name.clone(),
            brand: self
                .sender_brand
                .clone()
                .unwrap_or_else(|| self.brand.clone()),
            role: self.sender_role.clone(),
            expertise: self.sender_expertise.clone(),
        };
        ResearchRequest::new(self.brand.clone(), sender, self.goal.clone(), self.cta.clone())
    }
}

// Include tests
#[cfg(test)]
mod tests;
