use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::errors::{ResearchError, Result};
use crate::llm::client::GenerationRequest;
use crate::llm::client::utils::parse_json_value;
use crate::research::agents::PromptTemplate;
use crate::research::context::ResearchContext;
use crate::types::{SimilarBrandCandidate, SimilarBrandList};
use crate::utils::retry::retry_with_backoff;

/// 对象形式的返回中可能承载品牌列表的字段
const LIST_KEYS: [&str; 4] = ["brands", "companies", "similar_brands", "results"];

/// 品牌发现的结果；发现不可用时候选列表为空，并携带原因
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiscoveryOutcome {
    pub candidates: Vec<SimilarBrandCandidate>,
    pub unavailable: Option<ResearchError>,
}

/// 相似品牌发现员 - 通过生成式文本服务列出与种子品牌可比的公司
#[derive(Default)]
pub struct BrandDiscovery;

impl BrandDiscovery {
    pub const NAME: &'static str = "brand_discovery";

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: "You are a helpful assistant that provides information about companies and industries.".to_string(),
            opening_instruction: "List {count} companies similar to {brand} in the same industry.".to_string(),
            closing_instruction: "For each company, provide a brief reason why it is similar. Return the companies as objects with `company` and `reason` fields, most relevant first.".to_string(),
        }
    }

    pub fn build_request(&self, brand_name: &str, max_candidates: usize) -> GenerationRequest {
        let template = self.prompt_template();
        let opening = template
            .opening_instruction
            .replace("{count}", &max_candidates.to_string())
            .replace("{brand}", brand_name);
        GenerationRequest::new(
            Self::NAME,
            template.system_prompt,
            format!("{} {}", opening, template.closing_instruction),
        )
        .with_schema::<SimilarBrandList>()
    }

    /// 发现相似品牌，失败时降级为空列表
    pub async fn execute(
        &self,
        context: &ResearchContext,
        brand_name: &str,
        max_candidates: usize,
    ) -> DiscoveryOutcome {
        let request = self.build_request(brand_name, max_candidates);
        let policy = context.llm_policy();

        let outcome = retry_with_backoff(Self::NAME, &policy, || {
            context.text_generator.generate(&request)
        })
        .await
        .and_then(|content| parse_entries(&content));

        match outcome {
            Ok(entries) => {
                let candidates = validate_candidates(entries, max_candidates);
                info!(
                    brand = brand_name,
                    count = candidates.len(),
                    "发现相似品牌"
                );
                DiscoveryOutcome {
                    candidates,
                    unavailable: None,
                }
            }
            Err(err) => {
                warn!(brand = brand_name, error = %err, "品牌发现不可用，报告将不包含候选品牌");
                DiscoveryOutcome {
                    candidates: Vec::new(),
                    unavailable: Some(err),
                }
            }
        }
    }
}

/// 从模型输出中取出原始条目列表
///
/// 接受裸数组，或在 [`LIST_KEYS`] 任一字段下放置数组的对象。
pub fn parse_entries(content: &str) -> Result<Vec<Value>> {
    match parse_json_value(content)? {
        Value::Array(entries) => Ok(entries),
        Value::Object(mut object) => LIST_KEYS
            .iter()
            .find_map(|key| match object.remove(*key) {
                Some(Value::Array(entries)) => Some(entries),
                _ => None,
            })
            .ok_or_else(|| ResearchError::validation("response object holds no brand list")),
        other => Err(ResearchError::validation(format!(
            "expected a list of brands, got {}",
            json_kind(&other)
        ))),
    }
}

/// 校验候选条目：丢弃缺少字段的条目，按名称去重（忽略大小写），保持原顺序并截断
pub fn validate_candidates(entries: Vec<Value>, max_candidates: usize) -> Vec<SimilarBrandCandidate> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for entry in entries {
        if candidates.len() >= max_candidates {
            break;
        }
        let (Some(company), Some(reason)) = (text_field(&entry, "company"), text_field(&entry, "reason"))
        else {
            debug!(entry = %entry, "跳过不完整的品牌条目");
            continue;
        };
        if !seen.insert(dedup_key(&company)) {
            debug!(company = %company, "跳过重复的品牌条目");
            continue;
        }
        candidates.push(SimilarBrandCandidate::new(company, reason));
    }

    candidates
}

fn text_field(entry: &Value, key: &str) -> Option<String> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn dedup_key(company: &str) -> String {
    company
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
