use tracing::{info, warn};

use crate::llm::client::GenerationRequest;
use crate::research::agents::PromptTemplate;
use crate::research::context::ResearchContext;
use crate::utils::retry::retry_with_backoff;

/// 无法判定行业时使用的占位值
pub const UNKNOWN_INDUSTRY: &str = "Unknown";

/// 行业判定员 - 行业标签只用于展示与草稿措辞，失败时返回 [`UNKNOWN_INDUSTRY`]
#[derive(Default)]
pub struct IndustryClassifier;

impl IndustryClassifier {
    pub const NAME: &'static str = "industry_classifier";

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: "You are a helpful assistant that provides information about companies and industries.".to_string(),
            opening_instruction: "What industry is {brand} primarily operating in?".to_string(),
            closing_instruction: "Provide a one-word answer.".to_string(),
        }
    }

    pub fn build_request(&self, brand_name: &str) -> GenerationRequest {
        let template = self.prompt_template();
        GenerationRequest::new(
            Self::NAME,
            template.system_prompt,
            format!(
                "{} {}",
                template.opening_instruction.replace("{brand}", brand_name),
                template.closing_instruction
            ),
        )
    }

    pub async fn execute(&self, context: &ResearchContext, brand_name: &str) -> String {
        let request = self.build_request(brand_name);
        let policy = context.llm_policy();

        match retry_with_backoff(Self::NAME, &policy, || {
            context.text_generator.generate(&request)
        })
        .await
        {
            Ok(content) => {
                let industry = clean_label(&content);
                info!(brand = brand_name, industry = %industry, "行业判定完成");
                industry
            }
            Err(err) => {
                warn!(brand = brand_name, error = %err, "行业判定失败，使用 Unknown");
                UNKNOWN_INDUSTRY.to_string()
            }
        }
    }
}

/// 取第一行非空文本，去掉引号、强调符号和句末标点
fn clean_label(content: &str) -> String {
    let label = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '*' | '`' | '.' | '!'))
        .trim();

    if label.is_empty() {
        UNKNOWN_INDUSTRY.to_string()
    } else {
        label.to_string()
    }
}
