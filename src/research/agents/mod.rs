pub mod brand_discovery;
pub mod contact_enrichment;
pub mod content_generation;
pub mod industry_classifier;

pub use brand_discovery::{BrandDiscovery, DiscoveryOutcome};
pub use contact_enrichment::ContactEnrichment;
pub use content_generation::ContentGeneration;
pub use industry_classifier::IndustryClassifier;

/// Prompt模板配置
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// 系统提示词
    pub system_prompt: String,
    /// 开头的说明性指令
    pub opening_instruction: String,
    /// 结尾的强调性指令
    pub closing_instruction: String,
}
