use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 发起方信息
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SenderProfile {
    /// 发件人姓名
    pub name: String,
    /// 发件人所属品牌
    pub brand: String,
    /// 发件人职位
    pub role: String,
    /// 发件人专长
    pub expertise: String,
}

/// 一次调研请求，由调用方构造，创建后不再修改
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResearchRequest {
    /// 种子品牌
    pub seed_brand: String,
    pub sender: SenderProfile,
    /// 外联目标
    pub outreach_goal: String,
    /// 期望对方采取的行动
    pub call_to_action: String,
}

impl ResearchRequest {
    pub fn new(
        seed_brand: impl Into<String>,
        sender: SenderProfile,
        outreach_goal: impl Into<String>,
        call_to_action: impl Into<String>,
    ) -> Self {
        Self {
            seed_brand: seed_brand.into(),
            sender,
            outreach_goal: outreach_goal.into(),
            call_to_action: call_to_action.into(),
        }
    }
}

/// 与种子品牌相似的候选品牌
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct SimilarBrandCandidate {
    /// 公司名称
    pub company: String,
    /// 相似的理由
    pub reason: String,
}

impl SimilarBrandCandidate {
    pub fn new(company: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            reason: reason.into(),
        }
    }
}

/// 相似品牌列表，作为结构化输出的 schema
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct SimilarBrandList {
    pub brands: Vec<SimilarBrandCandidate>,
}
