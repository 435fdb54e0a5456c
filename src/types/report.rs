use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

use crate::types::brand::SimilarBrandCandidate;
use crate::types::contact::EnrichmentResult;

/// 为某个候选品牌生成的外联邮件草稿
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutreachDraft {
    pub recipient_brand: String,
    pub content: String,
    pub generated_at: DateTime<Utc>,
}

/// 品牌分支的推进阶段
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum BranchStage {
    Pending,
    Resolved,
    Enriched,
    Drafted,
    Done,
}

impl Display for BranchStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BranchStage::Pending => write!(f, "PENDING"),
            BranchStage::Resolved => write!(f, "RESOLVED"),
            BranchStage::Enriched => write!(f, "ENRICHED"),
            BranchStage::Drafted => write!(f, "DRAFTED"),
            BranchStage::Done => write!(f, "DONE"),
        }
    }
}

/// 品牌分支的终态
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BranchStatus {
    Done,
    Partial,
    Failed,
}

impl Display for BranchStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BranchStatus::Done => write!(f, "done"),
            BranchStatus::Partial => write!(f, "partial"),
            BranchStatus::Failed => write!(f, "failed"),
        }
    }
}

/// 单个候选品牌的调研结果，终态确定后不再修改
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BrandResult {
    pub candidate: SimilarBrandCandidate,
    /// 由品牌名推测出的域名，仅为启发式结果
    pub domain: String,
    pub enrichment: EnrichmentResult,
    pub draft: Option<OutreachDraft>,
    pub status: BranchStatus,
    /// 按顺序推进到的最后一个阶段
    pub stage: BranchStage,
    pub failure_reason: Option<String>,
}

/// 各终态的分支数量
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportSummary {
    pub done: usize,
    pub partial: usize,
    pub failed: usize,
}

/// 一次调研请求的完整报告
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ResearchReport {
    pub run_id: Uuid,
    pub seed_brand: String,
    /// 种子品牌所属行业，无法判定时为 "Unknown"
    pub industry: String,
    /// 与发现顺序一致，失败的分支同样保留
    pub results: Vec<BrandResult>,
    /// 品牌发现不可用时的原因
    pub discovery_error: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ResearchReport {
    pub fn summary(&self) -> ReportSummary {
        self.results
            .iter()
            .fold(ReportSummary::default(), |mut summary, result| {
                match result.status {
                    BranchStatus::Done => summary.done += 1,
                    BranchStatus::Partial => summary.partial += 1,
                    BranchStatus::Failed => summary.failed += 1,
                }
                summary
            })
    }

    pub fn result_for(&self, company: &str) -> Option<&BrandResult> {
        self.results
            .iter()
            .find(|result| result.candidate.company.eq_ignore_ascii_case(company))
    }
}
