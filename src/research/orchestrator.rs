use chrono::Utc;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::errors::{ResearchError, Result};
use crate::research::agents::{
    BrandDiscovery, ContactEnrichment, ContentGeneration, IndustryClassifier,
};
use crate::research::context::ResearchContext;
use crate::research::normalizer::normalize_domain;
use crate::types::{
    BranchStage, BranchStatus, BrandResult, EnrichmentResult, ResearchReport, ResearchRequest,
    SimilarBrandCandidate,
};
use crate::utils::threads::do_parallel_with_limit;

/// 品牌调研编排器
///
/// 每个候选品牌是一个相互隔离的分支，一个分支的失败不会影响其他分支出现在报告中。
#[derive(Default)]
pub struct ResearchOrchestrator;

impl ResearchOrchestrator {
    /// 执行完整的调研流程
    ///
    /// 只有在流程根本无法开始时（配置层面的问题）才返回错误，其余失败都体现在报告数据中。
    pub async fn execute_research_pipeline(
        &self,
        context: &ResearchContext,
        request: &ResearchRequest,
    ) -> Result<ResearchReport> {
        let seed_brand = request.seed_brand.trim();
        if seed_brand.is_empty() {
            return Err(ResearchError::configuration("seed brand name is required"));
        }
        let max_candidates = context.config.research.max_candidates;
        if max_candidates == 0 {
            return Err(ResearchError::configuration(
                "max_candidates must be at least 1",
            ));
        }

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(%run_id, seed_brand, max_candidates, "开始品牌调研流程");

        // 品牌发现与行业判定互不依赖
        let (discovery, industry) = tokio::join!(
            BrandDiscovery.execute(context, seed_brand, max_candidates),
            IndustryClassifier.execute(context, seed_brand)
        );

        let max_parallels = context.config.llm.max_parallels;
        info!(
            candidates = discovery.candidates.len(),
            max_parallels, "启动候选品牌分支"
        );

        let branch_futures: Vec<_> = discovery
            .candidates
            .iter()
            .map(|candidate| {
                let context = context.clone();
                let request = request.clone();
                let candidate = candidate.clone();
                let industry = industry.clone();
                async move {
                    let fallback = candidate.clone();
                    // 单独的任务中运行，分支内的 panic 只会让该分支失败
                    match tokio::spawn(run_branch(context, request, candidate, industry)).await {
                        Ok(result) => result,
                        Err(join_error) => {
                            error!(company = %fallback.company, error = %join_error, "分支任务异常终止");
                            aborted_result(fallback, format!("branch task aborted: {}", join_error))
                        }
                    }
                }
            })
            .collect();

        // 结果顺序与发现顺序一致
        let results = do_parallel_with_limit(branch_futures, max_parallels).await;

        let report = ResearchReport {
            run_id,
            seed_brand: seed_brand.to_string(),
            industry,
            results,
            discovery_error: discovery
                .unavailable
                .map(|err| format!("discovery unavailable: {}", err)),
            started_at,
            finished_at: Utc::now(),
        };

        let summary = report.summary();
        info!(
            %run_id,
            done = summary.done,
            partial = summary.partial,
            failed = summary.failed,
            "品牌调研流程执行完毕"
        );
        Ok(report)
    }
}

/// 记录单个分支的阶段推进
struct BranchTracker {
    company: String,
    stage: BranchStage,
}

impl BranchTracker {
    fn new(company: &str) -> Self {
        Self {
            company: company.to_string(),
            stage: BranchStage::Pending,
        }
    }

    fn advance(&mut self, next: BranchStage) {
        debug!(company = %self.company, from = %self.stage, to = %next, "分支阶段推进");
        self.stage = next;
    }
}

/// 执行单个候选品牌的分支：解析域名 → 补全联系人 / 生成草稿 → 汇总
///
/// 联系人补全与草稿生成互不依赖，并发执行。
async fn run_branch(
    context: ResearchContext,
    request: ResearchRequest,
    candidate: SimilarBrandCandidate,
    industry: String,
) -> BrandResult {
    let mut tracker = BranchTracker::new(&candidate.company);

    let domain = normalize_domain(&candidate.company);
    tracker.advance(BranchStage::Resolved);

    let (enrichment, draft) = tokio::join!(
        ContactEnrichment.execute(&context, &domain),
        ContentGeneration.execute(&context, &request, &candidate.company, &industry)
    );

    let mut reasons = Vec::new();

    let (enrichment, enriched) = match enrichment {
        Ok(result) => {
            tracker.advance(BranchStage::Enriched);
            (result, true)
        }
        Err(err) => {
            reasons.push(format!("contact enrichment failed: {}", err));
            (EnrichmentResult::empty(&domain), false)
        }
    };

    let draft = match draft {
        Ok(draft) => {
            if enriched {
                tracker.advance(BranchStage::Drafted);
            }
            Some(draft)
        }
        Err(err) => {
            reasons.push(format!("draft generation failed: {}", err));
            None
        }
    };

    let status = match (enriched, draft.is_some()) {
        (true, true) => BranchStatus::Done,
        (false, false) => BranchStatus::Failed,
        _ => BranchStatus::Partial,
    };
    if status == BranchStatus::Done {
        tracker.advance(BranchStage::Done);
    }

    let failure_reason = if reasons.is_empty() {
        None
    } else {
        Some(reasons.join("; "))
    };

    info!(
        company = %candidate.company,
        domain = %domain,
        status = %status,
        stage = %tracker.stage,
        contacts = enrichment.total_contacts(),
        "分支完成"
    );

    BrandResult {
        candidate,
        domain,
        enrichment,
        draft,
        status,
        stage: tracker.stage,
        failure_reason,
    }
}

fn aborted_result(candidate: SimilarBrandCandidate, reason: String) -> BrandResult {
    let domain = normalize_domain(&candidate.company);
    BrandResult {
        enrichment: EnrichmentResult::empty(&domain),
        candidate,
        domain,
        draft: None,
        status: BranchStatus::Failed,
        stage: BranchStage::Pending,
        failure_reason: Some(reason),
    }
}
