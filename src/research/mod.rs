// 品牌调研流程
// 发现（BrandDiscovery）与行业判定（IndustryClassifier）并发执行；
// 之后每个候选品牌独立运行：域名推测（normalizer）→ 联系人补全（ContactEnrichment）
// 与草稿生成（ContentGeneration）并发 → 汇总为 BrandResult，最终合并为 ResearchReport。

use anyhow::Result;

use crate::config::Config;
use crate::research::context::ResearchContext;
use crate::research::orchestrator::ResearchOrchestrator;
use crate::types::{ResearchReport, ResearchRequest};

pub mod agents;
pub mod context;
pub mod normalizer;
pub mod orchestrator;

/// 执行调研阶段
pub async fn execute(
    context: &ResearchContext,
    request: &ResearchRequest,
) -> crate::errors::Result<ResearchReport> {
    ResearchOrchestrator.execute_research_pipeline(context, request).await
}

/// 启动一次完整的调研：构造上下文、执行流程、按配置保存报告
pub async fn launch(config: &Config, request: &ResearchRequest) -> Result<ResearchReport> {
    let context = ResearchContext::new(config.clone())?;

    let report = execute(&context, request).await?;

    if config.research.save_report {
        crate::outlet::save(&config.research.output_path, &report).await?;
    }

    Ok(report)
}
