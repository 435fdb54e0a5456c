use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{BranchStatus, ContactRecord, ResearchReport};

pub const REPORT_JSON: &str = "report.json";
pub const REPORT_MARKDOWN: &str = "report.md";

/// 保存报告
pub async fn save(output_dir: &Path, report: &ResearchReport) -> Result<()> {
    let outlet = DiskOutlet::new(output_dir.to_path_buf());
    outlet.save(report).await
}

pub trait Outlet {
    async fn save(&self, report: &ResearchReport) -> Result<()>;
}

/// 将报告以 JSON 与 Markdown 两种格式写入目录
pub struct DiskOutlet {
    output_dir: PathBuf,
}

impl DiskOutlet {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }
}

impl Outlet for DiskOutlet {
    async fn save(&self, report: &ResearchReport) -> Result<()> {
        fs::create_dir_all(&self.output_dir).context(format!(
            "Failed to create output directory: {:?}",
            self.output_dir
        ))?;

        let json_path = self.output_dir.join(REPORT_JSON);
        let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        fs::write(&json_path, json).context(format!("Failed to write {:?}", json_path))?;

        let markdown_path = self.output_dir.join(REPORT_MARKDOWN);
        fs::write(&markdown_path, render_markdown(report))
            .context(format!("Failed to write {:?}", markdown_path))?;

        println!("💾 报告已保存: {}", self.output_dir.display());
        Ok(())
    }
}

fn status_icon(status: BranchStatus) -> &'static str {
    match status {
        BranchStatus::Done => "✅",
        BranchStatus::Partial => "⚠️",
        BranchStatus::Failed => "❌",
    }
}

fn describe_contact(record: &ContactRecord) -> String {
    let mut line = record.email.clone();
    match (record.display_name(), record.position.as_deref()) {
        (Some(name), Some(position)) => line.push_str(&format!(" ({}, {})", name, position)),
        (Some(name), None) => line.push_str(&format!(" ({})", name)),
        (None, Some(position)) => line.push_str(&format!(" ({})", position)),
        (None, None) => {}
    }
    line
}

/// 渲染 Markdown 版本的报告
pub fn render_markdown(report: &ResearchReport) -> String {
    let summary = report.summary();
    let mut content = String::new();

    content.push_str(&format!("# Brand research: {}\n\n", report.seed_brand));
    content.push_str(&format!("- Industry: {}\n", report.industry));
    content.push_str(&format!("- Run: `{}`\n", report.run_id));
    content.push_str(&format!(
        "- Generated: {}\n",
        report.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    content.push_str(&format!(
        "- Brands: {} done, {} partial, {} failed\n",
        summary.done, summary.partial, summary.failed
    ));
    if let Some(discovery_error) = &report.discovery_error {
        content.push_str(&format!("- Discovery: {}\n", discovery_error));
    }
    content.push('\n');

    if report.results.is_empty() {
        content.push_str("No comparable brands were found.\n");
        return content;
    }

    for (i, result) in report.results.iter().enumerate() {
        content.push_str(&format!(
            "## {}. {} ({})\n\n",
            i + 1,
            result.candidate.company,
            result.status
        ));
        content.push_str(&format!("- Why similar: {}\n", result.candidate.reason));
        content.push_str(&format!("- Domain (guessed): {}\n", result.domain));
        if let Some(reason) = &result.failure_reason {
            content.push_str(&format!("- Issues: {}\n", reason));
        }

        content.push_str("\n### Contacts\n\n");
        if result.enrichment.is_empty() {
            content.push_str("No contacts found.\n");
        } else {
            for record in result.enrichment.named() {
                content.push_str(&format!(
                    "- **{}**: {}\n",
                    record.category.to_string().to_uppercase(),
                    describe_contact(record)
                ));
            }
            for record in &result.enrichment.other {
                content.push_str(&format!("- other: {}\n", describe_contact(record)));
            }
        }

        content.push_str("\n### Draft\n\n");
        match &result.draft {
            Some(draft) => {
                content.push_str(&draft.content);
                content.push('\n');
            }
            None => content.push_str("No draft was generated.\n"),
        }
        content.push('\n');
    }

    content
}

/// 在控制台输出报告摘要
pub fn print_summary(report: &ResearchReport) {
    let summary = report.summary();

    println!("\n📊 {} 的调研结果", report.seed_brand);
    println!("   行业: {}", report.industry);
    if let Some(discovery_error) = &report.discovery_error {
        println!("   ⚠️ {}", discovery_error);
    }
    if report.results.is_empty() {
        println!("   未发现相似品牌");
        return;
    }

    for result in &report.results {
        println!(
            "{} {} — {}",
            status_icon(result.status),
            result.candidate.company,
            result.domain
        );
        if result.enrichment.is_empty() {
            println!("   未找到联系人");
        } else {
            for record in result.enrichment.named() {
                println!(
                    "   {}: {}",
                    record.category.to_string().to_uppercase(),
                    describe_contact(record)
                );
            }
            if !result.enrichment.other.is_empty() {
                println!("   其他联系人: {}", result.enrichment.other.len());
            }
        }
        if result.draft.is_some() {
            println!("   📝 草稿已生成");
        }
        if let Some(reason) = &result.failure_reason {
            println!("   ⚠️ {}", reason);
        }
    }

    println!(
        "\n✓ 完成 {} / 部分完成 {} / 失败 {}",
        summary.done, summary.partial, summary.failed
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        BranchStage, BrandResult, ContactCategory, EnrichmentResult, OutreachDraft, RawContact,
        SimilarBrandCandidate,
    };
    use chrono::Utc;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn sample_report() -> ResearchReport {
        let mut enrichment = EnrichmentResult::empty("www.globex.com");
        enrichment.ceo = Some(ContactRecord::from_raw(
            ContactCategory::Ceo,
            RawContact::new("jane.ceo@globex.com").with_position("CEO"),
        ));
        enrichment.other.push(ContactRecord::from_raw(
            ContactCategory::Other,
            RawContact::new("info@globex.com"),
        ));

        ResearchReport {
            run_id: Uuid::new_v4(),
            seed_brand: "Acme".to_string(),
            industry: "Manufacturing".to_string(),
            results: vec![
                BrandResult {
                    candidate: SimilarBrandCandidate::new("Globex", "same sector"),
                    domain: "www.globex.com".to_string(),
                    enrichment,
                    draft: Some(OutreachDraft {
                        recipient_brand: "Globex".to_string(),
                        content: "Subject: Hello Globex".to_string(),
                        generated_at: Utc::now(),
                    }),
                    status: BranchStatus::Done,
                    stage: BranchStage::Done,
                    failure_reason: None,
                },
                BrandResult {
                    candidate: SimilarBrandCandidate::new("Initech", "rival"),
                    domain: "www.initech.com".to_string(),
                    enrichment: EnrichmentResult::empty("www.initech.com"),
                    draft: None,
                    status: BranchStatus::Failed,
                    stage: BranchStage::Resolved,
                    failure_reason: Some("contact enrichment failed".to_string()),
                },
            ],
            discovery_error: None,
            started_at: Utc::now(),
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_markdown() {
        let markdown = render_markdown(&sample_report());

        assert!(markdown.starts_with("# Brand research: Acme"));
        assert!(markdown.contains("- Industry: Manufacturing"));
        assert!(markdown.contains("1 done, 0 partial, 1 failed"));
        assert!(markdown.contains("## 1. Globex (done)"));
        assert!(markdown.contains("- **CEO**: jane.ceo@globex.com (CEO)"));
        assert!(markdown.contains("- other: info@globex.com"));
        assert!(markdown.contains("Subject: Hello Globex"));
        assert!(markdown.contains("## 2. Initech (failed)"));
        assert!(markdown.contains("No draft was generated."));
    }

    #[test]
    fn test_render_markdown_without_results() {
        let mut report = sample_report();
        report.results.clear();
        report.discovery_error = Some("discovery unavailable: timed out".to_string());

        let markdown = render_markdown(&report);
        assert!(markdown.contains("- Discovery: discovery unavailable: timed out"));
        assert!(markdown.contains("No comparable brands were found."));
    }

    #[tokio::test]
    async fn test_save_writes_both_formats() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("reports");
        let report = sample_report();

        save(&output_dir, &report).await.unwrap();

        let json = fs::read_to_string(output_dir.join(REPORT_JSON)).unwrap();
        let parsed: ResearchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.seed_brand, "Acme");
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].status, BranchStatus::Done);

        let markdown = fs::read_to_string(output_dir.join(REPORT_MARKDOWN)).unwrap();
        assert!(markdown.contains("Globex"));
    }
}
