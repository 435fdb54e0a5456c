use tracing::info;

use crate::errors::Result;
use crate::research::context::ResearchContext;
use crate::types::{ContactCategory, ContactRecord, EnrichmentResult, RawContact};
use crate::utils::retry::retry_with_backoff;

/// 联系人补全员 - 查询域名下的联系人并按邮箱地址分类
#[derive(Default)]
pub struct ContactEnrichment;

impl ContactEnrichment {
    pub const NAME: &'static str = "contact_enrichment";

    /// 查询失败时返回错误，由编排器降级为空结果
    pub async fn execute(&self, context: &ResearchContext, domain: &str) -> Result<EnrichmentResult> {
        let policy = context.contacts_policy();
        let contacts = retry_with_backoff(Self::NAME, &policy, || {
            context.contact_lookup.find_contacts(domain)
        })
        .await?;

        let result = categorize_contacts(domain, contacts);
        info!(
            domain,
            total = result.total_contacts(),
            named = result.named().count(),
            "联系人补全完成"
        );
        Ok(result)
    }
}

/// 仅按邮箱地址判断的分类，优先级依次为 ceo、cmo、cfo
pub fn primary_category(email: &str) -> ContactCategory {
    let lowered = email.to_lowercase();
    if lowered.contains("ceo") {
        ContactCategory::Ceo
    } else if lowered.contains("cmo") || lowered.contains("marketing") {
        ContactCategory::Cmo
    } else if lowered.contains("cfo") || lowered.contains("finance") {
        ContactCategory::Cfo
    } else {
        ContactCategory::Other
    }
}

/// 结合已填充的分类决定最终落点
///
/// 具名分类先到先得；已被占用时落入 `other`。含 "marketing" 但不含 "cmo" 的
/// 地址在 cmo 已被占用时改投 `marketing`。
fn resolve_category(result: &EnrichmentResult, email: &str) -> ContactCategory {
    let category = match primary_category(email) {
        ContactCategory::Cmo if result.cmo.is_some() => {
            let lowered = email.to_lowercase();
            if lowered.contains("marketing") && !lowered.contains("cmo") {
                ContactCategory::Marketing
            } else {
                ContactCategory::Other
            }
        }
        category => category,
    };

    match result.get(category) {
        Some(_) => ContactCategory::Other,
        None => category,
    }
}

/// 对原始联系人分类，输入顺序决定同一分类的归属
///
/// 输出中具名分类与 `other` 的联系人总数等于输入数量。
pub fn categorize_contacts(domain: &str, contacts: Vec<RawContact>) -> EnrichmentResult {
    let mut result = EnrichmentResult::empty(domain);

    for raw in contacts {
        let category = resolve_category(&result, &raw.email);
        match result.slot_mut(category) {
            Some(slot) => *slot = Some(ContactRecord::from_raw(category, raw)),
            None => result
                .other
                .push(ContactRecord::from_raw(ContactCategory::Other, raw)),
        }
    }

    result
}
