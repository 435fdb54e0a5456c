use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// 联系人分类，每个原始邮箱只会落入其中一个
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContactCategory {
    Ceo,
    Cmo,
    Cfo,
    Marketing,
    Other,
}

impl ContactCategory {
    /// 每个分类最多只保留一条记录的分类
    pub const NAMED: [ContactCategory; 4] = [
        ContactCategory::Ceo,
        ContactCategory::Cmo,
        ContactCategory::Cfo,
        ContactCategory::Marketing,
    ];
}

impl Display for ContactCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactCategory::Ceo => write!(f, "ceo"),
            ContactCategory::Cmo => write!(f, "cmo"),
            ContactCategory::Cfo => write!(f, "cfo"),
            ContactCategory::Marketing => write!(f, "marketing"),
            ContactCategory::Other => write!(f, "other"),
        }
    }
}

/// 联系人查询服务返回的原始联系人
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct RawContact {
    pub email: String,
    pub position: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub department: Option<String>,
    /// 查询服务给出的置信度（0-100）
    pub confidence: Option<u32>,
}

impl RawContact {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }
}

/// 分类后的联系人
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ContactRecord {
    pub category: ContactCategory,
    pub email: String,
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u32>,
}

impl ContactRecord {
    pub fn from_raw(category: ContactCategory, raw: RawContact) -> Self {
        Self {
            category,
            email: raw.email,
            position: raw.position,
            first_name: raw.first_name,
            last_name: raw.last_name,
            department: raw.department,
            confidence: raw.confidence,
        }
    }

    /// 展示用的姓名，没有姓名时为空
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// 某个域名的联系人补全结果
///
/// 具名分类（ceo/cmo/cfo/marketing）各自最多一条记录，其余联系人都放在 `other` 中。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct EnrichmentResult {
    pub domain: String,
    pub ceo: Option<ContactRecord>,
    pub cmo: Option<ContactRecord>,
    pub cfo: Option<ContactRecord>,
    pub marketing: Option<ContactRecord>,
    pub other: Vec<ContactRecord>,
}

impl EnrichmentResult {
    pub fn empty(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Default::default()
        }
    }

    /// 获取具名分类下的联系人，`Other` 总是返回 None
    pub fn get(&self, category: ContactCategory) -> Option<&ContactRecord> {
        self.slot(category).and_then(|slot| slot.as_ref())
    }

    pub(crate) fn slot_mut(&mut self, category: ContactCategory) -> Option<&mut Option<ContactRecord>> {
        match category {
            ContactCategory::Ceo => Some(&mut self.ceo),
            ContactCategory::Cmo => Some(&mut self.cmo),
            ContactCategory::Cfo => Some(&mut self.cfo),
            ContactCategory::Marketing => Some(&mut self.marketing),
            ContactCategory::Other => None,
        }
    }

    fn slot(&self, category: ContactCategory) -> Option<&Option<ContactRecord>> {
        match category {
            ContactCategory::Ceo => Some(&self.ceo),
            ContactCategory::Cmo => Some(&self.cmo),
            ContactCategory::Cfo => Some(&self.cfo),
            ContactCategory::Marketing => Some(&self.marketing),
            ContactCategory::Other => None,
        }
    }

    /// 已填充的具名联系人，按分类顺序返回
    pub fn named(&self) -> impl Iterator<Item = &ContactRecord> {
        ContactCategory::NAMED
            .into_iter()
            .filter_map(move |category| self.get(category))
    }

    /// 联系人总数（具名分类 + other）
    pub fn total_contacts(&self) -> usize {
        self.named().count() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_contacts() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&ContactCategory::Marketing).unwrap();
        assert_eq!(json, "\"marketing\"");
        let parsed: ContactCategory = serde_json::from_str("\"cfo\"").unwrap();
        assert_eq!(parsed, ContactCategory::Cfo);
    }

    #[test]
    fn test_empty_enrichment() {
        let result = EnrichmentResult::empty("www.globex.com");
        assert_eq!(result.domain, "www.globex.com");
        assert!(result.is_empty());
        assert_eq!(result.get(ContactCategory::Other), None);
    }

    #[test]
    fn test_display_name() {
        let mut record = ContactRecord::from_raw(
            ContactCategory::Ceo,
            RawContact::new("jane@globex.com"),
        );
        assert_eq!(record.display_name(), None);

        record.first_name = Some("Jane".to_string());
        record.last_name = Some("Doe".to_string());
        assert_eq!(record.display_name(), Some("Jane Doe".to_string()));
    }
}
