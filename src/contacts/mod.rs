//! 联系人查询服务

use async_trait::async_trait;

use crate::errors::Result;
use crate::types::RawContact;

pub mod hunter;

pub use hunter::HunterClient;

/// 按域名查询公开联系人的外部服务
#[async_trait]
pub trait ContactLookup: Send + Sync {
    /// 返回该域名下的原始联系人；服务明确表示无数据时返回空列表
    async fn find_contacts(&self, domain: &str) -> Result<Vec<RawContact>>;
}
