//! Hunter.io domain search 客户端

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::config::ContactsConfig;
use crate::contacts::ContactLookup;
use crate::errors::{ResearchError, Result};
use crate::types::RawContact;

#[derive(Debug, Deserialize)]
struct DomainSearchResponse {
    data: Option<DomainSearchData>,
}

#[derive(Debug, Deserialize)]
struct DomainSearchData {
    #[serde(default)]
    emails: Option<Vec<HunterEmail>>,
}

#[derive(Debug, Deserialize)]
struct HunterEmail {
    value: Option<String>,
    position: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    department: Option<String>,
    confidence: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    id: Option<String>,
    details: Option<String>,
}

/// Hunter.io 联系人查询客户端
#[derive(Clone)]
pub struct HunterClient {
    http: reqwest::Client,
    config: ContactsConfig,
}

impl HunterClient {
    pub fn new(config: ContactsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/domain-search",
            self.config.api_base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ContactLookup for HunterClient {
    async fn find_contacts(&self, domain: &str) -> Result<Vec<RawContact>> {
        debug!(domain, "查询域名联系人");

        let limit = self.config.limit.to_string();
        let response = self
            .http
            .get(self.endpoint())
            .query(&[
                ("domain", domain),
                ("api_key", self.config.api_key.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(classify_failure(status, &body));
        }

        // 响应体无法解码时为校验错误
        let search = response.json::<DomainSearchResponse>().await?;
        Ok(search.into_contacts())
    }
}

/// 429 与 5xx 视为暂时性故障，其余 4xx 为不可重试的请求错误
fn classify_failure(status: StatusCode, body: &str) -> ResearchError {
    let details = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|resp| resp.errors.into_iter().next())
        .map(|detail| {
            format!(
                "{}: {}",
                detail.id.unwrap_or_else(|| "error".to_string()),
                detail.details.unwrap_or_default()
            )
        })
        .unwrap_or_else(|| status.to_string());

    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        ResearchError::unavailable(format!("contact lookup returned {}: {}", status, details))
    } else {
        ResearchError::validation(format!("contact lookup rejected request ({}): {}", status, details))
    }
}

impl DomainSearchResponse {
    /// 缺失 `data` 或 `emails` 视为“无数据”，没有邮箱地址的条目会被丢弃
    fn into_contacts(self) -> Vec<RawContact> {
        let emails = self.data.and_then(|data| data.emails).unwrap_or_default();

        emails
            .into_iter()
            .filter_map(|entry| {
                let email = entry.value?.trim().to_string();
                if email.is_empty() {
                    return None;
                }
                Some(RawContact {
                    email,
                    position: entry.position,
                    first_name: entry.first_name,
                    last_name: entry.last_name,
                    department: entry.department,
                    confidence: entry.confidence,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::llm::client::{GenerationRequest, TextGenerator};
    use crate::research::agents::ContactEnrichment;
    use crate::research::context::ResearchContext;
    use crate::types::ContactCategory;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn parse_domain_search(body: &str) -> serde_json::Result<Vec<RawContact>> {
        serde_json::from_str::<DomainSearchResponse>(body).map(DomainSearchResponse::into_contacts)
    }

    fn contacts_config(server: &MockServer) -> ContactsConfig {
        ContactsConfig {
            api_key: "hunter-test".to_string(),
            api_base_url: server.uri(),
            limit: 10,
            retry_attempts: 2,
            retry_delay_ms: 1,
            timeout_seconds: 5,
        }
    }

    struct NoText;

    #[async_trait]
    impl TextGenerator for NoText {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
            Err(ResearchError::unavailable("not used"))
        }
    }

    fn enrichment_context(server: &MockServer) -> ResearchContext {
        let config = Config {
            contacts: contacts_config(server),
            ..Default::default()
        };
        let client = HunterClient::new(config.contacts.clone());
        ResearchContext::with_services(config, Arc::new(NoText), Arc::new(client))
    }

    #[test]
    fn test_parse_full_response() {
        let body = r#"{
            "data": {
                "domain": "globex.com",
                "emails": [
                    {"value": "jane.ceo@globex.com", "type": "personal", "confidence": 94,
                     "first_name": "Jane", "last_name": "Doe", "position": "Chief Executive Officer",
                     "department": "executive"},
                    {"value": "info@globex.com", "type": "generic", "confidence": 80}
                ]
            },
            "meta": {"results": 2}
        }"#;

        let contacts = parse_domain_search(body).unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].email, "jane.ceo@globex.com");
        assert_eq!(
            contacts[0].position.as_deref(),
            Some("Chief Executive Officer")
        );
        assert_eq!(contacts[0].confidence, Some(94));
        assert_eq!(contacts[1].email, "info@globex.com");
        assert_eq!(contacts[1].position, None);
    }

    #[test]
    fn test_parse_no_data() {
        assert!(parse_domain_search(r#"{"meta": {}}"#).unwrap().is_empty());
        assert!(parse_domain_search(r#"{"data": {"domain": "x.com"}}"#)
            .unwrap()
            .is_empty());
        assert!(parse_domain_search(r#"{"data": null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_entries_without_email_are_dropped() {
        let body = r#"{"data": {"emails": [{"position": "CEO"}, {"value": "  "}, {"value": "a@b.com"}]}}"#;
        let contacts = parse_domain_search(body).unwrap();
        assert_eq!(contacts, vec![RawContact::new("a@b.com")]);
    }

    #[tokio::test]
    async fn test_find_contacts_sends_query_and_parses_emails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/domain-search"))
            .and(query_param("domain", "www.globex.com"))
            .and(query_param("api_key", "hunter-test"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "domain": "globex.com",
                    "emails": [
                        {"value": "jane.ceo@globex.com", "position": "CEO", "confidence": 91},
                        {"value": "info@globex.com"}
                    ]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HunterClient::new(contacts_config(&server));
        let contacts = client.find_contacts("www.globex.com").await.unwrap();

        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].email, "jane.ceo@globex.com");
        assert_eq!(contacts[0].position.as_deref(), Some("CEO"));
        assert_eq!(contacts[0].confidence, Some(91));
    }

    #[tokio::test]
    async fn test_find_contacts_with_null_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/domain-search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
            .mount(&server)
            .await;

        let client = HunterClient::new(contacts_config(&server));
        assert!(client.find_contacts("www.globex.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_contacts_malformed_body_is_validation_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/domain-search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let client = HunterClient::new(contacts_config(&server));
        let result = client.find_contacts("www.globex.com").await;
        assert!(matches!(result, Err(ResearchError::Validation(_))));
    }

    #[tokio::test]
    async fn test_server_error_is_retried_by_enrichment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/domain-search"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/domain-search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"emails": [{"value": "cfo@globex.com"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let context = enrichment_context(&server);
        let result = ContactEnrichment
            .execute(&context, "www.globex.com")
            .await
            .unwrap();

        assert_eq!(
            result.get(ContactCategory::Cfo).map(|r| r.email.as_str()),
            Some("cfo@globex.com")
        );
    }

    #[tokio::test]
    async fn test_unauthorized_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/domain-search"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "errors": [{"id": "authentication_failed", "details": "No user found for the API key supplied"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let context = enrichment_context(&server);
        let result = ContactEnrichment.execute(&context, "www.globex.com").await;

        match result {
            Err(ResearchError::Validation(message)) => {
                assert!(message.contains("authentication_failed"))
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_failure() {
        let body = r#"{"errors": [{"id": "wrong_params", "code": 400, "details": "domain is invalid"}]}"#;
        let err = classify_failure(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, ResearchError::Validation(_)));
        assert!(err.to_string().contains("domain is invalid"));

        assert!(classify_failure(StatusCode::TOO_MANY_REQUESTS, "").is_transient());
        assert!(classify_failure(StatusCode::BAD_GATEWAY, "").is_transient());
        assert!(!classify_failure(StatusCode::UNAUTHORIZED, "").is_transient());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = HunterClient::new(ContactsConfig {
            api_base_url: "https://api.hunter.io/v2/".to_string(),
            ..Default::default()
        });
        assert_eq!(client.endpoint(), "https://api.hunter.io/v2/domain-search");
    }
}
