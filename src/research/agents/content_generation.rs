use chrono::Utc;
use tracing::info;

use crate::errors::{ResearchError, Result};
use crate::llm::client::GenerationRequest;
use crate::research::agents::PromptTemplate;
use crate::research::context::ResearchContext;
use crate::types::{OutreachDraft, ResearchRequest};
use crate::utils::retry::retry_with_backoff;

/// 外联邮件撰写员 - 只依赖收件品牌、行业与外联目标，不依赖联系人结果
#[derive(Default)]
pub struct ContentGeneration;

impl ContentGeneration {
    pub const NAME: &'static str = "content_generation";

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: "You are a professional email writer, crafting personalized outreach emails for business collaborations.".to_string(),
            opening_instruction: "Create a professional outreach email with the following details:".to_string(),
            closing_instruction: "The email should be concise, friendly, and tailored to the recipient company. Return only the email, starting with a subject line.".to_string(),
        }
    }

    pub fn build_request(
        &self,
        request: &ResearchRequest,
        recipient_brand: &str,
        industry: &str,
    ) -> GenerationRequest {
        let template = self.prompt_template();
        let sender = &request.sender;

        let mut prompt = String::new();
        prompt.push_str(&template.opening_instruction);
        prompt.push('\n');
        prompt.push_str(&format!("- Sender's name: {}\n", sender.name));
        prompt.push_str(&format!("- Sender's company: {}\n", sender.brand));
        prompt.push_str(&format!("- Sender's position: {}\n", sender.role));
        prompt.push_str(&format!("- Sender's expertise: {}\n", sender.expertise));
        prompt.push_str(&format!("- Recipient company: {}\n", recipient_brand));
        prompt.push_str(&format!("- Recipient's industry: {}\n", industry));
        prompt.push_str(&format!("- Outreach goal: {}\n", request.outreach_goal));
        prompt.push_str(&format!("- Desired call to action: {}\n", request.call_to_action));
        prompt.push('\n');
        prompt.push_str(&template.closing_instruction);

        GenerationRequest::new(Self::NAME, template.system_prompt, prompt)
    }

    pub async fn execute(
        &self,
        context: &ResearchContext,
        request: &ResearchRequest,
        recipient_brand: &str,
        industry: &str,
    ) -> Result<OutreachDraft> {
        let generation = self.build_request(request, recipient_brand, industry);
        let policy = context.llm_policy();

        let content = retry_with_backoff(Self::NAME, &policy, || {
            context.text_generator.generate(&generation)
        })
        .await?;

        let content = content.trim();
        if content.is_empty() {
            return Err(ResearchError::validation("generated draft is empty"));
        }

        info!(recipient = recipient_brand, chars = content.len(), "外联邮件草稿已生成");
        Ok(OutreachDraft {
            recipient_brand: recipient_brand.to_string(),
            content: content.to_string(),
            generated_at: Utc::now(),
        })
    }
}
