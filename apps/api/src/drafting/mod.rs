//! Email Drafter — turns a `Summary` into follow-up email prose.

pub mod prompts;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::drafting::prompts::build_email_prompt;
use crate::errors::AppError;
use crate::llm_client::CompletionModel;
use crate::summary::Summary;

/// Placeholder the model sometimes leaves in place of the student's name.
pub const STUDENT_NAME_PLACEHOLDER: &str = "[Student's Name]";
pub const DEFAULT_STUDENT_NAME: &str = "Student";

/// LLM-drafted email body. Accepted as-is; no structural checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftEmail(String);

impl DraftEmail {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Body with the name placeholder filled in, defaulting to "Student".
    pub fn personalized(&self, student_name: Option<&str>) -> String {
        let name = student_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_STUDENT_NAME);
        self.0.replace(STUDENT_NAME_PLACEHOLDER, name)
    }
}

pub async fn draft_email(summary: &Summary, llm: &dyn CompletionModel) -> Result<DraftEmail, AppError> {
    let prompt = build_email_prompt(&summary.career_goals, &summary.action_items);
    let text = llm
        .complete(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Email drafting failed: {e}")))?;

    info!("Drafted follow-up email ({} chars)", text.chars().count());
    Ok(DraftEmail::new(text))
}
