//! Summary Extractor — pulls career goals and action items out of a transcript.

pub mod parser;
pub mod prompts;

use serde::{Deserialize, Serialize};
use tracing::info;

pub use parser::{ParseError, ParsedSummary, SchemaError, SummaryParseError};

use crate::errors::AppError;
use crate::llm_client::CompletionModel;
use crate::summary::parser::parse_summary;
use crate::summary::prompts::build_summary_prompt;

/// Structured extraction of a counseling session. Both lists keep the order
/// the model produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub career_goals: Vec<String>,
    pub action_items: Vec<String>,
}

impl From<SummaryParseError> for AppError {
    fn from(err: SummaryParseError) -> Self {
        match err {
            SummaryParseError::Parse(e) => AppError::Parse(e),
            SummaryParseError::Schema(e) => AppError::Schema(e),
        }
    }
}

/// Sends the (already trimmed) transcript to the LLM and parses the reply.
/// `recovered` is set when the reply needed the brace-span fallback.
pub async fn extract_summary(
    transcript: &str,
    llm: &dyn CompletionModel,
) -> Result<ParsedSummary, AppError> {
    let prompt = build_summary_prompt(transcript);
    let raw = llm
        .complete(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Summary extraction failed: {e}")))?;

    let parsed = parse_summary(&raw)?;
    info!(
        "Summary extracted: {} career goals, {} action items (recovered: {})",
        parsed.summary.career_goals.len(),
        parsed.summary.action_items.len(),
        parsed.recovered
    );
    Ok(parsed)
}
