//! Generation pipeline: transcript → summary → draft, with every input passed explicitly.

use tracing::info;

use crate::drafting::{draft_email, DraftEmail};
use crate::errors::AppError;
use crate::llm_client::CompletionModel;
use crate::summary::{extract_summary, Summary};
use crate::transcript::{trim_transcript, validate_transcript};

#[derive(Debug, Clone)]
pub struct GeneratedFollowup {
    pub summary: Summary,
    pub draft: DraftEmail,
    /// The summary reply needed the brace-span fallback to parse.
    pub summary_recovered: bool,
}

/// Runs extraction then drafting. Stops at the first failure.
pub async fn generate_followup(
    transcript: &str,
    llm: &dyn CompletionModel,
) -> Result<GeneratedFollowup, AppError> {
    let transcript = validate_transcript(transcript)?;
    let trimmed = trim_transcript(transcript);
    info!(
        "Analyzing transcript ({} of {} chars)",
        trimmed.chars().count(),
        transcript.chars().count()
    );

    let parsed = extract_summary(trimmed, llm).await?;
    let draft = draft_email(&parsed.summary, llm).await?;

    Ok(GeneratedFollowup {
        summary: parsed.summary,
        draft,
        summary_recovered: parsed.recovered,
    })
}
