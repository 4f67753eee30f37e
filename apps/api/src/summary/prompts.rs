// Summary Extractor prompt template.

/// Replace `{chat_transcript}` before sending.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"You are a helpful assistant. From the chat transcript below, extract:
1. The student's career goals.
2. The main action items discussed.

Provide the output in valid JSON with keys:
- "career_goals" (a list of strings)
- "action_items" (a list of strings)

Chat Transcript:
{chat_transcript}
"#;

pub fn build_summary_prompt(transcript: &str) -> String {
    SUMMARY_PROMPT_TEMPLATE.replace("{chat_transcript}", transcript)
}
