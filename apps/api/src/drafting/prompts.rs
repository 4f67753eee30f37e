// Email Drafter prompt template.

/// Replace `{career_goals}` and `{action_items}` before sending.
pub const EMAIL_PROMPT_TEMPLATE: &str = r#"Using the following session summary, write a warm and friendly follow-up email to the student.
Make sure the tone is encouraging and clear. Include a greeting, recap, and next steps.

Career Goals: {career_goals}
Action Items: {action_items}

End with a kind closing, signed by "Your Career Counselor".
"#;

/// Lists are rendered as JSON arrays so every item appears verbatim.
pub fn build_email_prompt(career_goals: &[String], action_items: &[String]) -> String {
    EMAIL_PROMPT_TEMPLATE
        .replace("{career_goals}", &render_list(career_goals))
        .replace("{action_items}", &render_list(action_items))
}

fn render_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| items.join(", "))
}
