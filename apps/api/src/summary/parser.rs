//! Two-stage parse of the extractor's free-form reply, followed by schema validation.
//!
//! Stage 1 parses the whole reply. Stage 2 takes the greedy span from the first
//! `{` to the last `}` and parses that. Nested objects survive stage 2 intact;
//! two sibling objects do not, because the span then covers both plus whatever
//! sits between them.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use super::Summary;

static JSON_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("JSON block pattern is valid"));

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Could not extract JSON block from output.")]
    NoJsonBlock { raw_output: String },

    #[error("Still unable to parse extracted JSON: {reason}")]
    InvalidRecoveredJson { reason: String, raw_output: String },
}

impl ParseError {
    pub fn raw_output(&self) -> &str {
        match self {
            ParseError::NoJsonBlock { raw_output }
            | ParseError::InvalidRecoveredJson { raw_output, .. } => raw_output,
        }
    }
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Summary must be a JSON object")]
    NotAnObject { raw_output: String },

    #[error("Summary is missing required key '{key}'")]
    MissingKey {
        key: &'static str,
        raw_output: String,
    },

    #[error("Summary key '{key}' must be a list of strings")]
    WrongType {
        key: &'static str,
        raw_output: String,
    },
}

impl SchemaError {
    pub fn raw_output(&self) -> &str {
        match self {
            SchemaError::NotAnObject { raw_output }
            | SchemaError::MissingKey { raw_output, .. }
            | SchemaError::WrongType { raw_output, .. } => raw_output,
        }
    }
}

#[derive(Debug, Error)]
pub enum SummaryParseError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Greedy first-`{`-to-last-`}` span, if the text has one.
pub fn extract_json_block(text: &str) -> Option<&str> {
    JSON_BLOCK.find(text).map(|m| m.as_str())
}

/// A parsed reply, and whether it took the brace-span recovery to get it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReply {
    pub value: Value,
    pub recovered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSummary {
    pub summary: Summary,
    pub recovered: bool,
}

/// Strict parse of the whole reply, then one recovery attempt on the brace span.
pub fn parse_json_reply(raw: &str) -> Result<ParsedReply, ParseError> {
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        return Ok(ParsedReply {
            value,
            recovered: false,
        });
    }

    warn!("Failed to parse summary output. Attempting to fix...");

    let block = extract_json_block(raw).ok_or_else(|| ParseError::NoJsonBlock {
        raw_output: raw.to_string(),
    })?;

    let value =
        serde_json::from_str::<Value>(block).map_err(|e| ParseError::InvalidRecoveredJson {
            reason: e.to_string(),
            raw_output: raw.to_string(),
        })?;
    Ok(ParsedReply {
        value,
        recovered: true,
    })
}

/// Checks that `value` has both required keys holding lists of strings.
/// Extra keys are ignored.
pub fn validate_summary(value: &Value, raw: &str) -> Result<Summary, SchemaError> {
    let object = value.as_object().ok_or_else(|| SchemaError::NotAnObject {
        raw_output: raw.to_string(),
    })?;

    let string_list = |key: &'static str| -> Result<Vec<String>, SchemaError> {
        let field = object.get(key).ok_or_else(|| SchemaError::MissingKey {
            key,
            raw_output: raw.to_string(),
        })?;
        let wrong_type = || SchemaError::WrongType {
            key,
            raw_output: raw.to_string(),
        };
        field
            .as_array()
            .ok_or_else(wrong_type)?
            .iter()
            .map(|item| item.as_str().map(String::from).ok_or_else(wrong_type))
            .collect()
    };

    Ok(Summary {
        career_goals: string_list("career_goals")?,
        action_items: string_list("action_items")?,
    })
}

/// Full pipeline from raw LLM text to a validated `Summary`.
pub fn parse_summary(raw: &str) -> Result<ParsedSummary, SummaryParseError> {
    let reply = parse_json_reply(raw)?;
    Ok(ParsedSummary {
        summary: validate_summary(&reply.value, raw)?,
        recovered: reply.recovered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_json_round_trips_exactly() {
        let raw = r#"{"career_goals": ["Become a data analyst", "Learn SQL"], "action_items": ["Update resume"]}"#;
        let summary = parse_summary(raw).unwrap().summary;
        assert_eq!(
            summary.career_goals,
            vec!["Become a data analyst", "Learn SQL"]
        );
        assert_eq!(summary.action_items, vec!["Update resume"]);
        assert!(!parse_summary(raw).unwrap().recovered);
    }

    #[test]
    fn test_prose_wrapped_json_is_recovered() {
        let raw = "Sure! Here is the summary:\n\n{\n  \"career_goals\": [\"UX designer\"],\n  \"action_items\": [\"Build a portfolio\", \"Email mentor\"]\n}\n\nLet me know if you need anything else.";
        let summary = parse_summary(raw).unwrap().summary;
        assert_eq!(summary.career_goals, vec!["UX designer"]);
        assert_eq!(summary.action_items, vec!["Build a portfolio", "Email mentor"]);
        assert!(parse_summary(raw).unwrap().recovered);
    }

    #[test]
    fn test_fenced_json_is_recovered() {
        let raw = "```json\n{\"career_goals\": [\"Nurse\"], \"action_items\": []}\n```";
        let summary = parse_summary(raw).unwrap().summary;
        assert_eq!(summary.career_goals, vec!["Nurse"]);
        assert!(summary.action_items.is_empty());
    }

    #[test]
    fn test_no_brace_block_fails_with_raw_output() {
        let raw = "I could not find any goals in this transcript.";
        let err = parse_json_reply(raw).unwrap_err();
        assert!(matches!(err, ParseError::NoJsonBlock { .. }));
        assert_eq!(err.raw_output(), raw);
    }

    #[test]
    fn test_unparseable_block_fails_with_raw_output() {
        let raw = "Result: {career_goals: [teacher]}";
        let err = parse_json_reply(raw).unwrap_err();
        assert!(matches!(err, ParseError::InvalidRecoveredJson { .. }));
        assert_eq!(err.raw_output(), raw);
        assert!(err.to_string().starts_with("Still unable to parse extracted JSON"));
    }

    #[test]
    fn test_nested_braces_are_kept_whole() {
        let raw = r#"Output: {"career_goals": ["Engineer"], "action_items": ["Apply"], "meta": {"confidence": {"score": 1}}} done"#;
        let block = extract_json_block(raw).unwrap();
        assert!(block.starts_with(r#"{"career_goals""#));
        assert!(block.ends_with("}}}"));
        let summary = parse_summary(raw).unwrap().summary;
        assert_eq!(summary.career_goals, vec!["Engineer"]);
    }

    #[test]
    fn test_multiple_blocks_span_first_open_to_last_close() {
        let raw = r#"First {"career_goals": ["A"], "action_items": []} and second {"career_goals": ["B"], "action_items": []}"#;
        let block = extract_json_block(raw).unwrap();
        assert!(block.contains(r#"["A"]"#));
        assert!(block.contains(r#"["B"]"#));
        // The combined span is not a single JSON value.
        assert!(matches!(
            parse_json_reply(raw),
            Err(ParseError::InvalidRecoveredJson { .. })
        ));
    }

    #[test]
    fn test_block_spans_newlines() {
        let raw = "pre {\n\"a\": 1\n} post";
        assert_eq!(extract_json_block(raw), Some("{\n\"a\": 1\n}"));
    }

    #[test]
    fn test_missing_key_is_schema_error() {
        let err = parse_summary(r#"{"career_goals": ["Chef"]}"#).unwrap_err();
        match err {
            SummaryParseError::Schema(SchemaError::MissingKey { key, .. }) => {
                assert_eq!(key, "action_items")
            }
            other => panic!("expected MissingKey, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_type_is_schema_error() {
        let err =
            parse_summary(r#"{"career_goals": "Chef", "action_items": []}"#).unwrap_err();
        assert!(matches!(
            err,
            SummaryParseError::Schema(SchemaError::WrongType {
                key: "career_goals",
                ..
            })
        ));

        let err =
            parse_summary(r#"{"career_goals": ["Chef"], "action_items": [1, 2]}"#).unwrap_err();
        assert!(matches!(
            err,
            SummaryParseError::Schema(SchemaError::WrongType {
                key: "action_items",
                ..
            })
        ));
    }

    #[test]
    fn test_non_object_json_is_schema_error() {
        let err = parse_summary(r#"["career_goals", "action_items"]"#).unwrap_err();
        assert!(matches!(
            err,
            SummaryParseError::Schema(SchemaError::NotAnObject { .. })
        ));
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let raw = r#"{"career_goals": [], "action_items": ["Call back"], "notes": "n/a"}"#;
        let summary = parse_summary(raw).unwrap().summary;
        assert_eq!(summary.action_items, vec!["Call back"]);
    }
}
