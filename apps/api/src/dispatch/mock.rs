//! Mock send — builds the would-be message and renders it as RFC 5322 text.
//!
//! The recipient is written as a raw header value, so anything the page
//! accepts renders. Only a value that would break out of its header line fails.

use lettre::message::header::{
    self, ContentType, HeaderName, HeaderValue, Headers, Subject,
};
use lettre::message::Body;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use super::FOLLOWUP_SUBJECT;
use crate::drafting::DraftEmail;

pub const MOCK_SENDER: &str = "noreply@mockdomain.com";

#[derive(Debug, Error)]
pub enum MockRenderError {
    #[error("header '{field}' cannot contain a line break: {value:?}")]
    HeaderInjection { field: &'static str, value: String },
}

/// In-memory message produced by a mock send. Nothing leaves the process.
#[derive(Debug, Clone, Serialize)]
pub struct MockMessage {
    pub subject: String,
    pub from: String,
    pub to: String,
    pub body: String,
    pub rendered: String,
}

fn raw_header(field: &'static str, value: &str) -> Result<HeaderValue, MockRenderError> {
    if value.contains(['\r', '\n']) {
        return Err(MockRenderError::HeaderInjection {
            field,
            value: value.to_string(),
        });
    }
    Ok(HeaderValue::new(
        HeaderName::new_from_ascii_str(field),
        value.to_string(),
    ))
}

pub fn mock_send(
    draft: &DraftEmail,
    recipient: &str,
    student_name: Option<&str>,
) -> Result<MockMessage, MockRenderError> {
    let body = draft.personalized(student_name);

    let mut headers = Headers::new();
    headers.insert_raw(raw_header("From", MOCK_SENDER)?);
    headers.insert_raw(raw_header("To", recipient)?);
    headers.set(Subject::from(FOLLOWUP_SUBJECT.to_string()));
    headers.set(header::MIME_VERSION_1_0);
    headers.set(ContentType::TEXT_PLAIN);

    let encoded = Body::new(body.clone());
    headers.set(encoded.encoding());

    let rendered = format!("{headers}\r\n{}", String::from_utf8_lossy(encoded.as_ref()));
    info!("[Mock] Sending to {recipient}");

    Ok(MockMessage {
        subject: FOLLOWUP_SUBJECT.to_string(),
        from: MOCK_SENDER.to_string(),
        to: recipient.to_string(),
        body,
        rendered,
    })
}
