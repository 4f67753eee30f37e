//! Dispatcher — live send through the email service, or a local mock render.
//!
//! `EmailService` is the seam for the live path; `MailSlurpClient` is the
//! production backend. The mock path never touches the network.

pub mod mailslurp;
pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::drafting::DraftEmail;
use crate::errors::AppError;

pub const FOLLOWUP_SUBJECT: &str = "Your Career Counseling Follow-up";

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbox {
    pub id: String,
    pub email_address: Option<String>,
}

/// Body of the send-email call. Serialized in the email service's wire casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEmailOptions {
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
    #[serde(rename = "isHTML")]
    pub is_html: bool,
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn create_inbox(&self) -> Result<Inbox, DispatchError>;

    async fn send_email(&self, inbox_id: &str, options: &SendEmailOptions)
        -> Result<(), DispatchError>;
}

/// Outcome of a successful live send. Displayed, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct SendResult {
    pub recipient: String,
    pub inbox_id: String,
    pub sender: Option<String>,
    pub message: String,
}

/// Creates a fresh inbox and sends the draft from it as plain text.
pub async fn live_send(
    draft: &DraftEmail,
    recipient: &str,
    mailer: &dyn EmailService,
) -> Result<SendResult, AppError> {
    let recipient = recipient.trim();
    if recipient.is_empty() {
        return Err(AppError::Validation("recipient cannot be empty".to_string()));
    }

    let inbox = mailer.create_inbox().await?;
    let options = SendEmailOptions {
        to: vec![recipient.to_string()],
        subject: FOLLOWUP_SUBJECT.to_string(),
        body: draft.as_str().to_string(),
        is_html: false,
    };
    mailer.send_email(&inbox.id, &options).await?;

    info!("Follow-up sent to {recipient} from inbox {}", inbox.id);
    Ok(SendResult {
        recipient: recipient.to_string(),
        inbox_id: inbox.id,
        sender: inbox.email_address,
        message: format!("Email sent to {recipient} via MailSlurp!"),
    })
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Records every send; optionally fails inbox creation.
    #[derive(Default)]
    pub struct StubMailer {
        pub fail_with_status: Option<u16>,
        sent: Mutex<Vec<(String, SendEmailOptions)>>,
    }

    impl StubMailer {
        pub fn failing(status: u16) -> Self {
            Self {
                fail_with_status: Some(status),
                sent: Mutex::new(Vec::new()),
            }
        }

        pub fn sent(&self) -> Vec<(String, SendEmailOptions)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EmailService for StubMailer {
        async fn create_inbox(&self) -> Result<Inbox, DispatchError> {
            if let Some(status) = self.fail_with_status {
                return Err(DispatchError::Api {
                    status,
                    message: "Invalid API key".to_string(),
                });
            }
            Ok(Inbox {
                id: "inbox-1".to_string(),
                email_address: Some("inbox-1@mailslurp.com".to_string()),
            })
        }

        async fn send_email(
            &self,
            inbox_id: &str,
            options: &SendEmailOptions,
        ) -> Result<(), DispatchError> {
            self.sent
                .lock()
                .unwrap()
                .push((inbox_id.to_string(), options.clone()));
            Ok(())
        }
    }
}
