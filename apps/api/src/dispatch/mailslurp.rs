//! MailSlurp REST client: throwaway inbox creation and plain-text sending.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;

use super::{DispatchError, EmailService, Inbox, SendEmailOptions};

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InboxDto {
    id: String,
    email_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

#[derive(Clone)]
pub struct MailSlurpClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl MailSlurpClient {
    pub fn new(api_key: String, api_base: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn inboxes_url(&self) -> String {
        format!("{}/inboxes", self.api_base)
    }

    fn send_url(&self, inbox_id: &str) -> String {
        format!("{}/inboxes/{}", self.api_base, inbox_id)
    }
}

/// Turns a non-2xx response into `DispatchError::Api`, keeping the service's message.
async fn check_status(response: Response) -> Result<Response, DispatchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or(body);
    Err(DispatchError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl EmailService for MailSlurpClient {
    async fn create_inbox(&self) -> Result<Inbox, DispatchError> {
        let response = self
            .client
            .post(self.inboxes_url())
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;
        let dto: InboxDto = check_status(response).await?.json().await?;
        debug!("Created inbox {}", dto.id);
        Ok(Inbox {
            id: dto.id,
            email_address: dto.email_address,
        })
    }

    async fn send_email(
        &self,
        inbox_id: &str,
        options: &SendEmailOptions,
    ) -> Result<(), DispatchError> {
        let response = self
            .client
            .post(self.send_url(inbox_id))
            .header(API_KEY_HEADER, &self.api_key)
            .json(options)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_built_from_base() {
        let client = MailSlurpClient::new("k".to_string(), "https://api.mailslurp.com/".to_string());
        assert_eq!(client.inboxes_url(), "https://api.mailslurp.com/inboxes");
        assert_eq!(
            client.send_url("abc-123"),
            "https://api.mailslurp.com/inboxes/abc-123"
        );
    }

    #[test]
    fn test_inbox_dto_reads_camel_case() {
        let dto: InboxDto = serde_json::from_str(
            r#"{"id": "123", "emailAddress": "123@mailslurp.com", "createdAt": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(dto.id, "123");
        assert_eq!(dto.email_address.as_deref(), Some("123@mailslurp.com"));
    }
}
