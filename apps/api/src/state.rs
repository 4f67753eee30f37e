use std::sync::Arc;

use crate::dispatch::EmailService;
use crate::followup::session::SessionStore;
use crate::llm_client::CompletionModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Chat-completion backend used for both extraction and drafting.
    pub llm: Arc<dyn CompletionModel>,
    /// Live-send backend. Default: MailSlurp.
    pub mailer: Arc<dyn EmailService>,
    pub sessions: SessionStore,
}
