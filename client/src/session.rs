//! Analysis session state machine: Idle -> Loading -> {Success, Error} -> Idle.

use std::time::Instant;

use market_lens_core::AnalyzeReply;
use thiserror::Error;
use tracing::{info, warn};

use crate::render::AnalysisView;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Loading { company_name: String },
    Success(Box<AnalysisView>),
    Error { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Validation,
    Error,
    Success,
}

/// Dismissible notification shown above the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("an analysis is already in progress")]
    Busy,
    #[error("please enter a company name")]
    BlankName,
    #[error("no analysis in progress")]
    NotLoading,
}

/// What a finished request produced, for analytics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub company_name: String,
    pub elapsed_ms: u64,
    pub success: bool,
}

pub struct Session {
    state: SessionState,
    toast: Option<Toast>,
    started: Option<Instant>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            toast: None,
            started: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading { .. })
    }

    /// Move to Loading for `raw_name`. Returns the trimmed name to request.
    pub fn submit(&mut self, raw_name: &str) -> Result<String, SessionError> {
        if self.is_loading() {
            return Err(SessionError::Busy);
        }

        let company_name = raw_name.trim();
        if company_name.is_empty() {
            self.toast = Some(Toast {
                kind: ToastKind::Validation,
                message: "Please enter a company name".to_string(),
            });
            return Err(SessionError::BlankName);
        }

        self.toast = None;
        self.started = Some(Instant::now());
        self.state = SessionState::Loading {
            company_name: company_name.to_string(),
        };
        Ok(company_name.to_string())
    }

    /// Settle the in-flight request with the proxy's reply or a transport error.
    pub fn complete(
        &mut self,
        outcome: anyhow::Result<AnalyzeReply>,
    ) -> Result<Completion, SessionError> {
        let SessionState::Loading { company_name } = &self.state else {
            return Err(SessionError::NotLoading);
        };
        let company_name = company_name.clone();
        let elapsed_ms = self
            .started
            .take()
            .map_or(0, |t| t.elapsed().as_millis() as u64);

        let success = match outcome {
            Ok(AnalyzeReply::Analysis(resp)) => {
                info!(
                    "Analysis for {company_name} ready in {elapsed_ms}ms ({} sections)",
                    resp.analysis.len()
                );
                self.state = SessionState::Success(Box::new(AnalysisView::build(&company_name, resp)));
                self.toast = Some(Toast {
                    kind: ToastKind::Success,
                    message: format!("Analysis for {company_name} complete"),
                });
                true
            }
            Ok(AnalyzeReply::Error(body)) => {
                let message = match body.details {
                    Some(details) => format!("{}: {details}", body.error),
                    None => body.error,
                };
                warn!("Proxy returned an error for {company_name}: {message}");
                self.fail(message);
                false
            }
            Err(e) => {
                warn!("Analysis request for {company_name} failed: {e:#}");
                self.fail(format!("Failed to analyze {company_name}. Please try again."));
                false
            }
        };

        Ok(Completion {
            company_name,
            elapsed_ms,
            success,
        })
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    /// Back to Idle from any state.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.toast = None;
        self.started = None;
    }

    fn fail(&mut self, message: String) {
        self.toast = Some(Toast {
            kind: ToastKind::Error,
            message: message.clone(),
        });
        self.state = SessionState::Error { message };
    }
}
