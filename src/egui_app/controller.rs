//! Bridges the capture core, the collaborator and the egui UI state.

mod jobs;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::capture::{GridCapture, PointerEvent, ValidationError};
use crate::collaborator::{
    Collaborator, CollaboratorReply, CollaboratorRequest, ExchangeError, HttpCollaborator,
    RequestKind,
};
use crate::config::AppConfig;
use crate::egui_app::state::{NoticeKind, StatusTone, UiState};

use jobs::{ControllerJobs, ExchangeFinished};

/// Owns the widget state and reacts to UI events.
///
/// All methods run on the UI thread; network exchanges happen on worker
/// threads and come back through [`EguiController::poll_background_jobs`].
pub struct EguiController {
    pub ui: UiState,
    capture: GridCapture,
    collaborator: Arc<dyn Collaborator>,
    jobs: ControllerJobs,
}

impl EguiController {
    pub fn new(collaborator: Arc<dyn Collaborator>) -> Self {
        Self {
            ui: UiState::default(),
            capture: GridCapture::new(),
            collaborator,
            jobs: ControllerJobs::new(),
        }
    }

    /// Controller talking HTTP to the endpoint named in `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let endpoint = config.collaborator.endpoint();
        info!("Collaborator endpoint: {endpoint}");
        Self::new(Arc::new(HttpCollaborator::new(endpoint)))
    }

    pub fn capture(&self) -> &GridCapture {
        &self.capture
    }

    /// Register the egui context so finished exchanges trigger a repaint.
    pub fn attach_repaint_context(&mut self, ctx: egui::Context) {
        self.jobs.set_repaint_context(ctx);
    }

    pub fn pointer_event(&mut self, event: PointerEvent) {
        self.capture.handle_pointer(event);
    }

    /// Clear the drawing surface.
    pub fn reset_canvas(&mut self) {
        self.capture.reset();
        debug!("Canvas reset");
    }

    /// Queue the drawing under the current label, flushing a full batch.
    pub fn train(&mut self) {
        let outcome = match self.capture.train(&self.ui.label_input) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.reject(err);
                return;
            }
        };
        self.ui.queued_samples = outcome.queued;
        match outcome.flush {
            Some(request) => {
                info!("Training batch full; sending to collaborator");
                self.dispatch(request);
                self.set_status("Sending training batch", StatusTone::Busy);
            }
            None => {
                info!(
                    "Queued sample labelled {} ({} pending)",
                    outcome.label, outcome.queued
                );
                self.set_status(
                    format!(
                        "Queued a {} ({}/{} samples)",
                        outcome.label,
                        outcome.queued,
                        crate::capture::BATCH_SIZE
                    ),
                    StatusTone::Info,
                );
            }
        }
    }

    /// Ask the collaborator to classify the drawing. The drawing stays visible.
    pub fn test(&mut self) {
        let request = match self.capture.test() {
            Ok(request) => request,
            Err(err) => {
                self.reject(err);
                return;
            }
        };
        info!(
            "Requesting prediction for {} painted cells",
            self.capture.bitmap().painted_count()
        );
        self.dispatch(request);
        self.set_status("Waiting for prediction", StatusTone::Busy);
    }

    /// Drain finished exchanges. Returns how many were handled.
    pub fn poll_background_jobs(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(message) = self.jobs.try_recv_message() {
            self.ui.in_flight = self.jobs.in_flight();
            self.handle_exchange_finished(message);
            handled += 1;
        }
        handled
    }

    /// Acknowledge the notice on screen.
    pub fn dismiss_notice(&mut self) {
        self.ui.notices.dismiss();
    }

    fn dispatch(&mut self, request: CollaboratorRequest) {
        self.jobs
            .begin_exchange(Arc::clone(&self.collaborator), request);
        self.ui.in_flight = self.jobs.in_flight();
    }

    fn reject(&mut self, err: ValidationError) {
        debug!("Action rejected: {err}");
        self.ui.notices.push(NoticeKind::Validation, err.to_string());
    }

    fn handle_exchange_finished(&mut self, message: ExchangeFinished) {
        let ExchangeFinished { kind, result } = message;
        match result {
            Ok(CollaboratorReply::Test { result }) => {
                info!("Prediction received: {result}");
                let text = format!("Prediction: {result}");
                self.set_status(text.clone(), StatusTone::Info);
                self.ui.notices.push(NoticeKind::Prediction, text);
            }
            Ok(CollaboratorReply::Train { status }) => {
                let status = status.unwrap_or_else(|| "ok".to_string());
                info!("Training batch acknowledged: {status}");
                self.set_status(
                    format!("Training batch accepted ({status})"),
                    StatusTone::Info,
                );
            }
            Ok(CollaboratorReply::Error { message }) => {
                warn!("Collaborator reported an error for {}: {message}", kind.as_str());
                self.fail(format!("Server error: {message}"));
            }
            Ok(CollaboratorReply::Other { kind: reply_kind }) => {
                debug!(
                    "Ignoring {} reply of type {:?}",
                    kind.as_str(),
                    reply_kind
                );
                self.set_status(idle_text(kind), StatusTone::Idle);
            }
            Err(err) => {
                log_exchange_error(kind, &err);
                self.fail(err.to_string());
            }
        }
    }

    fn fail(&mut self, text: String) {
        self.set_status(text.clone(), StatusTone::Error);
        self.ui.notices.push(NoticeKind::Failure, text);
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.set(text, tone);
    }
}

fn idle_text(kind: RequestKind) -> &'static str {
    match kind {
        RequestKind::Train => "Training batch sent",
        RequestKind::Predict => "Prediction request finished",
    }
}

fn log_exchange_error(kind: RequestKind, err: &ExchangeError) {
    match err {
        ExchangeError::Unreachable(detail) => {
            warn!("{} exchange failed: unreachable ({detail})", kind.as_str())
        }
        ExchangeError::InvalidReply(detail) => {
            warn!("{} exchange returned an unreadable reply: {detail}", kind.as_str())
        }
        other => warn!("{} exchange failed: {other}", kind.as_str()),
    }
}
