use std::{
    sync::{
        Arc,
        mpsc::{Receiver, Sender, TryRecvError},
    },
    thread,
};

use tracing::{debug, error};

use crate::collaborator::{
    Collaborator, CollaboratorReply, CollaboratorRequest, ExchangeError, RequestKind,
};

/// Completion of one exchange, delivered back to the UI thread.
#[derive(Debug)]
pub(crate) struct ExchangeFinished {
    pub(crate) kind: RequestKind,
    pub(crate) result: Result<CollaboratorReply, ExchangeError>,
}

/// Worker threads for collaborator exchanges and the channel they report on.
pub(crate) struct ControllerJobs {
    message_tx: Sender<ExchangeFinished>,
    message_rx: Receiver<ExchangeFinished>,
    in_flight: usize,
    repaint: Option<egui::Context>,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel();
        Self {
            message_tx,
            message_rx,
            in_flight: 0,
            repaint: None,
        }
    }

    /// Wake the UI when a worker finishes, even if the pointer is idle.
    pub(super) fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    pub(super) fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Run one exchange on its own thread. Exactly one message comes back for it.
    pub(super) fn begin_exchange(
        &mut self,
        collaborator: Arc<dyn Collaborator>,
        request: CollaboratorRequest,
    ) {
        let kind = request.kind();
        let tx = self.message_tx.clone();
        let repaint = self.repaint.clone();
        self.in_flight += 1;
        let spawned = thread::Builder::new()
            .name(format!("digitpad-{}", kind.as_str()))
            .spawn(move || {
                let result = collaborator.exchange(&request);
                let _ = tx.send(ExchangeFinished { kind, result });
                if let Some(ctx) = repaint {
                    ctx.request_repaint();
                }
            });
        if let Err(err) = spawned {
            error!("Failed to start {} exchange: {err}", kind.as_str());
            let _ = self.message_tx.send(ExchangeFinished {
                kind,
                result: Err(ExchangeError::Unreachable(err.to_string())),
            });
        } else {
            debug!("Started {} exchange ({} in flight)", kind.as_str(), self.in_flight);
        }
    }

    pub(super) fn try_recv_message(&mut self) -> Result<ExchangeFinished, TryRecvError> {
        let message = self.message_rx.try_recv()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Ok(message)
    }
}
