//! HTTP exchange with the collaborator service.

use tracing::{debug, warn};

use crate::http_client;

use super::wire::{self, CollaboratorReply, CollaboratorRequest};

const MAX_REPLY_BYTES: usize = 64 * 1024;

/// Failed exchange. The `Display` text is shown to the user as-is.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExchangeError {
    /// Non-2xx status with a `message` in the body.
    #[error("Server error: {message}")]
    Remote { status: u16, message: String },
    /// Non-2xx status without a readable message.
    #[error("Server error (status {0})")]
    Status(u16),
    /// No HTTP response at all.
    #[error("Network error: server unreachable")]
    Unreachable(String),
    /// 2xx status whose body could not be understood.
    #[error("Unreadable server reply: {0}")]
    InvalidReply(String),
}

/// Something that can carry a request to the trainer/predictor and return its reply.
///
/// Calls block; the controller runs each one on its own worker thread.
pub trait Collaborator: Send + Sync {
    fn exchange(&self, request: &CollaboratorRequest) -> Result<CollaboratorReply, ExchangeError>;
}

/// Collaborator reached with a JSON POST over HTTP.
#[derive(Clone, Debug)]
pub struct HttpCollaborator {
    endpoint: String,
}

impl HttpCollaborator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Collaborator for HttpCollaborator {
    fn exchange(&self, request: &CollaboratorRequest) -> Result<CollaboratorReply, ExchangeError> {
        let req = http_client::agent()
            .post(&self.endpoint)
            .set("Accept", "application/json")
            .set("Content-Type", "application/json");

        let response = match req.send_json(request) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = read_body_limited(response).unwrap_or_default();
                return Err(map_status_error(code, &body));
            }
            Err(ureq::Error::Transport(err)) => {
                warn!("Collaborator at {} unreachable: {err}", self.endpoint);
                return Err(ExchangeError::Unreachable(err.to_string()));
            }
        };

        let status = response.status();
        if !(200..300).contains(&status) {
            let body = read_body_limited(response).unwrap_or_default();
            return Err(map_status_error(status, &body));
        }
        let body = read_body_limited(response).map_err(ExchangeError::InvalidReply)?;
        debug!("Collaborator replied {status} with {} bytes", body.len());
        CollaboratorReply::parse(&body).map_err(ExchangeError::InvalidReply)
    }
}

fn map_status_error(code: u16, body: &str) -> ExchangeError {
    match wire::parse_error_message(body) {
        Some(message) => ExchangeError::Remote {
            status: code,
            message,
        },
        None => ExchangeError::Status(code),
    }
}

fn read_body_limited(response: ureq::Response) -> Result<String, String> {
    let bytes = http_client::read_response_bytes(response, MAX_REPLY_BYTES)
        .map_err(|err| err.to_string())?;
    String::from_utf8(bytes).map_err(|err| err.to_string())
}
