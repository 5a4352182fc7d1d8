//! Boundary to the remote trainer/predictor service.
//!
//! Requests and replies are explicit tagged schemas; anything the service
//! sends back is validated here before the controller sees it.

mod client;
mod wire;

pub use client::{Collaborator, ExchangeError, HttpCollaborator};
pub use wire::{CollaboratorReply, CollaboratorRequest, PredictRequest, RequestKind, TrainRequest};
