//! egui front end for the capture widget.
/// Bridges the capture core and collaborator to the UI.
pub mod controller;
/// UI state read by the renderer.
pub mod state;
/// egui renderer.
pub mod ui;
