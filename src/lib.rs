//! Library exports for the binary, benchmarks and tests.
/// Grid capture core: bitmap, training batch, pointer protocol.
pub mod capture;
/// Wire schemas and HTTP exchange with the trainer/predictor.
pub mod collaborator;
/// Persisted settings.
pub mod config;
/// Application directory resolution.
pub mod app_dirs;
/// Tracing subscriber setup.
pub mod logging;
/// Shared egui UI modules.
pub mod egui_app;

mod http_client;
