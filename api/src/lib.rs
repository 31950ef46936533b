//! # AuthKit HTTP API
//!
//! Actix-web adapter over [`ak_core::AuthService`]. Library exports are used
//! by the binary and by the integration tests under `tests/`.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
