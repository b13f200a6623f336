//! `SchoolHub` web layer
//!
//! A reqwest client for the REST backend, the two approval surfaces built on
//! it, and an axum portal service exposing the approval, admin-panel and
//! settings operations.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api_client;
pub mod backend;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;

// Re-export the main entry points
pub use api_client::ApiClient;
pub use backend::{AdminPanelBackend, RegistrationBlockBackend, Surface};
pub use extractors::JsonBody;
pub use server::{build_app, build_app_with_state};
pub use state::AppState;
