//! HTTP side of the ML dashboard.
//!
//! [`api::MlApi`] talks to the ML API, [`batch::fetch_batch`] runs a
//! view's requests concurrently and [`views`] holds one controller per
//! screen, each owning its own state.

pub mod api;
pub mod batch;
pub mod config;
pub mod views;

pub use api::{ApiError, MlApi};
pub use config::{ClientConfig, ConfigError};
