//! Domain core of the ML dashboard client.
//!
//! Strongly shaped entities normalized from the ML API's JSON payloads,
//! the derived metrics shown on every view, the train/validation/test
//! ratio balancer and the display formatters. Nothing in this crate does
//! I/O.

pub mod dataset;
pub mod endpoints;
pub mod error;
pub mod messages;
pub mod metrics;
pub mod model;
pub mod normalize;
pub mod preprocessing;
pub mod render;
pub mod spam;
pub mod split;
pub mod types;

pub use error::CoreError;
