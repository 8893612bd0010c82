//! REST client for the car listing endpoints.
//!
//! Provides the [`CarApi`](api::CarApi) HTTP wrapper, the
//! [`ApiOutcome`](envelope::ApiOutcome) envelope every call resolves to,
//! the [`CarService`](service::CarService) seam the admin card is driven
//! through, and environment-based configuration.

pub mod api;
pub mod config;
pub mod envelope;
pub mod service;

pub use api::{CarApi, ClientError};
pub use envelope::ApiOutcome;
pub use service::CarService;
