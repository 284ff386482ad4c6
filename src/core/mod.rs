// src/core/mod.rs
//! Service access: the backend seam, its HTTP implementation and call errors

pub mod backend;
pub mod error;
pub mod service_client;

pub use backend::AnalysisBackend;
pub use error::{CallError, CallResult};
pub use service_client::ServiceClient;
