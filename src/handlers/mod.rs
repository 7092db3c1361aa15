//! HTTP handlers for resource list endpoints.

pub mod resource;
pub use resource::*;
