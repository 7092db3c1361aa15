//! Per-endpoint shared state: the pool and the resolved resource descriptor.

use crate::config::ResolvedResource;
use sqlx::PgPool;
use std::sync::Arc;

/// Cloned into every request for one mounted resource. The descriptor is
/// read-only after construction, so requests never synchronize.
#[derive(Clone)]
pub struct ResourceState {
    pub pool: PgPool,
    pub resource: Arc<ResolvedResource>,
}
