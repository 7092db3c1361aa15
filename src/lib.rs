//! Mirante: configuration-driven read-only REST query endpoints over PostgreSQL.
//!
//! A static [`ResourceConfig`] (backing table, column projection, filter
//! parameter mapping, date semantics, ordering, limits, response headers)
//! becomes one mounted GET endpoint: query parameters are parsed into a
//! declarative [`QueryIntent`], translated into a single parameterized
//! SELECT, executed against an injected pool, and returned as a JSON array.

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;

pub use config::{
    load_resources, resolve, DateColumnType, MapParam, OrderRule, ResolvedResource, ResourceConfig,
    ResourceEntry,
};
pub use error::{AppError, ConfigError};
pub use query::QueryIntent;
pub use routes::{api_routes, common_routes, ResourceEndpoint};
pub use state::ResourceState;
