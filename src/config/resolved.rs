//! Resolved resource: raw descriptor validated and defaulted once at
//! construction, never re-read per request.

use crate::config::types::{
    DateColumnType, MapParam, OrderRule, ResourceConfig, DEFAULT_CACHE_CONTROL, DEFAULT_CORS_ORIGIN,
    DEFAULT_LIMIT, DEFAULT_MAX_LIMIT,
};
use crate::config::validator::validate;
use crate::error::ConfigError;

/// Date filtering setup for one resource: which column, and whether it holds
/// timestamps (day-bounds ranges) or calendar dates (plain comparisons).
#[derive(Clone, Debug)]
pub struct DateFilterSpec {
    pub column: String,
    pub column_type: DateColumnType,
}

/// A descriptor with every optional field filled in. Construction is pure;
/// resolution failures are configuration bugs caught at mount time.
#[derive(Clone, Debug)]
pub struct ResolvedResource {
    pub table: String,
    pub select: String,
    pub date_filter: Option<DateFilterSpec>,
    pub default_order: Vec<OrderRule>,
    pub map_params: Vec<MapParam>,
    pub default_limit: u32,
    pub max_limit: u32,
    pub cache_control: String,
    pub cors_origin: String,
}

/// Validate a raw descriptor and apply defaults (call once per endpoint).
pub fn resolve(config: ResourceConfig) -> Result<ResolvedResource, ConfigError> {
    validate(&config)?;
    let date_filter = config.date_column.map(|column| DateFilterSpec {
        column,
        column_type: config.date_column_type,
    });
    Ok(ResolvedResource {
        table: config.table,
        select: config.select,
        date_filter,
        default_order: config.default_order,
        map_params: config.map_params,
        default_limit: config.default_limit.unwrap_or(DEFAULT_LIMIT),
        max_limit: config.max_limit.unwrap_or(DEFAULT_MAX_LIMIT),
        cache_control: config
            .cache_control
            .unwrap_or_else(|| DEFAULT_CACHE_CONTROL.into()),
        cors_origin: config
            .cors_origin
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_applies_documented_defaults() {
        let resource = resolve(ResourceConfig::new("opinions", "id, value")).unwrap();
        assert_eq!(resource.default_limit, 100_000);
        assert_eq!(resource.max_limit, 100_000);
        assert_eq!(resource.cache_control, "public, max-age=300");
        assert_eq!(resource.cors_origin, "*");
        assert!(resource.date_filter.is_none());
        assert!(resource.default_order.is_empty());
        assert!(resource.map_params.is_empty());
    }

    #[test]
    fn resolve_keeps_explicit_values() {
        let config = ResourceConfig::new("opinions", "id")
            .date_column("created_at", DateColumnType::Date)
            .limits(100, 500)
            .cache_control("no-store")
            .cors_origin("https://painel.example");
        let resource = resolve(config).unwrap();
        assert_eq!(resource.default_limit, 100);
        assert_eq!(resource.max_limit, 500);
        assert_eq!(resource.cache_control, "no-store");
        assert_eq!(resource.cors_origin, "https://painel.example");
        let date = resource.date_filter.unwrap();
        assert_eq!(date.column, "created_at");
        assert_eq!(date.column_type, DateColumnType::Date);
    }
}
