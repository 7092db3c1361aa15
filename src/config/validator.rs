//! Descriptor validation: required fields, sane limits, no duplicate params.

use crate::config::types::ResourceConfig;
use crate::error::ConfigError;
use std::collections::HashSet;

pub fn validate(config: &ResourceConfig) -> Result<(), ConfigError> {
    let resource = if config.table.is_empty() {
        "<unnamed>"
    } else {
        config.table.as_str()
    };

    if config.table.trim().is_empty() {
        return Err(ConfigError::MissingField {
            resource: resource.into(),
            field: "table",
        });
    }
    if config.select.trim().is_empty() {
        return Err(ConfigError::MissingField {
            resource: resource.into(),
            field: "select",
        });
    }
    if let Some(col) = &config.date_column {
        if col.trim().is_empty() {
            return Err(ConfigError::Validation {
                resource: resource.into(),
                message: "date_column must not be empty when set".into(),
            });
        }
    }
    if let Some(max) = config.max_limit {
        if max == 0 {
            return Err(ConfigError::Validation {
                resource: resource.into(),
                message: "max_limit must be at least 1".into(),
            });
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for mp in &config.map_params {
        if mp.param.trim().is_empty() || mp.column.trim().is_empty() {
            return Err(ConfigError::Validation {
                resource: resource.into(),
                message: "map_params entries need a param and a column".into(),
            });
        }
        if !seen.insert(mp.param.as_str()) {
            return Err(ConfigError::DuplicateParam {
                resource: resource.into(),
                param: mp.param.clone(),
            });
        }
    }

    for rule in &config.default_order {
        if rule.column.trim().is_empty() {
            return Err(ConfigError::Validation {
                resource: resource.into(),
                message: "default_order columns must not be empty".into(),
            });
        }
    }

    Ok(())
}
