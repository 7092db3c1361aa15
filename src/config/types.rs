//! Raw resource descriptor types matching the JSON configuration shape.

use serde::{Deserialize, Serialize};

/// Row cap applied when the client sends no usable `limit`.
pub const DEFAULT_LIMIT: u32 = 100_000;
/// Hard ceiling on any requested `limit`.
pub const DEFAULT_MAX_LIMIT: u32 = 100_000;
pub const DEFAULT_CACHE_CONTROL: &str = "public, max-age=300";
pub const DEFAULT_CORS_ORIGIN: &str = "*";

/// Whether the configured date column holds a full timestamp or a calendar
/// date. Decides between day-bounds ranges and plain date comparisons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateColumnType {
    #[default]
    Timestamp,
    Date,
}

/// One sort rule. Earlier rules sort first; later rules break ties.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRule {
    pub column: String,
    #[serde(default = "default_true")]
    pub ascending: bool,
}

impl OrderRule {
    pub fn asc(column: impl Into<String>) -> Self {
        OrderRule {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        OrderRule {
            column: column.into(),
            ascending: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Declares that query parameter `param` (and `{param}_ilike`) filters on
/// backend column `column`. Declaration order is the filter application order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapParam {
    pub param: String,
    pub column: String,
}

impl MapParam {
    pub fn new(param: impl Into<String>, column: impl Into<String>) -> Self {
        MapParam {
            param: param.into(),
            column: column.into(),
        }
    }
}

/// Static descriptor for one read endpoint. `table` and `select` are
/// required; everything else falls back to the documented defaults when the
/// descriptor is resolved.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub table: String,
    /// Column projection expression, passed through to the SELECT verbatim.
    pub select: String,
    #[serde(default)]
    pub date_column: Option<String>,
    #[serde(default)]
    pub date_column_type: DateColumnType,
    #[serde(default)]
    pub default_order: Vec<OrderRule>,
    #[serde(default)]
    pub map_params: Vec<MapParam>,
    #[serde(default)]
    pub default_limit: Option<u32>,
    #[serde(default)]
    pub max_limit: Option<u32>,
    #[serde(default)]
    pub cache_control: Option<String>,
    #[serde(default)]
    pub cors_origin: Option<String>,
}

impl ResourceConfig {
    pub fn new(table: impl Into<String>, select: impl Into<String>) -> Self {
        ResourceConfig {
            table: table.into(),
            select: select.into(),
            date_column: None,
            date_column_type: DateColumnType::default(),
            default_order: Vec::new(),
            map_params: Vec::new(),
            default_limit: None,
            max_limit: None,
            cache_control: None,
            cors_origin: None,
        }
    }

    pub fn date_column(mut self, column: impl Into<String>, column_type: DateColumnType) -> Self {
        self.date_column = Some(column.into());
        self.date_column_type = column_type;
        self
    }

    pub fn default_order(mut self, order: Vec<OrderRule>) -> Self {
        self.default_order = order;
        self
    }

    pub fn map_params(mut self, map_params: Vec<MapParam>) -> Self {
        self.map_params = map_params;
        self
    }

    pub fn limits(mut self, default_limit: u32, max_limit: u32) -> Self {
        self.default_limit = Some(default_limit);
        self.max_limit = Some(max_limit);
        self
    }

    pub fn cache_control(mut self, value: impl Into<String>) -> Self {
        self.cache_control = Some(value.into());
        self
    }

    pub fn cors_origin(mut self, value: impl Into<String>) -> Self {
        self.cors_origin = Some(value.into());
        self
    }
}
