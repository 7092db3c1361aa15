//! Query intent: URL query parameters parsed into a declarative list of
//! filter/order/limit directives. Pure data, no I/O; the SQL builder turns
//! an intent into the actual SELECT in one separate step.

use crate::config::{DateColumnType, OrderRule, ResolvedResource};
use std::collections::HashMap;

/// Cast applied to a bound date parameter so text values compare correctly
/// against timestamp/date columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateCast {
    Timestamp,
    Date,
}

/// One filter directive derived from the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    /// Exact match from a mapped param.
    Eq { column: String, value: String },
    /// Set membership from a comma-separated mapped param.
    In { column: String, values: Vec<String> },
    /// Case-insensitive substring match, pattern already wildcard-wrapped.
    ILike { column: String, pattern: String },
    /// Lower bound on the date column (inclusive).
    Gte {
        column: String,
        value: String,
        cast: DateCast,
    },
    /// Upper bound on the date column (inclusive).
    Lte {
        column: String,
        value: String,
        cast: DateCast,
    },
    /// Single-day equality on a date-typed column.
    DateEq { column: String, value: String },
}

/// Everything one request asks of the store: row cap, conjunctive filters,
/// ordering. Reconstructed per call; never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryIntent {
    pub limit: u32,
    pub filters: Vec<Filter>,
    pub order: Vec<OrderRule>,
}

impl QueryIntent {
    /// Build the intent for one request. Pure and total: malformed input is
    /// clamped or ignored, never rejected.
    pub fn from_params(resource: &ResolvedResource, params: &HashMap<String, String>) -> Self {
        let limit = parse_limit(
            params.get("limit").map(String::as_str),
            resource.default_limit,
            resource.max_limit,
        );

        let mut filters = Vec::new();
        for mp in &resource.map_params {
            // `{param}_ilike` wins over the plain form for this request.
            let ilike_key = format!("{}_ilike", mp.param);
            if let Some(v) = non_empty(params.get(&ilike_key)) {
                filters.push(Filter::ILike {
                    column: mp.column.clone(),
                    pattern: format!("%{v}%"),
                });
                continue;
            }
            let Some(raw) = non_empty(params.get(&mp.param)) else {
                continue;
            };
            if raw.contains(',') {
                let values = comma_list(raw);
                if !values.is_empty() {
                    filters.push(Filter::In {
                        column: mp.column.clone(),
                        values,
                    });
                }
            } else {
                filters.push(Filter::Eq {
                    column: mp.column.clone(),
                    value: raw.to_string(),
                });
            }
        }

        if let Some(spec) = &resource.date_filter {
            let cast = match spec.column_type {
                DateColumnType::Timestamp => DateCast::Timestamp,
                DateColumnType::Date => DateCast::Date,
            };
            // A single-day `date` takes precedence; the range params are not
            // consulted when it is present.
            if let Some(day) = non_empty(params.get("date")) {
                match spec.column_type {
                    DateColumnType::Timestamp => {
                        let (start, end) = day_bounds(day);
                        filters.push(Filter::Gte {
                            column: spec.column.clone(),
                            value: start,
                            cast,
                        });
                        filters.push(Filter::Lte {
                            column: spec.column.clone(),
                            value: end,
                            cast,
                        });
                    }
                    DateColumnType::Date => filters.push(Filter::DateEq {
                        column: spec.column.clone(),
                        value: day.to_string(),
                    }),
                }
            } else {
                if let Some(start_day) = non_empty(params.get("startDate")) {
                    let value = match spec.column_type {
                        DateColumnType::Timestamp => day_bounds(start_day).0,
                        DateColumnType::Date => start_day.to_string(),
                    };
                    filters.push(Filter::Gte {
                        column: spec.column.clone(),
                        value,
                        cast,
                    });
                }
                if let Some(end_day) = non_empty(params.get("endDate")) {
                    let value = match spec.column_type {
                        DateColumnType::Timestamp => day_bounds(end_day).1,
                        DateColumnType::Date => end_day.to_string(),
                    };
                    filters.push(Filter::Lte {
                        column: spec.column.clone(),
                        value,
                        cast,
                    });
                }
            }
        }

        let mut order = params
            .get("order")
            .map(|raw| parse_order(raw))
            .unwrap_or_default();
        if order.is_empty() {
            order = resource.default_order.clone();
        }

        QueryIntent {
            limit,
            filters,
            order,
        }
    }
}

fn non_empty(v: Option<&String>) -> Option<&str> {
    v.map(String::as_str).filter(|s| !s.is_empty())
}

/// Effective row cap: parsed value or default, clamped into `[1, max]`.
pub fn parse_limit(raw: Option<&str>, default: u32, max: u32) -> u32 {
    let requested = raw
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or_else(|| i64::from(default));
    requested.clamp(1, i64::from(max)) as u32
}

/// Split a comma-separated value, trimming pieces and dropping empties.
pub fn comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `order=column[:dir],...` tokens. `desc` (any case) sorts
/// descending; anything else, including a missing direction, ascending.
/// Empty tokens and tokens without a column are dropped.
pub fn parse_order(raw: &str) -> Vec<OrderRule> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| {
            let (column, dir) = match part.split_once(':') {
                Some((c, d)) => (c.trim(), Some(d.trim())),
                None => (part, None),
            };
            if column.is_empty() {
                return None;
            }
            Some(OrderRule {
                column: column.to_string(),
                ascending: !dir.is_some_and(|d| d.eq_ignore_ascii_case("desc")),
            })
        })
        .collect()
}

/// Inclusive timestamp bounds covering one calendar day.
pub fn day_bounds(date: &str) -> (String, String) {
    (
        format!("{date}T00:00:00.000"),
        format!("{date}T23:59:59.999"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, DateColumnType, MapParam, OrderRule, ResourceConfig};

    fn resource_with(config: ResourceConfig) -> ResolvedResource {
        resolve(config).unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn limit_clamping_grid() {
        // config {default 100, max 500}
        assert_eq!(parse_limit(Some("-5"), 100, 500), 1);
        assert_eq!(parse_limit(Some("0"), 100, 500), 1);
        assert_eq!(parse_limit(Some("abc"), 100, 500), 100);
        assert_eq!(parse_limit(Some("10000"), 100, 500), 500);
        assert_eq!(parse_limit(Some("50"), 100, 500), 50);
        assert_eq!(parse_limit(None, 100, 500), 100);
        // default above the ceiling is clamped too
        assert_eq!(parse_limit(None, 900, 500), 500);
        // value beyond i64 parses as nothing and falls back to the default
        assert_eq!(parse_limit(Some("99999999999999999999999"), 100, 500), 100);
    }

    #[test]
    fn ilike_wins_over_plain_form() {
        let resource = resource_with(
            ResourceConfig::new("users", "*").map_params(vec![MapParam::new("search", "name")]),
        );
        let intent = QueryIntent::from_params(
            &resource,
            &params(&[("search_ilike", "Jo"), ("search", "John")]),
        );
        assert_eq!(
            intent.filters,
            vec![Filter::ILike {
                column: "name".into(),
                pattern: "%Jo%".into(),
            }]
        );
    }

    #[test]
    fn commas_inside_ilike_are_literal() {
        let resource = resource_with(
            ResourceConfig::new("users", "*").map_params(vec![MapParam::new("search", "name")]),
        );
        let intent = QueryIntent::from_params(&resource, &params(&[("search_ilike", "a,b")]));
        assert_eq!(
            intent.filters,
            vec![Filter::ILike {
                column: "name".into(),
                pattern: "%a,b%".into(),
            }]
        );
    }

    #[test]
    fn comma_value_becomes_membership_filter() {
        let resource = resource_with(
            ResourceConfig::new("t", "*").map_params(vec![MapParam::new("status", "status_col")]),
        );
        let intent = QueryIntent::from_params(&resource, &params(&[("status", "active,pending")]));
        assert_eq!(
            intent.filters,
            vec![Filter::In {
                column: "status_col".into(),
                values: vec!["active".into(), "pending".into()],
            }]
        );
    }

    #[test]
    fn comma_pieces_are_trimmed_and_empties_dropped() {
        assert_eq!(comma_list(" a , ,b,"), vec!["a".to_string(), "b".to_string()]);
        let resource = resource_with(
            ResourceConfig::new("t", "*").map_params(vec![MapParam::new("status", "status_col")]),
        );
        // all pieces empty: no filter at all
        let intent = QueryIntent::from_params(&resource, &params(&[("status", ",,,")]));
        assert!(intent.filters.is_empty());
    }

    #[test]
    fn empty_or_absent_param_adds_no_filter() {
        let resource = resource_with(
            ResourceConfig::new("t", "*").map_params(vec![MapParam::new("status", "status_col")]),
        );
        assert!(QueryIntent::from_params(&resource, &params(&[("status", "")]))
            .filters
            .is_empty());
        assert!(QueryIntent::from_params(&resource, &params(&[]))
            .filters
            .is_empty());
    }

    #[test]
    fn single_value_is_equality() {
        let resource = resource_with(
            ResourceConfig::new("t", "*").map_params(vec![MapParam::new("meal", "meal")]),
        );
        let intent = QueryIntent::from_params(&resource, &params(&[("meal", "almoco")]));
        assert_eq!(
            intent.filters,
            vec![Filter::Eq {
                column: "meal".into(),
                value: "almoco".into(),
            }]
        );
    }

    #[test]
    fn filters_follow_map_params_declaration_order() {
        let resource = resource_with(ResourceConfig::new("t", "*").map_params(vec![
            MapParam::new("unidade", "unidade"),
            MapParam::new("meal", "meal"),
        ]));
        let intent = QueryIntent::from_params(
            &resource,
            &params(&[("meal", "jantar"), ("unidade", "1CIA")]),
        );
        assert_eq!(
            intent.filters,
            vec![
                Filter::Eq {
                    column: "unidade".into(),
                    value: "1CIA".into(),
                },
                Filter::Eq {
                    column: "meal".into(),
                    value: "jantar".into(),
                },
            ]
        );
    }

    #[test]
    fn single_day_on_timestamp_column_is_closed_range() {
        let resource = resource_with(
            ResourceConfig::new("t", "*").date_column("created_at", DateColumnType::Timestamp),
        );
        let intent = QueryIntent::from_params(&resource, &params(&[("date", "2024-03-15")]));
        assert_eq!(
            intent.filters,
            vec![
                Filter::Gte {
                    column: "created_at".into(),
                    value: "2024-03-15T00:00:00.000".into(),
                    cast: DateCast::Timestamp,
                },
                Filter::Lte {
                    column: "created_at".into(),
                    value: "2024-03-15T23:59:59.999".into(),
                    cast: DateCast::Timestamp,
                },
            ]
        );
    }

    #[test]
    fn single_day_on_date_column_is_equality() {
        let resource =
            resource_with(ResourceConfig::new("t", "*").date_column("date", DateColumnType::Date));
        let intent = QueryIntent::from_params(&resource, &params(&[("date", "2024-03-15")]));
        assert_eq!(
            intent.filters,
            vec![Filter::DateEq {
                column: "date".into(),
                value: "2024-03-15".into(),
            }]
        );
    }

    #[test]
    fn date_takes_precedence_over_range_params() {
        let resource =
            resource_with(ResourceConfig::new("t", "*").date_column("date", DateColumnType::Date));
        let intent = QueryIntent::from_params(
            &resource,
            &params(&[
                ("date", "2024-03-15"),
                ("startDate", "2024-01-01"),
                ("endDate", "2024-12-31"),
            ]),
        );
        assert_eq!(
            intent.filters,
            vec![Filter::DateEq {
                column: "date".into(),
                value: "2024-03-15".into(),
            }]
        );
    }

    #[test]
    fn range_bounds_are_independent() {
        let resource = resource_with(
            ResourceConfig::new("t", "*").date_column("created_at", DateColumnType::Timestamp),
        );
        let start_only =
            QueryIntent::from_params(&resource, &params(&[("startDate", "2024-03-01")]));
        assert_eq!(
            start_only.filters,
            vec![Filter::Gte {
                column: "created_at".into(),
                value: "2024-03-01T00:00:00.000".into(),
                cast: DateCast::Timestamp,
            }]
        );
        let end_only = QueryIntent::from_params(&resource, &params(&[("endDate", "2024-03-31")]));
        assert_eq!(
            end_only.filters,
            vec![Filter::Lte {
                column: "created_at".into(),
                value: "2024-03-31T23:59:59.999".into(),
                cast: DateCast::Timestamp,
            }]
        );
    }

    #[test]
    fn range_bounds_on_date_column_use_raw_values() {
        let resource =
            resource_with(ResourceConfig::new("t", "*").date_column("date", DateColumnType::Date));
        let intent = QueryIntent::from_params(
            &resource,
            &params(&[("startDate", "2024-03-01"), ("endDate", "2024-03-31")]),
        );
        assert_eq!(
            intent.filters,
            vec![
                Filter::Gte {
                    column: "date".into(),
                    value: "2024-03-01".into(),
                    cast: DateCast::Date,
                },
                Filter::Lte {
                    column: "date".into(),
                    value: "2024-03-31".into(),
                    cast: DateCast::Date,
                },
            ]
        );
    }

    #[test]
    fn date_params_ignored_without_date_column() {
        let resource = resource_with(ResourceConfig::new("t", "*"));
        let intent = QueryIntent::from_params(&resource, &params(&[("date", "2024-03-15")]));
        assert!(intent.filters.is_empty());
    }

    #[test]
    fn order_param_replaces_default_order_entirely() {
        let resource = resource_with(
            ResourceConfig::new("t", "*").default_order(vec![OrderRule::desc("created_at")]),
        );
        let intent = QueryIntent::from_params(&resource, &params(&[("order", "name:desc,age")]));
        assert_eq!(
            intent.order,
            vec![OrderRule::desc("name"), OrderRule::asc("age")]
        );
    }

    #[test]
    fn default_order_applies_verbatim_when_no_order_param() {
        let default = vec![
            OrderRule::desc("date"),
            OrderRule::asc("unidade"),
            OrderRule::asc("meal"),
        ];
        let resource =
            resource_with(ResourceConfig::new("t", "*").default_order(default.clone()));
        let intent = QueryIntent::from_params(&resource, &params(&[]));
        assert_eq!(intent.order, default);
        // an order param that parses to nothing also falls back
        let intent = QueryIntent::from_params(&resource, &params(&[("order", " , ,")]));
        assert_eq!(intent.order, default);
    }

    #[test]
    fn order_tokens_parse_directions_case_insensitively() {
        let rules = parse_order("a:DESC, b:asc ,c:sideways,d:,e");
        assert_eq!(
            rules,
            vec![
                OrderRule::desc("a"),
                OrderRule::asc("b"),
                OrderRule::asc("c"),
                OrderRule::asc("d"),
                OrderRule::asc("e"),
            ]
        );
        assert!(parse_order(":desc").is_empty());
    }

    #[test]
    fn day_bounds_cover_the_whole_day() {
        let (start, end) = day_bounds("2024-03-15");
        assert_eq!(start, "2024-03-15T00:00:00.000");
        assert_eq!(end, "2024-03-15T23:59:59.999");
    }
}
