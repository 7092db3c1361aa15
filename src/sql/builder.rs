//! Builds the parameterized SELECT for one resource read.
//!
//! The whole translation from a [`QueryIntent`] happens here in one step:
//! identifiers come from configuration only, request values are always bound
//! as `$n` parameters, never interpolated. Filter comparisons cast the
//! column to text (the descriptor carries no column types, and text-bound
//! parameters then work against uuid/numeric/text columns alike); date
//! bounds instead cast the parameter, using the one piece of type knowledge
//! the descriptor has.

use crate::config::ResolvedResource;
use crate::query::{DateCast, Filter, QueryIntent};

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<String>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: String) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// Quote identifier for PostgreSQL (safe: only from config).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Quote a possibly schema-qualified table name part by part.
fn qualified_table(table: &str) -> String {
    table.split('.').map(quoted).collect::<Vec<_>>().join(".")
}

fn date_cast(cast: DateCast) -> &'static str {
    match cast {
        DateCast::Timestamp => "::timestamp",
        DateCast::Date => "::date",
    }
}

/// SELECT with the resource projection, the intent's filters conjoined,
/// its ordering, and the clamped LIMIT.
pub fn select_rows(resource: &ResolvedResource, intent: &QueryIntent) -> QueryBuf {
    let mut q = QueryBuf::new();

    let mut where_parts = Vec::new();
    for filter in &intent.filters {
        match filter {
            Filter::Eq { column, value } => {
                let n = q.push_param(value.clone());
                where_parts.push(format!("{}::text = ${}", quoted(column), n));
            }
            Filter::In { column, values } => {
                let placeholders: Vec<String> = values
                    .iter()
                    .map(|v| format!("${}", q.push_param(v.clone())))
                    .collect();
                where_parts.push(format!(
                    "{}::text IN ({})",
                    quoted(column),
                    placeholders.join(", ")
                ));
            }
            Filter::ILike { column, pattern } => {
                let n = q.push_param(pattern.clone());
                where_parts.push(format!("{}::text ILIKE ${}", quoted(column), n));
            }
            Filter::Gte {
                column,
                value,
                cast,
            } => {
                let n = q.push_param(value.clone());
                where_parts.push(format!("{} >= ${}{}", quoted(column), n, date_cast(*cast)));
            }
            Filter::Lte {
                column,
                value,
                cast,
            } => {
                let n = q.push_param(value.clone());
                where_parts.push(format!("{} <= ${}{}", quoted(column), n, date_cast(*cast)));
            }
            Filter::DateEq { column, value } => {
                let n = q.push_param(value.clone());
                where_parts.push(format!("{} = ${}::date", quoted(column), n));
            }
        }
    }

    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };

    let order_parts: Vec<String> = intent
        .order
        .iter()
        .filter(|rule| !rule.column.is_empty())
        .map(|rule| {
            format!(
                "{} {}",
                quoted(&rule.column),
                if rule.ascending { "ASC" } else { "DESC" }
            )
        })
        .collect();
    let order_clause = if order_parts.is_empty() {
        String::new()
    } else {
        format!(" ORDER BY {}", order_parts.join(", "))
    };

    q.sql = format!(
        "SELECT {} FROM {}{}{} LIMIT {}",
        resource.select,
        qualified_table(&resource.table),
        where_clause,
        order_clause,
        intent.limit
    );
    q
}
