// Store adapter trait: what every storage backend implements.
//
// The trait works on `serde_json::Value` rows keyed by table name so it
// stays schema-agnostic. The service layer (in the `serenity-data` crate)
// converts between typed records and `Value`. Filters are conjunctive; the
// one disjunctive query in the system (a two-sided conversation) is issued
// as two filtered reads and merged by the caller.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

// ─── Where Clause ────────────────────────────────────────────────

/// Comparison operators for WHERE clauses.
///
/// `Lt`..`Gte` compare scalars (timestamps included). `In` checks whether
/// the row's value appears in the given list. `Has` checks whether the row's
/// array column contains the given value, which is how the resource catalog
/// filters by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Equal (default).
    Eq,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Row value is in the given list.
    In,
    /// Row's array column contains the given value.
    Has,
}

impl Default for Operator {
    fn default() -> Self {
        Self::Eq
    }
}

/// A single WHERE condition. Conditions in a query always AND together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhereClause {
    /// The column to filter on.
    pub field: String,
    /// The comparison value.
    pub value: serde_json::Value,
    /// The comparison operator (default: Eq).
    #[serde(default)]
    pub operator: Operator,
}

impl WhereClause {
    pub fn new(
        field: impl Into<String>,
        value: impl Into<serde_json::Value>,
        operator: Operator,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            operator,
        }
    }

    /// Simple equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self::new(field, value, Operator::Eq)
    }

    /// Membership filter: the row's array column contains `value`.
    pub fn has(field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self::new(field, value, Operator::Has)
    }
}

// ─── Sort / Query ────────────────────────────────────────────────

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort key (column + direction).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortBy {
    pub field: String,
    pub direction: SortDirection,
}

impl SortBy {
    /// Ascending sort on `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Query parameters for `find_many`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindQuery {
    pub where_clauses: Vec<WhereClause>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
}

// ─── Adapter Trait ───────────────────────────────────────────────

/// The storage backend trait.
///
/// The remote store owns schema and id generation; this trait only moves
/// rows. There are no delete operations: every entity in the domain is
/// append-only or soft-retained, so nothing in the service layer deletes.
#[async_trait]
pub trait StoreAdapter: Send + Sync + fmt::Debug {
    /// Insert one row. The backend assigns an `id` when the row carries
    /// none. Returns the persisted row.
    async fn create(&self, table: &str, data: serde_json::Value)
        -> StoreResult<serde_json::Value>;

    /// Find a single row matching the WHERE clauses.
    /// Zero matches is `Ok(None)`, never an error.
    async fn find_one(
        &self,
        table: &str,
        where_clauses: &[WhereClause],
    ) -> StoreResult<Option<serde_json::Value>>;

    /// Find all rows matching the query parameters.
    async fn find_many(
        &self,
        table: &str,
        query: FindQuery,
    ) -> StoreResult<Vec<serde_json::Value>>;

    /// Count rows matching the WHERE clauses.
    async fn count(&self, table: &str, where_clauses: &[WhereClause]) -> StoreResult<i64>;

    /// Merge `data` into the single row matching the WHERE clauses.
    /// Returns the updated row, or `Ok(None)` when nothing matched.
    async fn update(
        &self,
        table: &str,
        where_clauses: &[WhereClause],
        data: serde_json::Value,
    ) -> StoreResult<Option<serde_json::Value>>;
}
