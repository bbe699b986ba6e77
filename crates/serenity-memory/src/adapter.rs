// In-memory store: HashMap-based backend implementing the core StoreAdapter
// trait.
//
// Rows live in `HashMap<String, Vec<serde_json::Value>>` keyed by table
// name, wrapped in `tokio::sync::RwLock` for concurrent access. Timestamp
// columns are RFC 3339 strings; comparisons and sorting parse them so that
// ordering holds regardless of subsecond precision.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use serenity_core::error::StoreResult;
use serenity_core::store::adapter::{
    FindQuery, Operator, SortDirection, StoreAdapter, WhereClause,
};

/// Type alias for the in-memory table map.
type Tables = HashMap<String, Vec<serde_json::Value>>;

/// In-memory store backend.
///
/// Cloning is cheap and clones share the same underlying tables.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a store pre-populated with rows.
    pub fn with_data(data: Tables) -> Self {
        Self {
            tables: Arc::new(RwLock::new(data)),
        }
    }

    /// Snapshot of all tables (for debugging/testing).
    pub async fn snapshot(&self) -> Tables {
        self.tables.read().await.clone()
    }

    /// Drop every row in every table.
    pub async fn clear(&self) {
        self.tables.write().await.clear();
    }

    /// Row count for one table.
    pub async fn table_count(&self, table: &str) -> usize {
        self.tables
            .read()
            .await
            .get(table)
            .map(|rows| rows.len())
            .unwrap_or(0)
    }
}

/// Check if a row matches every WHERE clause.
fn matches_where(row: &serde_json::Value, clauses: &[WhereClause]) -> bool {
    clauses.iter().all(|clause| {
        let field_val = row
            .get(&clause.field)
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        match_operator(&field_val, &clause.value, &clause.operator)
    })
}

/// Match a single operator condition.
fn match_operator(field_val: &serde_json::Value, target: &serde_json::Value, op: &Operator) -> bool {
    match op {
        Operator::Eq => field_val == target,
        Operator::Lt => compare_values(field_val, target).map_or(false, |o| o == Ordering::Less),
        Operator::Lte => compare_values(field_val, target).map_or(false, |o| o != Ordering::Greater),
        Operator::Gt => compare_values(field_val, target).map_or(false, |o| o == Ordering::Greater),
        Operator::Gte => compare_values(field_val, target).map_or(false, |o| o != Ordering::Less),
        Operator::In => {
            if let serde_json::Value::Array(arr) = target {
                arr.contains(field_val)
            } else {
                false
            }
        }
        Operator::Has => {
            if let serde_json::Value::Array(arr) = field_val {
                arr.contains(target)
            } else {
                false
            }
        }
    }
}

/// Compare two JSON values for ordering.
///
/// When both sides are strings that parse as RFC 3339 timestamps they
/// compare as instants, so "10:00:00Z" orders before "10:00:00.5Z" even
/// though it sorts after it lexicographically. Other strings compare
/// lexicographically; numbers compare numerically.
fn compare_values(a: &serde_json::Value, b: &serde_json::Value) -> Option<Ordering> {
    match (a, b) {
        (serde_json::Value::Number(an), serde_json::Value::Number(bn)) => {
            an.as_f64()?.partial_cmp(&bn.as_f64()?)
        }
        (serde_json::Value::String(a_s), serde_json::Value::String(b_s)) => {
            match (
                chrono::DateTime::parse_from_rfc3339(a_s),
                chrono::DateTime::parse_from_rfc3339(b_s),
            ) {
                (Ok(a_t), Ok(b_t)) => Some(a_t.cmp(&b_t)),
                _ => Some(a_s.cmp(b_s)),
            }
        }
        _ => None,
    }
}

/// Apply sorting to rows. Rows missing the sort column order first on Asc.
fn sort_rows(rows: &mut [serde_json::Value], query: &FindQuery) {
    if let Some(ref sort) = query.sort_by {
        rows.sort_by(|a, b| {
            let av = a.get(&sort.field);
            let bv = b.get(&sort.field);
            let ord = match (av, bv) {
                (Some(av), Some(bv)) => compare_values(av, bv).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            };
            match sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }
}

/// Merge update data into an existing row.
fn merge_update(row: &mut serde_json::Value, data: &serde_json::Value) {
    if let (Some(row_obj), Some(data_obj)) = (row.as_object_mut(), data.as_object()) {
        for (k, v) in data_obj {
            row_obj.insert(k.clone(), v.clone());
        }
    }
}

#[async_trait]
impl StoreAdapter for MemoryStore {
    async fn create(
        &self,
        table: &str,
        data: serde_json::Value,
    ) -> StoreResult<serde_json::Value> {
        let mut row = data;

        // Assign an id unless the caller brought one
        if row.get("id").is_none() || row.get("id") == Some(&serde_json::Value::Null) {
            if let Some(obj) = row.as_object_mut() {
                obj.insert(
                    "id".to_string(),
                    serde_json::Value::String(uuid::Uuid::new_v4().to_string()),
                );
            }
        }

        let mut tables = self.tables.write().await;
        tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());

        Ok(row)
    }

    async fn find_one(
        &self,
        table: &str,
        where_clauses: &[WhereClause],
    ) -> StoreResult<Option<serde_json::Value>> {
        let tables = self.tables.read().await;
        let rows = tables.get(table);

        match rows {
            Some(rows) => Ok(rows.iter().find(|r| matches_where(r, where_clauses)).cloned()),
            None => Ok(None),
        }
    }

    async fn find_many(
        &self,
        table: &str,
        query: FindQuery,
    ) -> StoreResult<Vec<serde_json::Value>> {
        let tables = self.tables.read().await;
        let empty = Vec::new();
        let rows = tables.get(table).unwrap_or(&empty);

        let mut result: Vec<serde_json::Value> = rows
            .iter()
            .filter(|r| matches_where(r, &query.where_clauses))
            .cloned()
            .collect();

        sort_rows(&mut result, &query);

        if let Some(limit) = query.limit {
            result.truncate(limit as usize);
        }

        Ok(result)
    }

    async fn count(&self, table: &str, where_clauses: &[WhereClause]) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        let empty = Vec::new();
        let rows = tables.get(table).unwrap_or(&empty);
        let count = rows.iter().filter(|r| matches_where(r, where_clauses)).count();
        Ok(count as i64)
    }

    async fn update(
        &self,
        table: &str,
        where_clauses: &[WhereClause],
        data: serde_json::Value,
    ) -> StoreResult<Option<serde_json::Value>> {
        let mut tables = self.tables.write().await;
        let rows = tables.get_mut(table);

        match rows {
            Some(rows) => {
                let found = rows.iter_mut().find(|r| matches_where(r, where_clauses));
                match found {
                    Some(row) => {
                        merge_update(row, &data);
                        Ok(Some(row.clone()))
                    }
                    None => Ok(None),
                }
            }
            None => Ok(None),
        }
    }
}
