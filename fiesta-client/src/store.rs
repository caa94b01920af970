//! Data store interface
//!
//! The hosted backend exposes generic row-level operations over named
//! tables; it owns concurrency control, consistency and persistence.
//! [`DataStore`] is the seam the services program against: [`RestStore`]
//! talks to the real backend, [`MemoryStore`] backs the tests.
//!
//! [`RestStore`]: crate::http::RestStore

use crate::error::ClientResult;
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use tokio::sync::RwLock;

/// Comparison operator for a filter condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
    Lte,
}

/// Row filter: equality/range conditions plus ordering and limit
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub conditions: Vec<(String, FilterOp, Value)>,
    pub order_by: Option<(String, bool)>,
    pub limit: Option<usize>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((column.into(), FilterOp::Eq, value.into()));
        self
    }

    pub fn gte(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((column.into(), FilterOp::Gte, value.into()));
        self
    }

    pub fn lte(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((column.into(), FilterOp::Lte, value.into()));
        self
    }

    /// Order by a column; `ascending = false` for descending
    pub fn order_by(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order_by = Some((column.into(), ascending));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a row satisfies every condition
    pub fn matches(&self, row: &Value) -> bool {
        self.conditions.iter().all(|(column, op, expected)| {
            let Some(actual) = row.get(column) else {
                return false;
            };
            match op {
                FilterOp::Eq => actual == expected,
                FilterOp::Gte => {
                    compare_values(actual, expected).is_some_and(|o| o != Ordering::Less)
                }
                FilterOp::Lte => {
                    compare_values(actual, expected).is_some_and(|o| o != Ordering::Greater)
                }
            }
        })
    }

    /// Apply conditions, ordering and limit to a row set
    pub fn apply(&self, rows: &[Value]) -> Vec<Value> {
        let mut matched: Vec<Value> = rows.iter().filter(|r| self.matches(r)).cloned().collect();
        if let Some((column, ascending)) = &self.order_by {
            matched.sort_by(|a, b| {
                let ordering = match (a.get(column), b.get(column)) {
                    (Some(x), Some(y)) => compare_values(x, y).unwrap_or(Ordering::Equal),
                    _ => Ordering::Equal,
                };
                if *ascending { ordering } else { ordering.reverse() }
            });
        }
        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        matched
    }
}

fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Generic row-level access to the hosted backend
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Select rows matching a filter
    async fn select(&self, table: &str, filter: Filter) -> ClientResult<Vec<Value>>;

    /// Insert a row; returns the stored row (with assigned id)
    async fn insert(&self, table: &str, row: Value) -> ClientResult<Value>;

    /// Patch matching rows; returns the updated rows
    async fn update(&self, table: &str, filter: Filter, patch: Value) -> ClientResult<Vec<Value>>;

    /// Insert or replace by primary key
    async fn upsert(&self, table: &str, row: Value) -> ClientResult<Value>;

    /// Delete matching rows; returns the number removed
    async fn delete(&self, table: &str, filter: Filter) -> ClientResult<u64>;

    /// Count rows matching a filter
    async fn count(&self, table: &str, filter: Filter) -> ClientResult<u64>;
}

/// In-memory [`DataStore`] used by tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<Value>>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn assign_id(&self, row: &mut Value) {
        if let Value::Object(map) = row {
            let missing = !matches!(map.get("id"), Some(Value::Number(_)));
            if missing {
                let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
                map.insert("id".to_string(), Value::from(id));
            }
        }
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn select(&self, table: &str, filter: Filter) -> ClientResult<Vec<Value>> {
        let tables = self.tables.read().await;
        let rows = tables.get(table).map(Vec::as_slice).unwrap_or(&[]);
        Ok(filter.apply(rows))
    }

    async fn insert(&self, table: &str, mut row: Value) -> ClientResult<Value> {
        self.assign_id(&mut row);
        let mut tables = self.tables.write().await;
        tables.entry(table.to_string()).or_default().push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: &str, filter: Filter, patch: Value) -> ClientResult<Vec<Value>> {
        let mut tables = self.tables.write().await;
        let mut updated = Vec::new();
        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut().filter(|r| filter.matches(r)) {
                if let (Value::Object(target), Value::Object(fields)) = (&mut *row, &patch) {
                    for (key, value) in fields {
                        target.insert(key.clone(), value.clone());
                    }
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn upsert(&self, table: &str, mut row: Value) -> ClientResult<Value> {
        let id = row.get("id").cloned();
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();
        if let Some(id) = id {
            if let Some(existing) = rows.iter_mut().find(|r| r.get("id") == Some(&id)) {
                *existing = row.clone();
                return Ok(row);
            }
        }
        drop(tables);
        self.assign_id(&mut row);
        let mut tables = self.tables.write().await;
        tables.entry(table.to_string()).or_default().push(row.clone());
        Ok(row)
    }

    async fn delete(&self, table: &str, filter: Filter) -> ClientResult<u64> {
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|r| !filter.matches(r));
        Ok((before - rows.len()) as u64)
    }

    async fn count(&self, table: &str, filter: Filter) -> ClientResult<u64> {
        let tables = self.tables.read().await;
        let rows = tables.get(table).map(Vec::as_slice).unwrap_or(&[]);
        Ok(rows.iter().filter(|r| filter.matches(r)).count() as u64)
    }
}
