//! In-process backend used by tests and dry runs.

use crate::model::Table;
use crate::store::traits::{Backend, Filter, Query};
use anyhow::{anyhow, bail, Result};
use parking_lot::RwLock;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;

type RpcHandler = Box<dyn Fn(Value) -> Result<Value> + Send + Sync>;

#[derive(Debug, Default)]
struct InsertFailure {
    /// Number of insert calls allowed to succeed before failing.
    succeed_first: usize,
    seen: usize,
}

#[derive(Default)]
pub struct MemoryBackend {
    tables: RwLock<HashMap<Table, Vec<Value>>>,
    insert_calls: RwLock<HashMap<Table, usize>>,
    failures: RwLock<HashMap<Table, InsertFailure>>,
    rpc_handlers: RwLock<HashMap<String, RpcHandler>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every insert into `table` after the first `succeed_first` calls fail.
    pub fn fail_inserts_after(&self, table: Table, succeed_first: usize) {
        self.failures.write().insert(
            table,
            InsertFailure {
                succeed_first,
                seen: 0,
            },
        );
    }

    pub fn register_rpc<F>(&self, name: &str, handler: F)
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.rpc_handlers
            .write()
            .insert(name.to_string(), Box::new(handler));
    }

    /// Seed rows directly, bypassing constraints and failure injection.
    pub fn put_rows(&self, table: Table, rows: Vec<Value>) {
        self.tables.write().entry(table).or_default().extend(rows);
    }

    pub fn rows(&self, table: Table) -> Vec<Value> {
        self.tables.read().get(&table).cloned().unwrap_or_default()
    }

    pub fn row_count(&self, table: Table) -> usize {
        self.tables.read().get(&table).map_or(0, Vec::len)
    }

    pub fn insert_calls(&self, table: Table) -> usize {
        self.insert_calls.read().get(&table).copied().unwrap_or(0)
    }

    fn check_injected_failure(&self, table: Table) -> Result<()> {
        let mut failures = self.failures.write();
        if let Some(failure) = failures.get_mut(&table) {
            failure.seen += 1;
            if failure.seen > failure.succeed_first {
                bail!("injected insert failure on {}", table);
            }
        }
        Ok(())
    }
}

fn compare_cells(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        _ => a.to_string().cmp(&b.to_string()),
    }
}

#[async_trait::async_trait]
impl Backend for MemoryBackend {
    async fn insert(&self, table: Table, rows: Vec<Value>) -> Result<Vec<Value>> {
        *self.insert_calls.write().entry(table).or_default() += 1;
        self.check_injected_failure(table)?;

        let mut tables = self.tables.write();
        let existing = tables.entry(table).or_default();

        // All-or-nothing per call, like a single INSERT statement.
        for column in table.unique_columns() {
            let mut seen: Vec<&Value> = existing
                .iter()
                .filter_map(|row| row.get(*column))
                .collect();
            for row in &rows {
                if !row.is_object() {
                    bail!("{} row is not a JSON object", table);
                }
                let Some(cell) = row.get(*column) else {
                    continue;
                };
                if seen.contains(&cell) {
                    return Err(anyhow!(
                        "duplicate key value violates unique constraint \"{}_{}_key\"",
                        table,
                        column
                    ));
                }
                seen.push(cell);
            }
        }

        existing.extend(rows.iter().cloned());
        Ok(rows)
    }

    async fn select(&self, table: Table, query: Query) -> Result<Vec<Value>> {
        let tables = self.tables.read();
        let mut rows: Vec<Value> = tables
            .get(&table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filter.as_ref().map_or(true, |f| f.matches(row)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(column) = &query.order_by {
            rows.sort_by(|a, b| {
                compare_cells(
                    a.get(column).unwrap_or(&Value::Null),
                    b.get(column).unwrap_or(&Value::Null),
                )
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn delete(&self, table: Table, filter: Option<Filter>) -> Result<u64> {
        let mut tables = self.tables.write();
        let Some(rows) = tables.get_mut(&table) else {
            return Ok(0);
        };
        let before = rows.len();
        match filter {
            Some(filter) => rows.retain(|row| !filter.matches(row)),
            None => rows.clear(),
        }
        Ok((before - rows.len()) as u64)
    }

    async fn rpc(&self, function: &str, args: Value) -> Result<Value> {
        let handlers = self.rpc_handlers.read();
        let handler = handlers
            .get(function)
            .ok_or_else(|| anyhow!("function {}(jsonb) does not exist", function))?;
        handler(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_unique_columns_reject_whole_insert() {
        let backend = MemoryBackend::new();
        backend
            .insert(Table::Regions, vec![json!({"id": "r1", "name": "Nordics"})])
            .await
            .unwrap();

        let result = backend
            .insert(
                Table::Regions,
                vec![
                    json!({"id": "r2", "name": "Iberia"}),
                    json!({"id": "r3", "name": "Nordics"}),
                ],
            )
            .await;

        assert!(result.is_err());
        assert_eq!(backend.row_count(Table::Regions), 1);
    }

    #[tokio::test]
    async fn test_select_filter_order_and_limit() {
        let backend = MemoryBackend::new();
        backend.put_rows(
            Table::Suppliers,
            vec![
                json!({"id": "b", "rating": 3}),
                json!({"id": "a", "rating": 5}),
                json!({"id": "c", "rating": 1}),
            ],
        );

        let rows = backend
            .select(
                Table::Suppliers,
                Query::filtered(Filter::is_in("id", ["a", "c"])).order_by("rating"),
            )
            .await
            .unwrap();
        assert_eq!(rows[0]["id"], "c");
        assert_eq!(rows[1]["id"], "a");

        let limited = backend
            .select(Table::Suppliers, Query::all().order_by("id").limit(1))
            .await
            .unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0]["id"], "a");
    }

    #[tokio::test]
    async fn test_injected_failure_counts_calls() {
        let backend = MemoryBackend::new();
        backend.fail_inserts_after(Table::Equipment, 1);

        assert!(backend
            .insert(Table::Equipment, vec![json!({"id": "e1"})])
            .await
            .is_ok());
        assert!(backend
            .insert(Table::Equipment, vec![json!({"id": "e2"})])
            .await
            .is_err());
        assert_eq!(backend.insert_calls(Table::Equipment), 2);
        assert_eq!(backend.row_count(Table::Equipment), 1);
    }

    #[tokio::test]
    async fn test_rpc_dispatch_and_delete() {
        let backend = MemoryBackend::new();
        backend.register_rpc("echo", |args| Ok(args));
        let out = backend.rpc("echo", json!({"x": 1})).await.unwrap();
        assert_eq!(out, json!({"x": 1}));
        assert!(backend.rpc("missing", json!({})).await.is_err());

        backend.put_rows(Table::Personnel, vec![json!({"id": "p1"}), json!({"id": "p2"})]);
        let removed = backend
            .delete(Table::Personnel, Some(Filter::eq("id", "p1")))
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(backend.delete(Table::Personnel, None).await.unwrap(), 1);
    }
}
