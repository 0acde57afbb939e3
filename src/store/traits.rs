use crate::model::{Id, Record, Table};
use anyhow::{Context, Result};
use serde_json::Value;

/// Row predicate understood by every backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq { column: String, value: Value },
    In { column: String, values: Vec<Value> },
}

impl Filter {
    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Filter::Eq {
            column: column.to_string(),
            value: value.into(),
        }
    }

    pub fn is_in<I, V>(column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Filter::In {
            column: column.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Filter::Eq { column, .. } | Filter::In { column, .. } => column,
        }
    }

    pub fn matches(&self, row: &Value) -> bool {
        let cell = row.get(self.column()).unwrap_or(&Value::Null);
        match self {
            Filter::Eq { value, .. } => cell == value,
            Filter::In { values, .. } => values.contains(cell),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filter: Option<Filter>,
    pub order_by: Option<String>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filtered(filter: Filter) -> Self {
        Self {
            filter: Some(filter),
            ..Self::default()
        }
    }

    pub fn order_by(mut self, column: &str) -> Self {
        self.order_by = Some(column.to_string());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Table-scoped access to the hosted relational store.
///
/// Rows travel as JSON objects keyed by column name; `Record` types give
/// them a schema on the way in and out (see [`BackendExt`]).
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Insert rows and return them as persisted.
    async fn insert(&self, table: Table, rows: Vec<Value>) -> Result<Vec<Value>>;
    async fn select(&self, table: Table, query: Query) -> Result<Vec<Value>>;
    /// Delete matching rows (all rows when `filter` is `None`).
    async fn delete(&self, table: Table, filter: Option<Filter>) -> Result<u64>;
    /// Call a server-side function with a single JSON argument object.
    async fn rpc(&self, function: &str, args: Value) -> Result<Value>;
}

#[async_trait::async_trait]
impl<B: Backend + ?Sized> Backend for std::sync::Arc<B> {
    async fn insert(&self, table: Table, rows: Vec<Value>) -> Result<Vec<Value>> {
        (**self).insert(table, rows).await
    }

    async fn select(&self, table: Table, query: Query) -> Result<Vec<Value>> {
        (**self).select(table, query).await
    }

    async fn delete(&self, table: Table, filter: Option<Filter>) -> Result<u64> {
        (**self).delete(table, filter).await
    }

    async fn rpc(&self, function: &str, args: Value) -> Result<Value> {
        (**self).rpc(function, args).await
    }
}

/// Largest IN-list sent in one select.
pub const FETCH_CHUNK: usize = 100;

/// Typed helpers layered on any [`Backend`].
#[async_trait::async_trait]
pub trait BackendExt: Backend {
    async fn fetch<T: Record>(&self, query: Query) -> Result<Vec<T>> {
        let rows = self.select(T::TABLE, query).await?;
        rows.into_iter()
            .map(|row| {
                serde_json::from_value(row)
                    .with_context(|| format!("Failed to decode {} row", T::TABLE))
            })
            .collect()
    }

    /// Fetch rows whose `column` is one of `values`, chunking long lists.
    async fn fetch_where_in<T: Record>(&self, column: &str, values: &[String]) -> Result<Vec<T>> {
        let mut out = Vec::with_capacity(values.len());
        for chunk in values.chunks(FETCH_CHUNK) {
            let query = Query::filtered(Filter::is_in(column, chunk.iter().cloned()));
            out.extend(self.fetch::<T>(query).await?);
        }
        Ok(out)
    }

    async fn fetch_by_ids<T: Record>(&self, ids: &[Id]) -> Result<Vec<T>> {
        self.fetch_where_in::<T>("id", ids).await
    }

    /// All string values of one column, e.g. to pre-check unique names.
    async fn fetch_column(&self, table: Table, column: &str) -> Result<Vec<String>> {
        let rows = self.select(table, Query::all()).await?;
        Ok(rows
            .iter()
            .filter_map(|row| row.get(column).and_then(Value::as_str))
            .map(str::to_string)
            .collect())
    }
}

impl<B: Backend + ?Sized> BackendExt for B {}
