use anyhow::{bail, Context, Result};
use itertools::Itertools;
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};

use crate::model::Table;
use crate::store::traits::{Backend, Filter, Query};

#[derive(Debug, Clone)]
pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    /// Create a new PostgreSQL backend with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Create the seed schema and helper functions
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Quote a column or function name, rejecting anything but `[a-z0-9_]`.
fn quote_ident(name: &str) -> Result<String> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if !valid {
        bail!("Invalid SQL identifier: {:?}", name);
    }
    Ok(format!("\"{}\"", name))
}

/// Render a WHERE clause against alias `t`, binding the filter value as `$1`.
fn where_clause(filter: &Filter) -> Result<(String, Value)> {
    let column = quote_ident(filter.column())?;
    Ok(match filter {
        Filter::Eq { value, .. } => (
            format!(" WHERE to_jsonb(t.{}) = $1::jsonb", column),
            value.clone(),
        ),
        Filter::In { values, .. } => (
            format!(
                " WHERE to_jsonb(t.{}) IN (SELECT jsonb_array_elements($1::jsonb))",
                column
            ),
            Value::Array(values.clone()),
        ),
    })
}

#[async_trait::async_trait]
impl Backend for PostgresBackend {
    async fn insert(&self, table: Table, rows: Vec<Value>) -> Result<Vec<Value>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        // Only columns present in the payload, so omitted ones keep their defaults.
        let columns: Vec<String> = rows
            .iter()
            .filter_map(Value::as_object)
            .flat_map(|row| row.keys())
            .unique()
            .map(|column| quote_ident(column))
            .collect::<Result<_>>()?;
        let column_list = columns.join(", ");

        let sql = format!(
            "INSERT INTO {table} AS t ({cols}) \
             SELECT {cols} FROM jsonb_populate_recordset(NULL::{table}, $1::jsonb) \
             RETURNING to_jsonb(t) AS row",
            table = table.as_str(),
            cols = column_list,
        );

        let records = sqlx::query(&sql)
            .bind(Value::Array(rows))
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to insert into {}", table))?;

        records
            .iter()
            .map(|row| row.try_get::<Value, _>("row").context("Failed to decode inserted row"))
            .collect()
    }

    async fn select(&self, table: Table, query: Query) -> Result<Vec<Value>> {
        let mut sql = format!("SELECT to_jsonb(t) AS row FROM {} AS t", table.as_str());
        let mut bound = None;

        if let Some(filter) = &query.filter {
            let (clause, value) = where_clause(filter)?;
            sql.push_str(&clause);
            bound = Some(value);
        }
        if let Some(column) = &query.order_by {
            sql.push_str(&format!(" ORDER BY t.{}", quote_ident(column)?));
        }
        if let Some(limit) = query.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        let mut statement = sqlx::query(&sql);
        if let Some(value) = bound {
            statement = statement.bind(value);
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to select from {}", table))?;

        rows.iter()
            .map(|row| row.try_get::<Value, _>("row").context("Failed to decode selected row"))
            .collect()
    }

    async fn delete(&self, table: Table, filter: Option<Filter>) -> Result<u64> {
        let mut sql = format!("DELETE FROM {} AS t", table.as_str());
        let mut statement_value = None;
        if let Some(filter) = &filter {
            let (clause, value) = where_clause(filter)?;
            sql.push_str(&clause);
            statement_value = Some(value);
        }

        let mut statement = sqlx::query(&sql);
        if let Some(value) = statement_value {
            statement = statement.bind(value);
        }

        let result = statement
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete from {}", table))?;

        Ok(result.rows_affected())
    }

    async fn rpc(&self, function: &str, args: Value) -> Result<Value> {
        let sql = format!("SELECT to_jsonb({}($1::jsonb)) AS result", quote_ident(function)?);
        let row = sqlx::query(&sql)
            .bind(args)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("Failed to call {}", function))?;

        row.try_get::<Value, _>("result")
            .context("Failed to decode rpc result")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quote_ident_rejects_injection() {
        assert_eq!(quote_ident("focus_center_id").unwrap(), "\"focus_center_id\"");
        assert!(quote_ident("name; DROP TABLE regions").is_err());
        assert!(quote_ident("Name").is_err());
        assert!(quote_ident("").is_err());
    }

    #[test]
    fn test_where_clause_binds_in_list_as_array() {
        let (clause, value) = where_clause(&Filter::is_in("id", ["a", "b"])).unwrap();
        assert!(clause.contains("jsonb_array_elements"));
        assert_eq!(value, json!(["a", "b"]));

        let (clause, value) = where_clause(&Filter::eq("name", "Iberia")).unwrap();
        assert!(clause.ends_with("= $1::jsonb"));
        assert_eq!(value, json!("Iberia"));
    }
}
