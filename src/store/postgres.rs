use sqlx::PgPool;

use super::{OrderBy, Row, StoreError, Table, TableStore, is_valid_column};

/// `TableStore` over Postgres.
///
/// Rows are read with `to_jsonb(t)` and written through
/// `jsonb_populate_record`, which lets Postgres coerce JSON values into the
/// column types (dates, timestamps, jsonb) instead of binding each one by hand.
#[derive(Clone)]
pub struct PgTableStore {
    pool: PgPool,
}

impl PgTableStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn columns_of(row: &Row) -> Result<Vec<&str>, StoreError> {
    row.keys()
        .map(|k| {
            if is_valid_column(k) {
                Ok(k.as_str())
            } else {
                Err(StoreError::InvalidColumn(k.clone()))
            }
        })
        .collect()
}

fn parse_row(text: &str) -> Result<Row, StoreError> {
    Ok(serde_json::from_str(text)?)
}

impl TableStore for PgTableStore {
    async fn select(&self, table: Table, order: Option<OrderBy>) -> Result<Vec<Row>, StoreError> {
        let order_clause = match order {
            Some(o) => {
                if !is_valid_column(o.column) {
                    return Err(StoreError::InvalidColumn(o.column.to_string()));
                }
                let dir = if o.ascending { "ASC" } else { "DESC" };
                format!(" ORDER BY t.{} {dir}", o.column)
            }
            None => String::new(),
        };
        let sql = format!("SELECT to_jsonb(t)::text FROM {table} AS t{order_clause}");

        let rows: Vec<(String,)> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(|(text,)| parse_row(text)).collect()
    }

    async fn insert(&self, table: Table, row: Row) -> Result<Row, StoreError> {
        let cols = columns_of(&row)?;
        if cols.is_empty() {
            return Err(StoreError::Rejected(format!("empty insert into {table}")));
        }
        let col_list = cols.join(", ");
        let sql = format!(
            "INSERT INTO {table} ({col_list}) \
             SELECT {col_list} FROM jsonb_populate_record(NULL::{table}, $1::jsonb) \
             RETURNING to_jsonb({table}.*)::text"
        );
        let payload = serde_json::Value::Object(row).to_string();

        let (text,): (String,) = sqlx::query_as(&sql)
            .bind(payload)
            .fetch_one(&self.pool)
            .await?;
        parse_row(&text)
    }

    async fn update(&self, table: Table, id: &str, patch: Row) -> Result<Row, StoreError> {
        let cols = columns_of(&patch)?;
        if cols.is_empty() {
            return Err(StoreError::Rejected(format!("empty update on {table}")));
        }
        let assignments = cols
            .iter()
            .map(|c| format!("{c} = r.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {table} AS t SET {assignments} \
             FROM jsonb_populate_record(NULL::{table}, $1::jsonb) AS r \
             WHERE t.id::text = $2 \
             RETURNING to_jsonb(t)::text"
        );
        let payload = serde_json::Value::Object(patch).to_string();

        let row: Option<(String,)> = sqlx::query_as(&sql)
            .bind(payload)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some((text,)) => parse_row(&text),
            None => Err(StoreError::NotFound { table, id: id.to_string() }),
        }
    }

    async fn delete(&self, table: Table, id: &str) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {table} WHERE id::text = $1");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { table, id: id.to_string() });
        }
        Ok(())
    }
}
