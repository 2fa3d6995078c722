use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::db::interfaces::{ColumnRow, ConstraintRow, Introspect};
use crate::db::types::Dialect;
use crate::errors::{GenError, GenResult};

type CatalogTuple = (
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

type ColumnTuple = (
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

fn constraint_row(t: CatalogTuple) -> ConstraintRow {
    ConstraintRow {
        constraint_type: t.0.unwrap_or_default(),
        column_name: t.1.unwrap_or_default(),
        ref_schema: t.2.unwrap_or_default(),
        ref_table: t.3.unwrap_or_default(),
        ref_column: t.4.unwrap_or_default(),
        ordinal_position: t.5.unwrap_or_default(),
    }
}

fn column_row(t: ColumnTuple) -> ColumnRow {
    ColumnRow {
        name: t.0.unwrap_or_default(),
        data_type: t.1.unwrap_or_default(),
        column_type: t.2.unwrap_or_default(),
        is_nullable: t.3.unwrap_or_default(),
        default: t.4.unwrap_or_default(),
        extra: t.5.unwrap_or_default(),
        comment: t.6.unwrap_or_default(),
    }
}

const MYSQL_TABLES: &str = "SHOW TABLES";

const MYSQL_CONSTRAINTS: &str = r#"
SELECT
    CAST(c.constraint_type AS CHAR),
    CAST(u.column_name AS CHAR),
    CAST(u.referenced_table_schema AS CHAR),
    CAST(u.referenced_table_name AS CHAR),
    CAST(u.referenced_column_name AS CHAR),
    CAST(u.ordinal_position AS CHAR)
FROM
    information_schema.table_constraints c
INNER JOIN
    information_schema.key_column_usage u ON c.constraint_name = u.constraint_name
WHERE
    c.table_schema = database() AND c.table_name = ? AND u.table_schema = database() AND u.table_name = ?
ORDER BY u.ordinal_position"#;

const MYSQL_COLUMNS: &str = r#"
SELECT
    CAST(column_name AS CHAR),
    CAST(data_type AS CHAR),
    CAST(column_type AS CHAR),
    CAST(is_nullable AS CHAR),
    CAST(column_default AS CHAR),
    CAST(extra AS CHAR),
    CAST(column_comment AS CHAR)
FROM
    information_schema.columns
WHERE
    table_schema = database() AND table_name = ?
ORDER BY ordinal_position"#;

const PG_TABLES: &str = r#"
SELECT table_name::text FROM information_schema.tables
WHERE table_catalog = current_database() AND
    table_type = 'BASE TABLE' AND
    table_schema NOT IN ('pg_catalog', 'information_schema')"#;

const PG_CONSTRAINTS: &str = r#"
SELECT
    c.constraint_type::text,
    u.column_name::text,
    cu.table_catalog::text AS referenced_table_catalog,
    cu.table_name::text AS referenced_table_name,
    cu.column_name::text AS referenced_column_name,
    u.ordinal_position::text
FROM
    information_schema.table_constraints c
INNER JOIN
    information_schema.key_column_usage u ON c.constraint_name = u.constraint_name
INNER JOIN
    information_schema.constraint_column_usage cu ON cu.constraint_name = c.constraint_name
WHERE
    c.table_catalog = current_database() AND c.table_schema NOT IN ('pg_catalog', 'information_schema')
    AND c.table_name = $1
    AND u.table_catalog = current_database() AND u.table_schema NOT IN ('pg_catalog', 'information_schema')
    AND u.table_name = $2
ORDER BY u.ordinal_position"#;

const PG_COLUMNS: &str = r#"
SELECT
    column_name::text,
    data_type::text,
    (data_type ||
    CASE
        WHEN data_type = 'character' THEN '(' || character_maximum_length || ')'
        WHEN data_type = 'numeric' THEN '(' || numeric_precision || ',' || numeric_scale || ')'
        ELSE ''
    END)::text AS column_type,
    is_nullable::text,
    column_default::text,
    CASE
        WHEN column_default LIKE 'nextval(%' OR is_identity = 'YES' THEN 'auto_increment'
        ELSE ''
    END AS extra,
    col_description(
        (quote_ident(table_schema) || '.' || quote_ident(table_name))::regclass::oid,
        ordinal_position
    ) AS column_comment
FROM
    information_schema.columns
WHERE
    table_catalog = current_database() AND table_schema NOT IN ('pg_catalog', 'information_schema')
    AND table_name = $1
ORDER BY ordinal_position"#;

pub struct MysqlCatalog {
    pool: MySqlPool,
}

impl MysqlCatalog {
    pub async fn connect(url: &str) -> GenResult<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(GenError::Connect)?;
        Ok(Self { pool })
    }
}

impl Introspect for MysqlCatalog {
    fn dialect(&self) -> Dialect {
        Dialect::Mysql
    }

    async fn table_names(&self) -> GenResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(MYSQL_TABLES)
            .fetch_all(&self.pool)
            .await
            .map_err(GenError::catalog("table names"))
    }

    async fn constraints(&self, table: &str) -> GenResult<Vec<ConstraintRow>> {
        let rows = sqlx::query_as::<_, CatalogTuple>(MYSQL_CONSTRAINTS)
            .bind(table)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(GenError::catalog("PK/UK/FK information"))?;
        Ok(rows.into_iter().map(constraint_row).collect())
    }

    async fn columns(&self, table: &str) -> GenResult<Vec<ColumnRow>> {
        let rows = sqlx::query_as::<_, ColumnTuple>(MYSQL_COLUMNS)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(GenError::catalog("column information"))?;
        Ok(rows.into_iter().map(column_row).collect())
    }
}

pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    pub async fn connect(url: &str) -> GenResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(GenError::Connect)?;
        Ok(Self { pool })
    }
}

impl Introspect for PostgresCatalog {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    async fn table_names(&self) -> GenResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(PG_TABLES)
            .fetch_all(&self.pool)
            .await
            .map_err(GenError::catalog("table names"))
    }

    async fn constraints(&self, table: &str) -> GenResult<Vec<ConstraintRow>> {
        let rows = sqlx::query_as::<_, CatalogTuple>(PG_CONSTRAINTS)
            .bind(table)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(GenError::catalog("PK/UK/FK information"))?;
        Ok(rows.into_iter().map(constraint_row).collect())
    }

    async fn columns(&self, table: &str) -> GenResult<Vec<ColumnRow>> {
        let rows = sqlx::query_as::<_, ColumnTuple>(PG_COLUMNS)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(GenError::catalog("column information"))?;
        Ok(rows.into_iter().map(column_row).collect())
    }
}
