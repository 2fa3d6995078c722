#![allow(async_fn_in_trait)]

use crate::db::types::Dialect;
use crate::errors::GenResult;

/// One row of the PK/UK/FK catalog query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintRow {
    pub constraint_type: String,
    pub column_name: String,
    pub ref_schema: String,
    pub ref_table: String,
    pub ref_column: String,
    pub ordinal_position: String,
}

/// One row of the column catalog query. `column_type` is the full type
/// (`int(11) unsigned`), `data_type` the base name (`int`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRow {
    pub name: String,
    pub data_type: String,
    pub column_type: String,
    pub is_nullable: String,
    pub default: String,
    pub extra: String,
    pub comment: String,
}

impl ColumnRow {
    pub fn nullable(&self) -> bool {
        self.is_nullable == "YES"
    }

    pub fn auto_increment(&self) -> bool {
        self.extra.contains("auto_increment")
    }

    pub fn defaults_to_now(&self) -> bool {
        self.default.eq_ignore_ascii_case("CURRENT_TIMESTAMP")
    }

    pub fn updates_to_now(&self) -> bool {
        self.extra.contains("on update CURRENT_TIMESTAMP")
    }
}

/// Catalog access for one database engine.
pub trait Introspect {
    fn dialect(&self) -> Dialect;

    /// All base tables of the connected schema, in catalog order.
    async fn table_names(&self) -> GenResult<Vec<String>>;

    async fn constraints(&self, table: &str) -> GenResult<Vec<ConstraintRow>>;

    /// Column definitions ordered by ordinal position.
    async fn columns(&self, table: &str) -> GenResult<Vec<ColumnRow>>;
}
