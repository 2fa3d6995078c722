mod executor;
mod interfaces;
mod models;
mod resolve;
mod types;

pub use executor::{MysqlCatalog, PostgresCatalog};
pub use interfaces::{ColumnRow, ConstraintRow, Introspect};
pub use models::{AUDIT_COLUMNS, Column, ForeignKey, OrmTag, Table};
pub use resolve::{Blacklist, apply_columns, apply_constraints, read_schema, resolve_column};
pub use types::{
    Dialect, MYSQL_TYPES, POSTGRES_TYPES, extract_col_size, extract_decimal,
    extract_int_signedness, is_go_float, is_go_integer,
};
