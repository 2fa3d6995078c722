#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use apigen::GenResult;
use apigen::db::{ColumnRow, ConstraintRow, Dialect, Introspect};

/// In-memory catalog that records the order of its queries.
#[derive(Default)]
pub struct FakeCatalog {
    pub tables: Vec<String>,
    pub constraints: HashMap<String, Vec<ConstraintRow>>,
    pub columns: HashMap<String, Vec<ColumnRow>>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeCatalog {
    pub fn table(mut self, name: &str, constraints: Vec<ConstraintRow>, columns: Vec<ColumnRow>) -> Self {
        self.tables.push(name.to_string());
        self.constraints.insert(name.to_string(), constraints);
        self.columns.insert(name.to_string(), columns);
        self
    }
}

impl Introspect for FakeCatalog {
    fn dialect(&self) -> Dialect {
        Dialect::Mysql
    }

    async fn table_names(&self) -> GenResult<Vec<String>> {
        Ok(self.tables.clone())
    }

    async fn constraints(&self, table: &str) -> GenResult<Vec<ConstraintRow>> {
        self.calls.borrow_mut().push(format!("constraints:{}", table));
        Ok(self.constraints.get(table).cloned().unwrap_or_default())
    }

    async fn columns(&self, table: &str) -> GenResult<Vec<ColumnRow>> {
        self.calls.borrow_mut().push(format!("columns:{}", table));
        Ok(self.columns.get(table).cloned().unwrap_or_default())
    }
}

pub fn pk(column: &str, pos: &str) -> ConstraintRow {
    ConstraintRow {
        constraint_type: "PRIMARY KEY".into(),
        column_name: column.into(),
        ordinal_position: pos.into(),
        ..Default::default()
    }
}

pub fn fk(column: &str, ref_table: &str) -> ConstraintRow {
    ConstraintRow {
        constraint_type: "FOREIGN KEY".into(),
        column_name: column.into(),
        ref_schema: "shop".into(),
        ref_table: ref_table.into(),
        ref_column: "id".into(),
        ordinal_position: "1".into(),
    }
}

pub fn col(name: &str, data_type: &str, column_type: &str, nullable: bool) -> ColumnRow {
    ColumnRow {
        name: name.into(),
        data_type: data_type.into(),
        column_type: column_type.into(),
        is_nullable: if nullable { "YES" } else { "NO" }.into(),
        ..Default::default()
    }
}

pub fn auto_id() -> ColumnRow {
    ColumnRow {
        extra: "auto_increment".into(),
        ..col("id", "int", "int(11)", false)
    }
}

/// A small shop schema. `shipments` is listed before the keyless
/// `order_items` table it references.
pub fn shop() -> FakeCatalog {
    let mut email = col("email", "varchar", "varchar(128)", false);
    email.comment = "Email address".into();
    let mut placed_at = col("placed_at", "datetime", "datetime", false);
    placed_at.default = "CURRENT_TIMESTAMP".into();

    FakeCatalog::default()
        .table(
            "shipments",
            vec![pk("id", "1"), fk("item_ref", "order_items")],
            vec![
                auto_id(),
                col("item_ref", "int", "int(11)", false),
                col("note", "text", "text", true),
            ],
        )
        .table(
            "users",
            vec![pk("id", "1")],
            vec![
                auto_id(),
                email,
                col("nick", "varchar", "varchar(32)", true),
                col("created_at", "int", "int(11)", false),
                col("created_by", "int", "int(11)", false),
                col("updated_at", "int", "int(11)", false),
                col("updated_by", "int", "int(11)", false),
            ],
        )
        .table(
            "orders",
            vec![pk("id", "1"), fk("user_id", "users")],
            vec![
                auto_id(),
                col("user_id", "int", "int(11)", false),
                col("total", "decimal", "decimal(10,2)", false),
                placed_at,
            ],
        )
        .table(
            "order_items",
            vec![pk("order_id", "1"), pk("item_id", "2"), fk("order_id", "orders")],
            vec![
                col("order_id", "int", "int(11)", false),
                col("item_id", "int", "int(11)", false),
                col("id", "int", "int(11)", false),
                col("qty", "smallint", "smallint(5) unsigned", false),
            ],
        )
}

/// Every regular file under `root` with its contents, sorted by path.
pub fn snapshot(root: &Path) -> Vec<(String, String)> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<(String, String)>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                let rel = path.strip_prefix(root).unwrap().to_string_lossy().into_owned();
                out.push((rel, std::fs::read_to_string(&path).unwrap()));
            }
        }
    }
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}
