use std::collections::HashSet;

use crate::db::interfaces::{ColumnRow, ConstraintRow, Introspect};
use crate::db::models::{Column, ForeignKey, OrmTag, Table};
use crate::db::types::{
    extract_col_size, extract_decimal, extract_int_signedness, is_decimal, is_integer_family,
    Dialect,
};
use crate::errors::GenResult;
use crate::naming::camel_case;

/// Tables without a usable single-column primary key.
pub type Blacklist = HashSet<String>;

/// Folds PK/UK/FK rows into `table`, blacklisting it when the key is composite or absent.
pub fn apply_constraints(table: &mut Table, rows: &[ConstraintRow], blacklist: &mut Blacklist) {
    for row in rows {
        match row.constraint_type.as_str() {
            "PRIMARY KEY" => {
                if row.ordinal_position == "1" && !blacklist.contains(&table.name) {
                    table.primary_key = row.column_name.clone();
                } else {
                    table.primary_key.clear();
                    blacklist.insert(table.name.clone());
                }
            }
            "UNIQUE" => {
                if !table.unique_keys.contains(&row.column_name) {
                    table.unique_keys.push(row.column_name.clone());
                }
            }
            "FOREIGN KEY" => {
                table.foreign_keys.insert(
                    row.column_name.clone(),
                    ForeignKey {
                        name: row.column_name.clone(),
                        ref_schema: row.ref_schema.clone(),
                        ref_table: row.ref_table.clone(),
                        ref_column: row.ref_column.clone(),
                    },
                );
            }
            _ => {}
        }
    }
    if !table.has_primary_key() {
        blacklist.insert(table.name.clone());
    }
}

/// Builds the column descriptor for one catalog row.
pub fn resolve_column(
    dialect: Dialect,
    table: &mut Table,
    row: &ColumnRow,
    blacklist: &Blacklist,
) -> GenResult<Column> {
    let mut tag = OrmTag {
        column: row.name.clone(),
        comment: row.comment.clone(),
        ..Default::default()
    };

    if table.has_primary_key() && table.primary_key == row.name {
        if row.auto_increment() {
            tag.auto = true;
        } else {
            tag.pk = true;
        }
        return Ok(Column {
            name: "Id".to_string(),
            go_type: "int".to_string(),
            tag,
        });
    }

    if let Some(fk) = table.foreign_keys.get(&row.name) {
        if !blacklist.contains(&fk.ref_table) {
            tag.rel_fk = true;
            return Ok(Column {
                name: camel_case(&row.name),
                go_type: format!("*{}", camel_case(&fk.ref_table)),
                tag,
            });
        }
    }

    let data_type = row.data_type.as_str();
    let mut go_type = dialect.go_type(data_type)?.to_string();
    let name = if row.name == "id" {
        "Id_RENAME".to_string()
    } else {
        camel_case(&row.name)
    };

    tag.null = row.nullable();
    tag.unique = table.unique_keys.contains(&row.name);
    if !dialect.is_temporal(data_type) && !row.extra.contains("DEFAULT_GENERATED") {
        tag.default = dialect.literal_default(&row.default);
    }

    if dialect.has_unsigned_variants() && is_integer_family(data_type) && !row.auto_increment() {
        let sign = extract_int_signedness(&row.column_type)?;
        if sign.split_whitespace().any(|t| t == "unsigned") {
            go_type = dialect.go_type(&format!("{} unsigned", data_type))?.to_string();
        }
    }
    if dialect.is_sized(data_type) {
        tag.size = Some(extract_col_size(&row.column_type)?);
    }
    if dialect.is_temporal(data_type) {
        tag.db_type = Some(data_type.to_string());
        if row.defaults_to_now() && row.updates_to_now() {
            tag.auto_now = true;
        } else if row.defaults_to_now() {
            tag.auto_now_add = true;
        }
        table.imports_time = true;
    }
    if is_decimal(data_type) {
        let (digits, decimals) = extract_decimal(&row.column_type)?;
        tag.digits = Some(digits);
        tag.decimals = Some(decimals);
    }
    if dialect.is_opaque(data_type) {
        tag.db_type = Some(data_type.to_string());
    }

    Ok(Column { name, go_type, tag })
}

/// Resolves every column of `table` in catalog order.
pub fn apply_columns(
    dialect: Dialect,
    table: &mut Table,
    rows: &[ColumnRow],
    blacklist: &Blacklist,
) -> GenResult<()> {
    for row in rows {
        let column = resolve_column(dialect, table, row, blacklist)?;
        table.columns.push(column);
    }
    Ok(())
}

/// Reads table descriptors from the catalog.
///
/// Constraints of every table are resolved before any column so that foreign
/// keys see the complete blacklist. An empty `selected` list means all tables.
pub async fn read_schema<I: Introspect>(catalog: &I, selected: &[String]) -> GenResult<Vec<Table>> {
    let names = if selected.is_empty() {
        catalog.table_names().await?
    } else {
        selected.to_vec()
    };

    let mut blacklist = Blacklist::new();
    let mut tables = Vec::with_capacity(names.len());
    for name in names {
        let mut table = Table::new(name);
        let rows = catalog.constraints(&table.name).await?;
        apply_constraints(&mut table, &rows, &mut blacklist);
        tables.push(table);
    }

    for table in tables.iter_mut() {
        let rows = catalog.columns(&table.name).await?;
        apply_columns(catalog.dialect(), table, &rows, &blacklist)?;
        tracing::debug!(
            "Resolved table {} ({} columns, pk '{}')",
            table.name,
            table.columns.len(),
            table.primary_key
        );
    }

    if !blacklist.is_empty() {
        let mut skipped: Vec<_> = blacklist.iter().map(String::as_str).collect();
        skipped.sort();
        tracing::warn!(
            "Tables without a single-column primary key get model files only: {}",
            skipped.join(", ")
        );
    }

    Ok(tables)
}
