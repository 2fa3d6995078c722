mod common;

use apigen::db::{Table, read_schema};
use common::shop;

fn find<'a>(tables: &'a [Table], name: &str) -> &'a Table {
    tables.iter().find(|t| t.name == name).unwrap()
}

#[tokio::test]
async fn test_constraints_read_before_any_column() {
    let catalog = shop();
    read_schema(&catalog, &[]).await.unwrap();

    let calls = catalog.calls.borrow();
    let last_constraint = calls.iter().rposition(|c| c.starts_with("constraints:")).unwrap();
    let first_column = calls.iter().position(|c| c.starts_with("columns:")).unwrap();
    assert!(last_constraint < first_column, "{:?}", calls);
    assert_eq!(calls.len(), 8);
}

#[tokio::test]
async fn test_fk_to_keyless_table_is_scalar() {
    let tables = read_schema(&shop(), &[]).await.unwrap();

    let shipments = find(&tables, "shipments");
    let item_ref = shipments.columns.iter().find(|c| c.name == "ItemRef").unwrap();
    assert_eq!(item_ref.go_type, "int");
    assert!(!item_ref.tag.rel_fk);

    let orders = find(&tables, "orders");
    let user = orders.columns.iter().find(|c| c.name == "UserId").unwrap();
    assert_eq!(user.go_type, "*Users");
    assert!(user.tag.rel_fk);
    assert!(orders.imports_time);
}

#[tokio::test]
async fn test_keys_and_renames() {
    let tables = read_schema(&shop(), &[]).await.unwrap();

    let users = find(&tables, "users");
    assert_eq!(users.columns[0].name, "Id");
    assert_eq!(users.columns[0].go_type, "int");
    assert!(users.columns[0].tag.auto);
    assert_eq!(
        users.columns[1].to_string(),
        "Email string `json:\"email\" gorm:\"column:email;size:128\" description:\"Email address\"`"
    );

    let items = find(&tables, "order_items");
    assert!(!items.has_primary_key());
    let names: Vec<_> = items.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["OrderId", "ItemId", "Id_RENAME", "Qty"]);
    assert_eq!(items.columns[3].go_type, "uint16");
}

#[tokio::test]
async fn test_selected_tables_only() {
    let catalog = shop();
    let tables = read_schema(&catalog, &["orders".to_string()]).await.unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(catalog.calls.borrow().len(), 2);

    // users was not read in this run, so nothing marks it unusable
    let user = tables[0].columns.iter().find(|c| c.name == "UserId").unwrap();
    assert_eq!(user.go_type, "*Users");
}
