mod common;

use std::path::Path;

use apigen::db::read_schema;
use apigen::generate::{Artifacts, Assume, GenOptions, generate, render_filter};
use apigen::render::Templates;
use common::{shop, snapshot};

async fn run(root: &Path, level: &str, overwrite: bool) -> apigen::generate::GenerationReport {
    let tables = read_schema(&shop(), &[]).await.unwrap();
    let templates = Templates::builtin().unwrap();
    let opts = GenOptions::new(root, "example.com/shop");
    let artifacts = Artifacts::from_level(level).unwrap();
    generate(&tables, artifacts, &templates, &opts, &mut Assume(overwrite)).unwrap()
}

fn read(root: &Path, rel: &str) -> String {
    std::fs::read_to_string(root.join(rel)).unwrap()
}

#[tokio::test]
async fn test_keyless_table_gets_model_only() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    run(root, "4", true).await;

    let model = read(root, "models/OrderItemsModel.go");
    assert!(model.contains("type OrderItems struct"));
    assert!(!model.contains("func AddOrderItems"));

    assert!(!root.join("controllers/OrderItemsController.go").exists());
    assert!(!root.join("filters/OrderItemsFilter.go").exists());
    assert!(!root.join("vue/src/components/orderItems").exists());
    assert!(!read(root, "routers/router.go").contains("OrderItems"));

    assert!(root.join("controllers/ShipmentsController.go").exists());
    assert!(root.join("vue/src/components/shipments/ColSettingComponent.vue").exists());
}

#[tokio::test]
async fn test_level_limits_categories() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let report = run(root, "1", true).await;

    assert_eq!(report.written.len(), 4);
    assert!(report.notices.is_empty());
    assert!(!root.join("controllers").exists());
    assert!(!root.join("routers").exists());
}

#[tokio::test]
async fn test_audit_columns_in_controller() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    run(root, "2", true).await;

    let src = read(root, "controllers/UsersController.go");
    let (post, put) = src.split_once("func (c *UsersController) Put()").unwrap();
    assert!(post.contains("v.CreatedAt = int(time.Now().Unix())"));
    assert!(post.contains("v.CreatedBy, _ = strconv.Atoi(c.User.GetId())"));
    assert!(post.contains("v.UpdatedBy, _ = strconv.Atoi(c.User.GetId())"));
    assert!(put.contains("v.UpdatedAt = int(time.Now().Unix())"));
    assert!(put.contains("v.UpdatedBy, _ = strconv.Atoi(c.User.GetId())"));
    assert!(!put.contains("v.CreatedAt"));
    assert!(!put.contains("v.CreatedBy"));
    assert!(src.contains("\t\"strconv\"\n\t\"time\"\n"));

    let orders = read(root, "controllers/OrdersController.go");
    assert!(!orders.contains("\"time\""));

    let filter = read(root, "filters/UsersFilter.go");
    assert!(filter.contains("valid.Required(v.Email, \"email\")"));
    assert!(!filter.contains("valid.Required(v.CreatedAt"));
}

#[tokio::test]
async fn test_notices() {
    let dir = tempfile::tempdir().unwrap();
    let report = run(dir.path(), "4", true).await;

    let titles: Vec<_> = report.notices.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["add to operate list:", "add to vue/src/router/index.js", "add to vue menu"]
    );
    assert!(report.notices[0].body.contains("RightName:   \"Users-create\""));
    assert!(report.notices[1].body.contains("path: '/users/index'"));
    assert!(report.notices[2].body.contains("{\"name\":\"Orders\",\"url\":\"/orders/index\",\"icon\":\"bars\"}"));
    assert!(!report.notices[2].body.contains("OrderItems"));
}

#[tokio::test]
async fn test_existing_router_is_never_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("routers")).unwrap();
    std::fs::write(root.join("routers/router.go"), "package routers\n").unwrap();

    let report = run(root, "3", true).await;
    assert_eq!(read(root, "routers/router.go"), "package routers\n");
    assert!(report.skipped.contains(&root.join("routers/router.go")));

    let notice = report
        .notices
        .iter()
        .find(|n| n.title == "add to routers/router.go")
        .unwrap();
    assert!(notice.body.contains("beego.NSNamespace(\"/users\","));
    assert!(notice.body.contains("&controllers.ShipmentsController{},"));
}

#[tokio::test]
async fn test_declined_rerun_leaves_tree_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let first = run(root, "4", true).await;
    let before = snapshot(root);
    assert_eq!(before.len(), first.written.len());

    let second = run(root, "4", false).await;
    assert!(second.written.is_empty());
    assert_eq!(second.skipped.len(), first.written.len());
    assert_eq!(snapshot(root), before);
}

#[tokio::test]
async fn test_accepted_rerun_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    run(root, "2", true).await;
    let before = snapshot(root);
    run(root, "2", true).await;
    assert_eq!(snapshot(root), before);
}

#[tokio::test]
async fn test_orders_filter_imports_what_its_inputs_use() {
    let tables = read_schema(&shop(), &[]).await.unwrap();
    let orders = tables.iter().find(|t| t.name == "orders").unwrap();
    let templates = Templates::builtin().unwrap();
    let opts = GenOptions::new("shop", "example.com/shop");
    let src = render_filter(orders, &templates, &opts).unwrap();

    let (imports, body) = src.split_once(")\n").unwrap();
    assert!(imports.contains("\t\"time\"\n"));
    assert!(imports.contains("\t\"example.com/shop/models\"\n"));
    assert!(body.contains("\tUserId *models.Users `json:\"user_id\""));
    assert!(body.contains("\tPlacedAt time.Time `json:\"placed_at\""));
    assert!(!body.contains(" *Users "));
}
