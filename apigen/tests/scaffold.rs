mod common;

use apigen::db::{Dialect, read_schema};
use apigen::generate::{Artifacts, Assume, DEFAULT_RUNTIME_PKG, GenOptions, generate};
use apigen::render::Templates;
use apigen::scaffold::{SkeletonOptions, scaffold};
use common::shop;

fn blank(root: &std::path::Path) -> SkeletonOptions {
    SkeletonOptions {
        app_dir: root.join("shop"),
        app_name: "shop".into(),
        pkg_path: "example.com/shop".into(),
        runtime_pkg: DEFAULT_RUNTIME_PKG.into(),
        driver: Dialect::Mysql,
        conn: None,
        gofmt: false,
    }
}

#[test]
fn test_blank_skeleton_layout() {
    let dir = tempfile::tempdir().unwrap();
    let opts = blank(dir.path());
    let report = scaffold(&opts, &Templates::builtin().unwrap(), &mut Assume(true)).unwrap();

    let app = &opts.app_dir;
    for file in [
        "conf/app.conf",
        "conf/app_local.conf",
        "main.go",
        ".gitignore",
        "Dockerfile",
        ".dockerignore",
        "bee.json",
        "routers/router.go",
    ] {
        assert!(app.join(file).is_file(), "{}", file);
    }
    for d in ["controllers", "models", "tests"] {
        assert!(app.join(d).is_dir(), "{}", d);
    }
    assert_eq!(report.written.len(), 8);

    let router = std::fs::read_to_string(app.join("routers/router.go")).unwrap();
    assert!(!router.contains("/controllers\""));
    assert!(router.contains("beego.NewNamespace(\"/v1\""));

    let conf = std::fs::read_to_string(app.join("conf/app.conf")).unwrap();
    assert!(conf.starts_with("appname = shop\n"));
    assert!(!conf.contains("sqlconn"));

    let bee: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(app.join("bee.json")).unwrap()).unwrap();
    assert_eq!(bee["database"]["driver"], "mysql");
}

#[test]
fn test_rescaffold_declined_keeps_files() {
    let dir = tempfile::tempdir().unwrap();
    let opts = blank(dir.path());
    let templates = Templates::builtin().unwrap();
    scaffold(&opts, &templates, &mut Assume(true)).unwrap();
    std::fs::write(opts.app_dir.join("main.go"), "package main\n").unwrap();

    let report = scaffold(&opts, &templates, &mut Assume(false)).unwrap();
    assert!(report.written.is_empty());
    assert_eq!(report.skipped.len(), 8);
    assert_eq!(
        std::fs::read_to_string(opts.app_dir.join("main.go")).unwrap(),
        "package main\n"
    );
}

#[tokio::test]
async fn test_generate_into_blank_skeleton_reports_router_entries() {
    let dir = tempfile::tempdir().unwrap();
    let skeleton = blank(dir.path());
    let templates = Templates::builtin().unwrap();
    scaffold(&skeleton, &templates, &mut Assume(true)).unwrap();
    let router = std::fs::read_to_string(skeleton.app_dir.join("routers/router.go")).unwrap();

    let tables = read_schema(&shop(), &[]).await.unwrap();
    let opts = GenOptions::new(&skeleton.app_dir, "example.com/shop");
    let artifacts = Artifacts::MODEL | Artifacts::CONTROLLER | Artifacts::ROUTER;
    let report = generate(&tables, artifacts, &templates, &opts, &mut Assume(true)).unwrap();

    assert_eq!(
        std::fs::read_to_string(skeleton.app_dir.join("routers/router.go")).unwrap(),
        router
    );
    assert!(report.notices.iter().any(|n| n.title == "add to routers/router.go"));
    assert!(skeleton.app_dir.join("models/UsersModel.go").is_file());
}
