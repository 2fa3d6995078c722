//! Blank beego application layout for `apigen api <app>`.

use std::path::PathBuf;

use serde::Serialize;

use crate::db::Dialect;
use crate::errors::{GenError, GenResult};
use crate::generate::{
    Confirm, GenerationReport, OnOpenError, Writer, ensure_dir, render_router,
};
use crate::render::Templates;

#[derive(Debug, Clone)]
pub struct SkeletonOptions {
    pub app_dir: PathBuf,
    pub app_name: String,
    pub pkg_path: String,
    pub runtime_pkg: String,
    pub driver: Dialect,
    /// With a connection the application is generated from the schema
    /// afterwards, so no sample router or models directory is laid down.
    pub conn: Option<String>,
    pub gofmt: bool,
}

#[derive(Serialize)]
struct AppContext<'a> {
    app_name: &'a str,
    pkg_path: &'a str,
    runtime_pkg: &'a str,
    conn: Option<&'a str>,
    driver: &'a str,
    driver_pkg: &'a str,
}

#[derive(Serialize)]
struct BeeDatabase<'a> {
    driver: &'a str,
    conn: &'a str,
    prefix: &'a str,
}

/// `bee.json` run configuration.
#[derive(Serialize)]
struct BeeConfig<'a> {
    version: u32,
    database: BeeDatabase<'a>,
    cmd_args: Vec<String>,
    enable_reload: bool,
}

fn bee_json(opts: &SkeletonOptions) -> GenResult<String> {
    let config = BeeConfig {
        version: 0,
        database: BeeDatabase {
            driver: opts.driver.name(),
            conn: opts
                .conn
                .as_deref()
                .unwrap_or("user:password@tcp(localhost:3306)/dbname"),
            prefix: "",
        },
        cmd_args: vec![],
        enable_reload: true,
    };
    let mut out = serde_json::to_string_pretty(&config)
        .map_err(|e| GenError::Config(format!("Could not encode bee.json: {}", e)))?;
    out.push('\n');
    Ok(out)
}

pub fn scaffold(
    opts: &SkeletonOptions,
    templates: &Templates,
    confirm: &mut dyn Confirm,
) -> GenResult<GenerationReport> {
    tracing::info!("Creating API...");
    let root = &opts.app_dir;
    for dir in ["conf", "controllers", "tests"] {
        ensure_dir(&root.join(dir))?;
    }

    let ctx = AppContext {
        app_name: &opts.app_name,
        pkg_path: &opts.pkg_path,
        runtime_pkg: &opts.runtime_pkg,
        conn: opts.conn.as_deref(),
        driver: opts.driver.name(),
        driver_pkg: opts.driver.go_driver_pkg(),
    };
    let main_template = if opts.conn.is_some() {
        "skeleton/main_conn.go.j2"
    } else {
        "skeleton/main.go.j2"
    };

    let mut files = vec![
        (root.join("conf").join("app.conf"), templates.render("skeleton/app.conf.j2", &ctx)?),
        (
            root.join("conf").join("app_local.conf"),
            templates.render("skeleton/app_local.conf.j2", &ctx)?,
        ),
        (root.join("main.go"), templates.render(main_template, &ctx)?),
        (root.join(".gitignore"), templates.render("skeleton/gitignore.j2", &ctx)?),
        (root.join("Dockerfile"), templates.render("skeleton/Dockerfile.j2", &ctx)?),
        (root.join(".dockerignore"), templates.render("skeleton/dockerignore.j2", &ctx)?),
        (root.join("bee.json"), bee_json(opts)?),
    ];

    if opts.conn.is_none() {
        ensure_dir(&root.join("models"))?;
        ensure_dir(&root.join("routers"))?;
        files.push((
            root.join("routers").join("router.go"),
            render_router(&opts.pkg_path, "", templates)?,
        ));
    }

    let mut writer = Writer::new(confirm, opts.gofmt);
    for (path, contents) in &files {
        writer.write(path, contents, OnOpenError::Abort)?;
    }
    let (written, skipped) = writer.finish();
    Ok(GenerationReport {
        written,
        skipped,
        notices: vec![],
    })
}
