use serde::Serialize;

use crate::db::Table;
use crate::errors::GenResult;
use crate::generate::{GenOptions, Notice, OnOpenError, Writer, usable_tables};
use crate::naming::url_style;
use crate::render::Templates;

#[derive(Serialize)]
struct NamespaceContext {
    name_space: String,
    ctrl_name: String,
}

#[derive(Serialize)]
struct RouterContext<'a> {
    pkg_path: &'a str,
    namespaces: &'a str,
}

/// One `beego.NSNamespace` block per keyed table, concatenated.
pub fn render_namespaces(tables: &[Table], templates: &Templates) -> GenResult<String> {
    let mut out = String::new();
    for table in usable_tables(tables) {
        out.push_str(&templates.render(
            "namespace.go.j2",
            NamespaceContext {
                name_space: url_style(&table.name),
                ctrl_name: table.model_name(),
            },
        )?);
    }
    Ok(out)
}

pub fn render_router(pkg_path: &str, namespaces: &str, templates: &Templates) -> GenResult<String> {
    templates.render(
        "router.go.j2",
        RouterContext {
            pkg_path,
            namespaces,
        },
    )
}

/// An existing `routers/router.go` is never touched; its entries are handed
/// back as a notice instead.
pub(super) fn write_router(
    tables: &[Table],
    templates: &Templates,
    opts: &GenOptions,
    writer: &mut Writer<'_>,
) -> GenResult<Option<Notice>> {
    let namespaces = render_namespaces(tables, templates)?;
    let path = opts.routers_dir().join("router.go");

    if path.exists() {
        tracing::warn!("Skipped create file '{}'", path.display());
        writer.skip(&path);
        if namespaces.is_empty() {
            return Ok(None);
        }
        return Ok(Some(Notice::new("add to routers/router.go", namespaces)));
    }

    let source = render_router(&opts.pkg_path, &namespaces, templates)?;
    writer.write(&path, &source, OnOpenError::Skip)?;
    Ok(None)
}
