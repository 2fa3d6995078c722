use serde::Serialize;

use crate::db::Table;
use crate::errors::GenResult;
use crate::generate::{GenOptions, OnOpenError, Writer};
use crate::render::Templates;

#[derive(Serialize)]
struct ModelContext<'a> {
    model_name: String,
    table_name: &'a str,
    struct_source: String,
    imports_time: bool,
    runtime_pkg: &'a str,
}

/// Full CRUD model for keyed tables, bare struct otherwise.
pub fn render_model(table: &Table, templates: &Templates, runtime_pkg: &str) -> GenResult<String> {
    let template = if table.has_primary_key() {
        "model.go.j2"
    } else {
        "struct_model.go.j2"
    };
    templates.render(
        template,
        ModelContext {
            model_name: table.model_name(),
            table_name: &table.name,
            struct_source: table.struct_source(),
            imports_time: table.imports_time,
            runtime_pkg,
        },
    )
}

pub(super) fn write_models(
    tables: &[Table],
    templates: &Templates,
    opts: &GenOptions,
    writer: &mut Writer<'_>,
) -> GenResult<()> {
    let dir = opts.models_dir();
    for table in tables {
        let source = render_model(table, templates, &opts.runtime_pkg)?;
        let path = dir.join(format!("{}Model.go", table.model_name()));
        writer.write(&path, &source, OnOpenError::Abort)?;
    }
    Ok(())
}
