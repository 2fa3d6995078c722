use serde::Serialize;

use crate::db::{Column, Table};
use crate::errors::GenResult;
use crate::generate::{GenOptions, OnOpenError, Writer, usable_tables};
use crate::render::Templates;

/// One `valid.<func>(v.<field>, "<column>").Message("<message>")` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationRule {
    pub func: &'static str,
    pub field: String,
    pub column: String,
    pub message: String,
}

/// `Required` for every non-null column the client is expected to send.
pub fn validation_rules(table: &Table) -> Vec<ValidationRule> {
    table
        .columns
        .iter()
        .filter(|c| !c.tag.null && !table.is_primary_key(c) && !c.is_audit())
        .map(|c| ValidationRule {
            func: "Required",
            field: c.name.clone(),
            column: c.db_name().to_string(),
            message: format!("{} is required", c.db_name()),
        })
        .collect()
}

#[derive(Serialize)]
struct FilterContext<'a> {
    model_name: String,
    pkg_path: &'a str,
    runtime_pkg: &'a str,
    imports_time: bool,
    imports_models: bool,
    rules: Vec<ValidationRule>,
    input_fields: Vec<String>,
}

/// Field line of an input struct. Linked foreign keys point into the
/// models package.
fn input_field(col: &Column) -> String {
    match col.go_type.strip_prefix('*') {
        Some(model) if col.tag.rel_fk => format!("{} *models.{} {}", col.name, model, col.tag),
        _ => col.to_string(),
    }
}

pub fn render_filter(table: &Table, templates: &Templates, opts: &GenOptions) -> GenResult<String> {
    let inputs: Vec<&Column> = table
        .columns
        .iter()
        .filter(|c| !table.is_primary_key(c) && !c.is_audit())
        .collect();
    templates.render(
        "filter.go.j2",
        FilterContext {
            model_name: table.model_name(),
            pkg_path: &opts.pkg_path,
            runtime_pkg: &opts.runtime_pkg,
            imports_time: inputs.iter().any(|c| c.go_type == "time.Time"),
            imports_models: inputs.iter().any(|c| c.tag.rel_fk),
            rules: validation_rules(table),
            input_fields: inputs.into_iter().map(input_field).collect(),
        },
    )
}

pub(super) fn write_filters(
    tables: &[Table],
    templates: &Templates,
    opts: &GenOptions,
    writer: &mut Writer<'_>,
) -> GenResult<()> {
    let dir = opts.filters_dir();
    for table in usable_tables(tables) {
        let source = render_filter(table, templates, opts)?;
        let path = dir.join(format!("{}Filter.go", table.model_name()));
        writer.write(&path, &source, OnOpenError::Skip)?;
    }
    Ok(())
}
