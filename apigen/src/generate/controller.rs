use serde::Serialize;

use crate::db::{Column, Table, is_go_integer};
use crate::errors::GenResult;
use crate::generate::{GenOptions, Notice, OnOpenError, Writer, usable_tables};
use crate::naming::url_style;
use crate::render::Templates;

/// Statements filling the audit columns before a save.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AuditStatements {
    pub create: Vec<String>,
    pub update: Vec<String>,
    /// Extra imports the statements need, sorted.
    pub imports: Vec<&'static str>,
}

impl AuditStatements {
    fn import(&mut self, pkg: &'static str) {
        if !self.imports.contains(&pkg) {
            self.imports.push(pkg);
            self.imports.sort();
        }
    }

    fn timestamp(&mut self, col: &Column) -> Option<String> {
        let stmt = if col.go_type == "time.Time" {
            format!("v.{} = time.Now()", col.name)
        } else if is_go_integer(&col.go_type) {
            format!("v.{} = {}(time.Now().Unix())", col.name, col.go_type)
        } else {
            return None;
        };
        self.import("time");
        Some(stmt)
    }

    fn actor(&mut self, col: &Column) -> String {
        if col.go_type == "int" {
            self.import("strconv");
            format!("v.{}, _ = strconv.Atoi(c.User.GetId())", col.name)
        } else if is_go_integer(&col.go_type) {
            self.import("strconv");
            format!(
                "if id, err := strconv.ParseInt(c.User.GetId(), 10, 64); err == nil {{ v.{} = {}(id) }}",
                col.name, col.go_type
            )
        } else {
            format!("v.{} = c.User.GetId()", col.name)
        }
    }
}

/// Create fills all four audit columns, update only the `Updated*` pair.
pub fn audit_statements(table: &Table) -> AuditStatements {
    let mut out = AuditStatements::default();
    for col in &table.columns {
        match col.name.as_str() {
            "CreatedAt" => {
                if let Some(stmt) = out.timestamp(col) {
                    out.create.push(stmt);
                }
            }
            "CreatedBy" => {
                let stmt = out.actor(col);
                out.create.push(stmt);
            }
            "UpdatedAt" => {
                if let Some(stmt) = out.timestamp(col) {
                    out.create.push(stmt.clone());
                    out.update.push(stmt);
                }
            }
            "UpdatedBy" => {
                let stmt = out.actor(col);
                out.create.push(stmt.clone());
                out.update.push(stmt);
            }
            _ => {}
        }
    }
    out
}

#[derive(Serialize)]
struct ControllerContext<'a> {
    ctrl_name: String,
    pkg_path: &'a str,
    runtime_pkg: &'a str,
    imports: Vec<&'static str>,
    create_auto: Vec<String>,
    update_auto: Vec<String>,
}

#[derive(Serialize)]
struct OperateContext {
    ctrl_name: String,
    page_url: String,
}

pub fn render_controller(table: &Table, templates: &Templates, opts: &GenOptions) -> GenResult<String> {
    let audit = audit_statements(table);
    templates.render(
        "controller.go.j2",
        ControllerContext {
            ctrl_name: table.model_name(),
            pkg_path: &opts.pkg_path,
            runtime_pkg: &opts.runtime_pkg,
            imports: audit.imports,
            create_auto: audit.create,
            update_auto: audit.update,
        },
    )
}

pub(super) fn write_controllers(
    tables: &[Table],
    templates: &Templates,
    opts: &GenOptions,
    writer: &mut Writer<'_>,
) -> GenResult<Option<Notice>> {
    let dir = opts.controllers_dir();
    let mut operate_list = Vec::new();
    for table in usable_tables(tables) {
        let source = render_controller(table, templates, opts)?;
        let path = dir.join(format!("{}Controller.go", table.model_name()));
        writer.write(&path, &source, OnOpenError::Skip)?;

        operate_list.push(templates.render(
            "operate_list.go.j2",
            OperateContext {
                ctrl_name: table.model_name(),
                page_url: url_style(&table.name),
            },
        )?);
    }
    if operate_list.is_empty() {
        return Ok(None);
    }
    Ok(Some(Notice::new("add to operate list:", operate_list.concat())))
}
