use serde::Serialize;

use crate::db::{Column, Table, is_go_float, is_go_integer};
use crate::errors::GenResult;
use crate::generate::{GenOptions, Notice, OnOpenError, Writer, ensure_dir, usable_tables};
use crate::naming::{lower_camel_case, url_style};
use crate::render::Templates;

/// List columns shown before the user opens the column settings.
pub const VISIBLE_COLUMNS: usize = 7;

#[derive(Serialize)]
struct ListColumn<'a> {
    title: &'a str,
    field: &'a str,
    show: bool,
}

#[derive(Serialize)]
struct SelectOption<'a> {
    value: &'a str,
    label: &'a str,
}

#[derive(Serialize)]
struct FormField<'a> {
    field: &'a str,
    label: &'a str,
    disabled: bool,
}

#[derive(Serialize)]
struct FormDefault<'a> {
    field: &'a str,
    default: &'a str,
}

#[derive(Serialize)]
struct FormRule<'a> {
    field: &'a str,
    label: &'a str,
    required: bool,
    length: Option<&'a str>,
    kind: Option<&'static str>,
}

#[derive(Serialize)]
struct SubmitItem<'a> {
    field: &'a str,
    parse: Option<&'static str>,
}

#[derive(Serialize)]
struct IndexContext<'a> {
    table_name: &'a str,
    pk: &'a str,
    page_url: &'a str,
    list_columns: Vec<ListColumn<'a>>,
    select_options: Vec<SelectOption<'a>>,
    time_columns: Vec<&'a str>,
}

#[derive(Serialize)]
struct CreateContext<'a> {
    table_name: &'a str,
    page_url: &'a str,
    form_fields: Vec<FormField<'a>>,
    custom_fields: Vec<FormDefault<'a>>,
    rules: Vec<FormRule<'a>>,
    submit_fixes: Vec<SubmitItem<'a>>,
}

#[derive(Serialize)]
struct EditContext<'a> {
    table_name: &'a str,
    pk: &'a str,
    page_url: &'a str,
    form_items: Vec<FormField<'a>>,
    custom_fields: Vec<FormDefault<'a>>,
    rules: Vec<FormRule<'a>>,
    submit_items: Vec<SubmitItem<'a>>,
}

#[derive(Serialize)]
struct RouteContext<'a> {
    page_url: &'a str,
    component_dir: &'a str,
    ctrl_name: &'a str,
}

/// The four components generated per table.
#[derive(Debug, Clone)]
pub struct UiFiles {
    pub index: String,
    pub create: String,
    pub edit: String,
    pub col_setting: String,
}

fn label(col: &Column) -> &str {
    if col.tag.comment.is_empty() {
        &col.name
    } else {
        &col.tag.comment
    }
}

fn coercion(col: &Column) -> Option<&'static str> {
    if is_go_integer(&col.go_type) {
        Some("parseInt")
    } else if is_go_float(&col.go_type) {
        Some("parseFloat")
    } else {
        None
    }
}

fn rule(col: &Column) -> FormRule<'_> {
    FormRule {
        field: col.db_name(),
        label: label(col),
        required: !col.tag.null,
        length: col.tag.size.as_deref(),
        kind: is_go_integer(&col.go_type).then_some("number"),
    }
}

fn form_default(col: &Column) -> FormDefault<'_> {
    FormDefault {
        field: col.db_name(),
        default: col.tag.default.as_deref().unwrap_or(""),
    }
}

pub fn render_ui(table: &Table, templates: &Templates) -> GenResult<UiFiles> {
    let page_url = url_style(&table.name);
    let page_url = page_url.as_str();
    let pk = table.primary_key.as_str();
    let editable = |c: &&Column| !table.is_primary_key(c) && !c.is_audit();

    let index = IndexContext {
        table_name: &table.name,
        pk,
        page_url,
        list_columns: table
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| ListColumn {
                title: label(c),
                field: c.db_name(),
                show: i < VISIBLE_COLUMNS,
            })
            .collect(),
        select_options: table
            .columns
            .iter()
            .map(|c| SelectOption {
                value: c.db_name(),
                label: label(c),
            })
            .collect(),
        time_columns: table
            .columns
            .iter()
            .filter(|c| matches!(c.name.as_str(), "CreatedAt" | "UpdatedAt"))
            .filter(|c| is_go_integer(&c.go_type))
            .map(|c| c.db_name())
            .collect(),
    };

    let create = CreateContext {
        table_name: &table.name,
        page_url,
        form_fields: table
            .columns
            .iter()
            .filter(editable)
            .map(|c| FormField {
                field: c.db_name(),
                label: label(c),
                disabled: false,
            })
            .collect(),
        custom_fields: table.columns.iter().filter(editable).map(form_default).collect(),
        rules: table.columns.iter().filter(editable).map(rule).collect(),
        submit_fixes: table
            .columns
            .iter()
            .filter(editable)
            .filter_map(|c| {
                coercion(c).map(|parse| SubmitItem {
                    field: c.db_name(),
                    parse: Some(parse),
                })
            })
            .collect(),
    };

    let edit = EditContext {
        table_name: &table.name,
        pk,
        page_url,
        form_items: table
            .columns
            .iter()
            .map(|c| FormField {
                field: c.db_name(),
                label: label(c),
                disabled: table.is_primary_key(c) || c.is_audit(),
            })
            .collect(),
        custom_fields: table.columns.iter().map(form_default).collect(),
        rules: table
            .columns
            .iter()
            .filter(|c| !table.is_primary_key(c))
            .map(rule)
            .collect(),
        submit_items: table
            .columns
            .iter()
            .filter(editable)
            .map(|c| SubmitItem {
                field: c.db_name(),
                parse: coercion(c),
            })
            .collect(),
    };

    Ok(UiFiles {
        index: templates.render("vue/index.vue.j2", index)?,
        create: templates.render("vue/create.vue.j2", create)?,
        edit: templates.render("vue/edit.vue.j2", edit)?,
        col_setting: templates.render("vue/col_setting.vue.j2", minijinja::context! {})?,
    })
}

pub(super) fn write_ui(
    tables: &[Table],
    templates: &Templates,
    opts: &GenOptions,
    writer: &mut Writer<'_>,
) -> GenResult<Vec<Notice>> {
    let mut rules = String::new();
    let mut menu = String::new();

    for table in usable_tables(tables) {
        let component_dir = lower_camel_case(&table.name);
        let page_url = url_style(&table.name);
        let ctrl_name = table.model_name();
        let base = opts.components_dir().join(&component_dir);
        ensure_dir(&base)?;

        let files = render_ui(table, templates)?;
        for (name, source) in [
            ("Index.vue", &files.index),
            ("CreateComponent.vue", &files.create),
            ("EditComponent.vue", &files.edit),
            ("ColSettingComponent.vue", &files.col_setting),
        ] {
            writer.write(&base.join(name), source, OnOpenError::Skip)?;
        }

        let route = RouteContext {
            page_url: &page_url,
            component_dir: &component_dir,
            ctrl_name: &ctrl_name,
        };
        rules.push_str(&templates.render("vue/route_rule.js.j2", &route)?);
        menu.push_str(&templates.render("vue/menu.js.j2", &route)?);
    }

    if rules.is_empty() {
        return Ok(Vec::new());
    }
    Ok(vec![
        Notice::new("add to vue/src/router/index.js", rules),
        Notice::new("add to vue menu", menu),
    ])
}
