use indexmap::IndexMap;
use serde::Serialize;

use crate::naming::camel_case;

/// Names of the audit columns that generated code fills in on the server.
pub const AUDIT_COLUMNS: [&str; 4] = ["CreatedAt", "CreatedBy", "UpdatedAt", "UpdatedBy"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    pub name: String,
    pub ref_schema: String,
    pub ref_table: String,
    pub ref_column: String,
}

/// ORM annotation of a generated struct field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrmTag {
    pub column: String,
    pub auto: bool,
    pub pk: bool,
    pub null: bool,
    pub unique: bool,
    pub size: Option<String>,
    pub digits: Option<String>,
    pub decimals: Option<String>,
    pub auto_now: bool,
    pub auto_now_add: bool,
    pub db_type: Option<String>,
    pub default: Option<String>,
    pub rel_fk: bool,
    pub comment: String,
}

impl OrmTag {
    fn options(&self) -> Vec<String> {
        let mut opts = Vec::new();
        if !self.column.is_empty() {
            opts.push(format!("column:{}", self.column));
        }
        if self.auto {
            opts.push("auto".to_string());
        }
        if let Some(size) = &self.size {
            opts.push(format!("size:{}", size));
        }
        if let Some(ty) = &self.db_type {
            opts.push(format!("type:{}", ty));
        }
        if self.null {
            opts.push("null".to_string());
        }
        if self.auto_now {
            opts.push("auto_now".to_string());
        }
        if self.auto_now_add {
            opts.push("auto_now_add".to_string());
        }
        if let (Some(digits), Some(decimals)) = (&self.digits, &self.decimals) {
            opts.push(format!("digits:{};decimals:{}", digits, decimals));
        }
        if self.rel_fk {
            opts.push("rel:fk".to_string());
        }
        if self.pk {
            opts.push("pk".to_string());
        }
        if self.unique {
            opts.push("unique".to_string());
        }
        if let Some(default) = &self.default {
            opts.push(format!("default:{}", default));
        }
        opts
    }
}

impl std::fmt::Display for OrmTag {
    /// Renders the Go struct tag, e.g. `` `json:"id" gorm:"column:id;auto"` ``.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let opts = self.options();
        if opts.is_empty() {
            return Ok(());
        }
        write!(f, "`json:\"{}\" gorm:\"{}\"", self.column, opts.join(";"))?;
        if !self.comment.is_empty() {
            write!(f, " description:\"{}\"", self.comment)?;
        }
        f.write_str("`")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Go field identifier.
    pub name: String,
    /// Go type name, or `*Ref` for a linked foreign key.
    pub go_type: String,
    pub tag: OrmTag,
}

impl Column {
    pub fn is_audit(&self) -> bool {
        AUDIT_COLUMNS.contains(&self.name.as_str())
    }

    /// The catalog column name.
    pub fn db_name(&self) -> &str {
        &self.tag.column
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.name, self.go_type, self.tag)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    /// Single-column primary key, empty when absent or composite.
    pub primary_key: String,
    pub unique_keys: Vec<String>,
    pub foreign_keys: IndexMap<String, ForeignKey>,
    pub columns: Vec<Column>,
    pub imports_time: bool,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn has_primary_key(&self) -> bool {
        !self.primary_key.is_empty()
    }

    pub fn model_name(&self) -> String {
        camel_case(&self.name)
    }

    pub fn is_primary_key(&self, column: &Column) -> bool {
        self.has_primary_key() && column.db_name() == self.primary_key
    }

    /// Go struct declaration for the table.
    pub fn struct_source(&self) -> String {
        let mut out = format!("type {} struct {{\n", self.model_name());
        for col in &self.columns {
            out.push_str(&col.to_string());
            out.push('\n');
        }
        out.push_str("}\n");
        out
    }
}
