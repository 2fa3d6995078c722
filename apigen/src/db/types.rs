use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{ExtractionKind, GenError, GenResult};

/// MySQL data type => Go type.
pub const MYSQL_TYPES: &[(&str, &str)] = &[
    ("int", "int"),
    ("integer", "int"),
    ("tinyint", "int8"),
    ("smallint", "int16"),
    ("mediumint", "int32"),
    ("bigint", "int64"),
    ("int unsigned", "uint"),
    ("integer unsigned", "uint"),
    ("tinyint unsigned", "uint8"),
    ("smallint unsigned", "uint16"),
    ("mediumint unsigned", "uint32"),
    ("bigint unsigned", "uint64"),
    ("bit", "uint64"),
    ("bool", "bool"),
    ("enum", "string"),
    ("set", "string"),
    ("varchar", "string"),
    ("char", "string"),
    ("tinytext", "string"),
    ("mediumtext", "string"),
    ("text", "string"),
    ("longtext", "string"),
    ("blob", "string"),
    ("tinyblob", "string"),
    ("mediumblob", "string"),
    ("longblob", "string"),
    ("date", "time.Time"),
    ("datetime", "time.Time"),
    ("timestamp", "time.Time"),
    ("time", "time.Time"),
    ("float", "float32"),
    ("double", "float64"),
    ("decimal", "float64"),
    ("binary", "string"),
    ("varbinary", "string"),
    ("year", "int16"),
    ("json", "string"),
];

/// PostgreSQL data type => Go type.
pub const POSTGRES_TYPES: &[(&str, &str)] = &[
    ("serial", "int"),
    ("big serial", "int64"),
    ("smallint", "int16"),
    ("integer", "int"),
    ("bigint", "int64"),
    ("boolean", "bool"),
    ("char", "string"),
    ("character", "string"),
    ("character varying", "string"),
    ("varchar", "string"),
    ("text", "string"),
    ("date", "time.Time"),
    ("time", "time.Time"),
    ("time without time zone", "time.Time"),
    ("time with time zone", "time.Time"),
    ("timestamp", "time.Time"),
    ("timestamp without time zone", "time.Time"),
    ("timestamp with time zone", "time.Time"),
    ("interval", "string"),
    ("real", "float32"),
    ("double precision", "float64"),
    ("decimal", "float64"),
    ("numeric", "float64"),
    ("money", "float64"),
    ("bytea", "string"),
    ("tsvector", "string"),
    ("ARRAY", "string"),
    ("USER-DEFINED", "string"),
    ("uuid", "string"),
    ("json", "string"),
    ("jsonb", "string"),
    ("inet", "string"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Mysql,
    Postgres,
}

impl std::str::FromStr for Dialect {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mysql" => Ok(Dialect::Mysql),
            "postgres" => Ok(Dialect::Postgres),
            "sqlite" => Err(GenError::Config(
                "Generating app code from SQLite database is not supported yet".to_string(),
            )),
            other => Err(GenError::UnsupportedDriver(other.to_string())),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Dialect {
    pub const fn name(&self) -> &'static str {
        match self {
            Dialect::Mysql => "mysql",
            Dialect::Postgres => "postgres",
        }
    }

    pub const fn type_table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Dialect::Mysql => MYSQL_TYPES,
            Dialect::Postgres => POSTGRES_TYPES,
        }
    }

    /// Maps a catalog data type to a Go type name.
    pub fn go_type(&self, sql_type: &str) -> GenResult<&'static str> {
        self.type_table()
            .iter()
            .find(|(sql, _)| *sql == sql_type)
            .map(|(_, go)| *go)
            .ok_or_else(|| GenError::UnknownType(sql_type.to_string()))
    }

    pub fn is_temporal(&self, t: &str) -> bool {
        matches!(t, "date" | "datetime" | "timestamp" | "time")
            || (*self == Dialect::Postgres && t.starts_with("time"))
    }

    /// Types whose size is recorded in the tag.
    pub fn is_sized(&self, t: &str) -> bool {
        is_string_type(t)
            || is_binary_type(t)
            || (*self == Dialect::Mysql && t == "bit")
    }

    /// Go `database/sql` driver imported by a generated `main.go`.
    pub const fn go_driver_pkg(&self) -> &'static str {
        match self {
            Dialect::Mysql => "github.com/go-sql-driver/mysql",
            Dialect::Postgres => "github.com/lib/pq",
        }
    }

    /// Catalog default that can be written as a literal tag value; `None`
    /// for NULL and for expressions such as `nextval(...)` or `now()`.
    pub fn literal_default(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty()
            || raw.eq_ignore_ascii_case("NULL")
            || raw.eq_ignore_ascii_case("CURRENT_TIMESTAMP")
        {
            return None;
        }
        match self {
            Dialect::Mysql => Some(raw.to_string()),
            Dialect::Postgres => {
                if let Some(caps) = PG_LITERAL_RE.captures(raw) {
                    return caps.get(1).map(|m| m.as_str().to_string());
                }
                let plain = raw.parse::<f64>().is_ok() || raw == "true" || raw == "false";
                plain.then(|| raw.to_string())
            }
        }
    }

    pub fn has_unsigned_variants(&self) -> bool {
        *self == Dialect::Mysql
    }

    /// PostgreSQL types that keep their catalog name as an explicit column type.
    pub fn is_opaque(&self, t: &str) -> bool {
        *self == Dialect::Postgres && matches!(t, "interval" | "uuid" | "json")
    }
}

pub fn is_string_type(t: &str) -> bool {
    matches!(t, "char" | "varchar")
}

pub fn is_integer_family(t: &str) -> bool {
    matches!(t, "int" | "integer" | "tinyint" | "smallint" | "mediumint" | "bigint")
}

pub fn is_decimal(t: &str) -> bool {
    t == "decimal"
}

pub fn is_binary_type(t: &str) -> bool {
    matches!(t, "binary" | "varbinary")
}

/// Go integer types, used by the emitters to pick conversions.
pub fn is_go_integer(go_type: &str) -> bool {
    matches!(
        go_type,
        "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8" | "uint16" | "uint32" | "uint64"
    )
}

pub fn is_go_float(go_type: &str) -> bool {
    matches!(go_type, "float32" | "float64")
}

static SIZE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]+\(([0-9]+)\)$").unwrap());
static DECIMAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"decimal\(([0-9]+),([0-9]+)\)").unwrap());
static PG_LITERAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^'(.*)'::[a-z ]+$").unwrap());
static SIGN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:tiny|small|medium|big)?int(?:eger)?(?:\([0-9]+\))?(.*)$").unwrap());

/// `varchar(255)` => `255`.
pub fn extract_col_size(column_type: &str) -> GenResult<String> {
    SIZE_RE
        .captures(column_type)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| GenError::Extraction {
            kind: ExtractionKind::Size,
            input: column_type.to_string(),
        })
}

/// `decimal(10,2)` => `("10", "2")`.
pub fn extract_decimal(column_type: &str) -> GenResult<(String, String)> {
    DECIMAL_RE
        .captures(column_type)
        .and_then(|c| Some((c.get(1)?, c.get(2)?)))
        .map(|(d, s)| (d.as_str().to_string(), s.as_str().to_string()))
        .ok_or_else(|| GenError::Extraction {
            kind: ExtractionKind::Decimal,
            input: column_type.to_string(),
        })
}

/// `int(11) unsigned` => `unsigned`, `int(11)` => ``. The display width is
/// optional since MySQL 8 drops it.
pub fn extract_int_signedness(column_type: &str) -> GenResult<String> {
    SIGN_RE
        .captures(column_type)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .ok_or_else(|| GenError::Extraction {
            kind: ExtractionKind::Signedness,
            input: column_type.to_string(),
        })
}
