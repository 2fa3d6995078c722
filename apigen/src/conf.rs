use std::path::PathBuf;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::generate::DEFAULT_RUNTIME_PKG;

/// Settings read from the environment (and `.env`). Command line flags take
/// precedence over every field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GenConf {
    pub driver: String,

    pub conn: Option<String>,

    pub tables: Vec<String>,

    pub level: String,

    pub templates_dir: Option<PathBuf>,

    pub runtime_pkg: String,
}

impl Default for GenConf {
    fn default() -> Self {
        Self {
            driver: "mysql".to_string(),
            conn: None,
            tables: vec![],
            level: "3".to_string(),
            templates_dir: None,
            runtime_pkg: DEFAULT_RUNTIME_PKG.to_string(),
        }
    }
}

impl GenConf {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            driver: var("APIGEN_DRIVER").unwrap_or(defaults.driver),
            conn: var("DATABASE_URL"),
            tables: var("APIGEN_TABLES")
                .map(|t| parse_tables(&t))
                .unwrap_or_default(),
            level: var("APIGEN_LEVEL").unwrap_or(defaults.level),
            templates_dir: var("APIGEN_TEMPLATES").map(PathBuf::from),
            runtime_pkg: var("APIGEN_RUNTIME").unwrap_or(defaults.runtime_pkg),
        }
    }
}

/// `"users, orders,users"` => `["users", "orders"]`, first occurrence wins.
pub fn parse_tables(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_tables() {
        assert_eq!(parse_tables("users, orders,users,,"), vec!["users", "orders"]);
        assert!(parse_tables(" ").is_empty());
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> = [
            ("APIGEN_DRIVER", "postgres"),
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("APIGEN_TABLES", "orders,items"),
            ("APIGEN_LEVEL", ""),
        ]
        .into_iter()
        .collect();
        let conf = GenConf::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(conf.driver, "postgres");
        assert_eq!(conf.conn.as_deref(), Some("postgres://localhost/shop"));
        assert_eq!(conf.tables, vec!["orders", "items"]);
        assert_eq!(conf.level, "3");
        assert_eq!(conf.runtime_pkg, DEFAULT_RUNTIME_PKG);
        assert!(conf.templates_dir.is_none());
    }
}
