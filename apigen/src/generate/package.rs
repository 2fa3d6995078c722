use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::errors::{GenError, GenResult};

/// Go import path of the application rooted at `app_dir`.
///
/// Tried in order: `explicit`, the nearest `go.mod` above `app_dir`, then
/// each `GOPATH` entry's `src` directory.
pub fn package_path(app_dir: &Path, explicit: Option<&str>) -> GenResult<String> {
    resolve_package_path(app_dir, explicit, std::env::var_os("GOPATH"))
}

pub fn resolve_package_path(
    app_dir: &Path,
    explicit: Option<&str>,
    gopath: Option<OsString>,
) -> GenResult<String> {
    if let Some(pkg) = explicit.map(str::trim).filter(|p| !p.is_empty()) {
        return Ok(pkg.trim_end_matches('/').to_string());
    }

    let app_dir = canonical(app_dir);

    for dir in app_dir.ancestors() {
        let go_mod = dir.join("go.mod");
        if !go_mod.is_file() {
            continue;
        }
        let text = std::fs::read_to_string(&go_mod).map_err(|e| GenError::io(&go_mod, e))?;
        let Some(module) = module_name(&text) else {
            return Err(GenError::Config(format!(
                "No module directive in '{}'",
                go_mod.display()
            )));
        };
        tracing::debug!("Using module '{}' from {}", module, go_mod.display());
        return Ok(join_import(module, &app_dir, dir));
    }

    if let Some(gopath) = gopath {
        for entry in std::env::split_paths(&gopath) {
            let src = canonical(&entry.join("src"));
            if app_dir != src && app_dir.starts_with(&src) {
                return Ok(join_import("", &app_dir, &src));
            }
        }
    }

    Err(GenError::Config(format!(
        "Cannot resolve the Go import path of '{}': no go.mod found and not inside GOPATH. Pass --package",
        app_dir.display()
    )))
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn module_name(go_mod: &str) -> Option<&str> {
    go_mod.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let name = rest.split_whitespace().next()?.trim_matches('"');
        (!name.is_empty()).then_some(name)
    })
}

fn join_import(prefix: &str, path: &Path, base: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !prefix.is_empty() {
        parts.push(prefix.to_string());
    }
    if let Ok(rel) = path.strip_prefix(base) {
        parts.extend(rel.components().map(|c| c.as_os_str().to_string_lossy().into_owned()));
    }
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_wins() {
        let dir = tempfile::tempdir().unwrap();
        let pkg = resolve_package_path(dir.path(), Some("example.com/shop/"), None).unwrap();
        assert_eq!(pkg, "example.com/shop");
    }

    #[test]
    fn test_go_mod_with_sub_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("go.mod"),
            "// header\nmodule example.com/shop\n\ngo 1.21\n",
        )
        .unwrap();
        let app = dir.path().join("services").join("api");
        std::fs::create_dir_all(&app).unwrap();

        assert_eq!(
            resolve_package_path(dir.path(), None, None).unwrap(),
            "example.com/shop"
        );
        assert_eq!(
            resolve_package_path(&app, None, None).unwrap(),
            "example.com/shop/services/api"
        );
    }

    #[test]
    fn test_gopath_fallback() {
        let gopath = tempfile::tempdir().unwrap();
        let app = gopath.path().join("src").join("github.com").join("acme").join("shop");
        std::fs::create_dir_all(&app).unwrap();

        let pkg =
            resolve_package_path(&app, None, Some(gopath.path().as_os_str().to_owned())).unwrap();
        assert_eq!(pkg, "github.com/acme/shop");
    }

    #[test]
    fn test_unresolvable_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_package_path(dir.path(), None, None).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_module_name() {
        assert_eq!(module_name("module \"a/b\"\n"), Some("a/b"));
        assert_eq!(module_name("modules x\n"), None);
    }
}
