//! Template environment for generated sources.
//!
//! Every template ships inside the binary. A directory passed with
//! `--templates` may replace any of them by file name (`model.go.j2`,
//! `vue/index.vue.j2`, ...).

use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;

use crate::errors::{GenError, GenResult};

macro_rules! builtin {
    ($($name:literal),* $(,)?) => {
        &[$(($name, include_str!(concat!("../templates/", $name)))),*]
    };
}

pub const BUILTIN_TEMPLATES: &[(&str, &str)] = builtin![
    "model.go.j2",
    "struct_model.go.j2",
    "controller.go.j2",
    "operate_list.go.j2",
    "filter.go.j2",
    "router.go.j2",
    "namespace.go.j2",
    "vue/index.vue.j2",
    "vue/create.vue.j2",
    "vue/edit.vue.j2",
    "vue/col_setting.vue.j2",
    "vue/route_rule.js.j2",
    "vue/menu.js.j2",
    "skeleton/app.conf.j2",
    "skeleton/app_local.conf.j2",
    "skeleton/main.go.j2",
    "skeleton/main_conn.go.j2",
    "skeleton/gitignore.j2",
    "skeleton/Dockerfile.j2",
    "skeleton/dockerignore.j2",
];

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn builtin() -> GenResult<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        for &(name, body) in BUILTIN_TEMPLATES {
            env.add_template(name, body)?;
        }
        Ok(Self { env })
    }

    /// Builtins, with every file found under `dir` registered on top.
    pub fn with_overrides(dir: &Path) -> GenResult<Self> {
        let mut templates = Self::builtin()?;
        let mut files = Vec::new();
        collect_files(dir, &mut files)?;
        for path in files {
            let name = template_name(dir, &path);
            let body = std::fs::read_to_string(&path).map_err(|e| GenError::io(&path, e))?;
            tracing::debug!("Template {} overridden by {}", name, path.display());
            templates.env.add_template_owned(name, body)?;
        }
        Ok(templates)
    }

    pub fn load(dir: Option<&Path>) -> GenResult<Self> {
        match dir {
            Some(dir) => Self::with_overrides(dir),
            None => Self::builtin(),
        }
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> GenResult<String> {
        Ok(self.env.get_template(name)?.render(ctx)?)
    }
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> GenResult<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| GenError::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| GenError::io(dir, e))?.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    out.sort();
    Ok(())
}

fn template_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
