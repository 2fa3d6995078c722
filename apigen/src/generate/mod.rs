//! Go and Vue source emission for resolved tables.

mod controller;
mod filter;
mod model;
mod package;
mod router;
mod ui;
mod writer;

use std::ops::BitOr;
use std::path::PathBuf;

pub use controller::{AuditStatements, audit_statements, render_controller};
pub use filter::{render_filter, validation_rules};
pub use model::render_model;
pub use package::{package_path, resolve_package_path};
pub use router::{render_namespaces, render_router};
pub use ui::{UiFiles, VISIBLE_COLUMNS, render_ui};
pub use writer::{Assume, Confirm, OnOpenError, Prompt, WriteOutcome, Writer, ensure_dir};

use crate::db::Table;
use crate::errors::{GenError, GenResult};
use crate::render::Templates;

pub const DEFAULT_RUNTIME_PKG: &str = "github.com/yimishiji/bee/pkg";

/// Additive set of artifact categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Artifacts(u8);

impl Artifacts {
    pub const MODEL: Artifacts = Artifacts(1);
    pub const CONTROLLER: Artifacts = Artifacts(1 << 1);
    pub const ROUTER: Artifacts = Artifacts(1 << 2);
    pub const UI: Artifacts = Artifacts(1 << 3);

    pub const fn contains(self, other: Artifacts) -> bool {
        self.0 & other.0 == other.0
    }

    /// `1` models, `2` +controllers and filters, `3` +router, `4` +Vue views.
    pub fn from_level(level: &str) -> GenResult<Self> {
        let model = Self::MODEL;
        match level.trim() {
            "1" => Ok(model),
            "2" => Ok(model | Self::CONTROLLER),
            "3" => Ok(model | Self::CONTROLLER | Self::ROUTER),
            "4" => Ok(model | Self::CONTROLLER | Self::ROUTER | Self::UI),
            other => Err(GenError::InvalidLevel(other.to_string())),
        }
    }
}

impl BitOr for Artifacts {
    type Output = Artifacts;

    fn bitor(self, rhs: Self) -> Self::Output {
        Artifacts(self.0 | rhs.0)
    }
}

impl std::str::FromStr for Artifacts {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_level(s)
    }
}

/// Text the user has to paste by hand, printed after generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.title, self.body)
    }
}

#[derive(Debug, Default)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone)]
pub struct GenOptions {
    pub app_dir: PathBuf,
    /// Go import path of the application.
    pub pkg_path: String,
    /// Import path prefix of the shared `db`/`base`/`structs`/`filters` packages.
    pub runtime_pkg: String,
    pub gofmt: bool,
}

impl GenOptions {
    pub fn new(app_dir: impl Into<PathBuf>, pkg_path: impl Into<String>) -> Self {
        Self {
            app_dir: app_dir.into(),
            pkg_path: pkg_path.into(),
            runtime_pkg: DEFAULT_RUNTIME_PKG.to_string(),
            gofmt: false,
        }
    }

    pub fn models_dir(&self) -> PathBuf {
        self.app_dir.join("models")
    }

    pub fn controllers_dir(&self) -> PathBuf {
        self.app_dir.join("controllers")
    }

    pub fn filters_dir(&self) -> PathBuf {
        self.app_dir.join("filters")
    }

    pub fn routers_dir(&self) -> PathBuf {
        self.app_dir.join("routers")
    }

    pub fn components_dir(&self) -> PathBuf {
        self.app_dir.join("vue").join("src").join("components")
    }
}

/// Tables that get more than a model file.
pub fn usable_tables(tables: &[Table]) -> impl Iterator<Item = &Table> {
    tables.iter().filter(|t| t.has_primary_key())
}

fn create_dirs(artifacts: Artifacts, opts: &GenOptions) -> GenResult<()> {
    if artifacts.contains(Artifacts::MODEL) {
        ensure_dir(&opts.models_dir())?;
    }
    if artifacts.contains(Artifacts::CONTROLLER) {
        ensure_dir(&opts.controllers_dir())?;
        ensure_dir(&opts.filters_dir())?;
    }
    if artifacts.contains(Artifacts::ROUTER) {
        ensure_dir(&opts.routers_dir())?;
    }
    if artifacts.contains(Artifacts::UI) {
        ensure_dir(&opts.components_dir())?;
    }
    Ok(())
}

/// Writes every selected artifact for `tables` under `opts.app_dir`.
///
/// Declined overwrites are reported in `skipped`; the snippets that cannot be
/// merged automatically come back as notices.
pub fn generate(
    tables: &[Table],
    artifacts: Artifacts,
    templates: &Templates,
    opts: &GenOptions,
    confirm: &mut dyn Confirm,
) -> GenResult<GenerationReport> {
    create_dirs(artifacts, opts)?;

    let mut writer = Writer::new(confirm, opts.gofmt);
    let mut notices = Vec::new();

    if artifacts.contains(Artifacts::MODEL) {
        tracing::info!("Creating model files...");
        model::write_models(tables, templates, opts, &mut writer)?;
    }
    if artifacts.contains(Artifacts::CONTROLLER) {
        tracing::info!("Creating controller files...");
        notices.extend(controller::write_controllers(tables, templates, opts, &mut writer)?);
        tracing::info!("Creating filter files...");
        filter::write_filters(tables, templates, opts, &mut writer)?;
    }
    if artifacts.contains(Artifacts::ROUTER) {
        tracing::info!("Creating router files...");
        notices.extend(router::write_router(tables, templates, opts, &mut writer)?);
    }
    if artifacts.contains(Artifacts::UI) {
        tracing::info!("Creating Vue files...");
        notices.extend(ui::write_ui(tables, templates, opts, &mut writer)?);
    }

    let (written, skipped) = writer.finish();
    Ok(GenerationReport {
        written,
        skipped,
        notices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_additive() {
        let l1 = Artifacts::from_level("1").unwrap();
        let l4: Artifacts = "4".parse().unwrap();
        assert!(l1.contains(Artifacts::MODEL));
        assert!(!l1.contains(Artifacts::CONTROLLER));
        assert!(Artifacts::from_level("3").unwrap().contains(Artifacts::ROUTER));
        assert!(!Artifacts::from_level("3").unwrap().contains(Artifacts::UI));
        for a in [Artifacts::MODEL, Artifacts::CONTROLLER, Artifacts::ROUTER, Artifacts::UI] {
            assert!(l4.contains(a));
        }
    }

    #[test]
    fn test_invalid_level() {
        for bad in ["0", "5", "", "two"] {
            let err = Artifacts::from_level(bad).unwrap_err();
            assert!(matches!(err, GenError::InvalidLevel(_)), "{}", bad);
        }
    }

    #[test]
    fn test_notice_display() {
        let n = Notice::new("add to vue menu", "  {\"name\":\"Users\"},\n");
        assert_eq!(n.to_string(), "add to vue menu\n  {\"name\":\"Users\"},\n");
    }
}
