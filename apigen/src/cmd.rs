use std::path::{Path, PathBuf};

use argh::FromArgs;

use crate::conf::{GenConf, parse_tables};
use crate::db::{Dialect, MysqlCatalog, PostgresCatalog, Table, read_schema};
use crate::errors::{GenError, GenResult};
use crate::generate::{
    Artifacts, Assume, Confirm, GenOptions, GenerationReport, Prompt, generate, package_path,
};
use crate::render::Templates;
use crate::scaffold::{SkeletonOptions, scaffold};

#[derive(FromArgs, PartialEq, Eq, Debug, Clone)]
/// Generate beego API code and Vue admin views from a database schema
pub struct ApigenCommand {
    #[argh(subcommand)]
    pub nested: NestedCommand,

    #[argh(switch, short = 'v', long = "verbose")]
    /// enable verbose output
    pub verbose: bool,
}

#[derive(FromArgs, PartialEq, Eq, Debug, Clone)]
#[argh(subcommand)]
pub enum NestedCommand {
    Appcode(AppcodeCommand),
    Api(ApiCommand),
}

#[derive(FromArgs, PartialEq, Eq, Debug, Clone)]
#[argh(subcommand, name = "appcode")]
/// Generate models, controllers, filters, router and views for existing tables
pub struct AppcodeCommand {
    #[argh(option)]
    /// database driver: mysql or postgres
    pub driver: Option<String>,

    #[argh(option)]
    /// connection string used to reach the database
    pub conn: Option<String>,

    #[argh(option)]
    /// comma separated list of table names, all tables when omitted
    pub tables: Option<String>,

    #[argh(option)]
    /// generation level: 1 models, 2 +controllers, 3 +router, 4 +vue views
    pub level: Option<String>,

    #[argh(option)]
    /// application directory, defaults to the current directory
    pub path: Option<PathBuf>,

    #[argh(option)]
    /// go import path of the application
    pub package: Option<String>,

    #[argh(option)]
    /// directory whose templates replace the builtin ones
    pub templates: Option<PathBuf>,

    #[argh(option)]
    /// import path of the shared runtime packages
    pub runtime: Option<String>,

    #[argh(switch)]
    /// overwrite existing files without asking
    pub yes: bool,

    #[argh(switch)]
    /// never overwrite existing files
    pub no: bool,

    #[argh(switch)]
    /// run gofmt -w on generated go files
    pub gofmt: bool,
}

#[derive(FromArgs, PartialEq, Eq, Debug, Clone)]
#[argh(subcommand, name = "api")]
/// Create a new beego API application
pub struct ApiCommand {
    #[argh(positional)]
    /// application name or path
    pub app: String,

    #[argh(option)]
    /// database driver: mysql or postgres
    pub driver: Option<String>,

    #[argh(option)]
    /// generate the application from this database instead of a blank one
    pub conn: Option<String>,

    #[argh(option)]
    /// comma separated list of table names, all tables when omitted
    pub tables: Option<String>,

    #[argh(option)]
    /// go import path of the application
    pub package: Option<String>,

    #[argh(option)]
    /// directory whose templates replace the builtin ones
    pub templates: Option<PathBuf>,

    #[argh(option)]
    /// import path of the shared runtime packages
    pub runtime: Option<String>,

    #[argh(switch)]
    /// overwrite existing files without asking
    pub yes: bool,

    #[argh(switch)]
    /// never overwrite existing files
    pub no: bool,

    #[argh(switch)]
    /// run gofmt -w on generated go files
    pub gofmt: bool,
}

impl ApigenCommand {
    pub async fn run(self, conf: GenConf) -> GenResult<GenerationReport> {
        match self.nested {
            NestedCommand::Appcode(cmd) => cmd.run(conf).await,
            NestedCommand::Api(cmd) => cmd.run(conf).await,
        }
    }
}

fn overwrite_policy(yes: bool, no: bool) -> GenResult<Box<dyn Confirm>> {
    match (yes, no) {
        (true, true) => Err(GenError::Config(
            "--yes and --no cannot be used together".to_string(),
        )),
        (true, false) => Ok(Box::new(Assume(true))),
        (false, true) => Ok(Box::new(Assume(false))),
        (false, false) => Ok(Box::new(Prompt::stdin())),
    }
}

fn current_dir() -> GenResult<PathBuf> {
    std::env::current_dir().map_err(|e| GenError::io(".", e))
}

fn select_tables(flag: Option<&str>, conf: &GenConf) -> Vec<String> {
    match flag {
        Some(list) => parse_tables(list),
        None => conf.tables.clone(),
    }
}

/// Connects with the driver's catalog and reads the selected tables.
pub async fn read_tables(dialect: Dialect, conn: &str, tables: &[String]) -> GenResult<Vec<Table>> {
    tracing::info!("Analyzing database tables...");
    match dialect {
        Dialect::Mysql => {
            let catalog = MysqlCatalog::connect(conn).await?;
            read_schema(&catalog, tables).await
        }
        Dialect::Postgres => {
            let catalog = PostgresCatalog::connect(conn).await?;
            read_schema(&catalog, tables).await
        }
    }
}

impl AppcodeCommand {
    pub async fn run(self, conf: GenConf) -> GenResult<GenerationReport> {
        let dialect: Dialect = self.driver.as_deref().unwrap_or(&conf.driver).parse()?;
        let artifacts = Artifacts::from_level(self.level.as_deref().unwrap_or(&conf.level))?;
        let conn = self
            .conn
            .clone()
            .or_else(|| conf.conn.clone())
            .ok_or_else(|| GenError::Config("--conn (or DATABASE_URL) is required".to_string()))?;
        let mut confirm = overwrite_policy(self.yes, self.no)?;

        let app_dir = match &self.path {
            Some(path) => path.clone(),
            None => current_dir()?,
        };
        let pkg_path = if artifacts.contains(Artifacts::CONTROLLER) {
            package_path(&app_dir, self.package.as_deref())?
        } else {
            String::new()
        };
        let templates = Templates::load(self.templates.as_deref().or(conf.templates_dir.as_deref()))?;
        let tables = select_tables(self.tables.as_deref(), &conf);

        tracing::info!("Using '{}' as 'driver'", dialect);
        tracing::debug!("Using '{}' as 'conn'", conn);
        tracing::info!("Using '{}' as 'tables'", tables.join(","));

        let schema = read_tables(dialect, &conn, &tables).await?;
        let opts = GenOptions {
            app_dir,
            pkg_path,
            runtime_pkg: self.runtime.unwrap_or(conf.runtime_pkg),
            gofmt: self.gofmt,
        };
        generate(&schema, artifacts, &templates, &opts, confirm.as_mut())
    }
}

/// Import path for a freshly created application; falls back to the bare
/// application name when neither go.mod nor GOPATH applies.
fn skeleton_package(app_dir: &Path, app_name: &str, explicit: Option<&str>) -> GenResult<String> {
    match package_path(app_dir, explicit) {
        Ok(pkg) => Ok(pkg),
        Err(err) if err.is_config() => {
            tracing::info!("Using '{}' as the import path", app_name);
            Ok(app_name.to_string())
        }
        Err(err) => Err(err),
    }
}

impl ApiCommand {
    pub async fn run(self, conf: GenConf) -> GenResult<GenerationReport> {
        let dialect: Dialect = self.driver.as_deref().unwrap_or(&conf.driver).parse()?;
        let mut confirm = overwrite_policy(self.yes, self.no)?;

        let app_dir = current_dir()?.join(&self.app);
        let app_name = app_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| GenError::Config(format!("Invalid application name '{}'", self.app)))?;
        let runtime_pkg = self.runtime.clone().unwrap_or_else(|| conf.runtime_pkg.clone());
        let templates = Templates::load(self.templates.as_deref().or(conf.templates_dir.as_deref()))?;

        // Nothing is written until the schema has been read.
        let schema = match &self.conn {
            Some(conn) => {
                let tables = select_tables(self.tables.as_deref(), &conf);
                tracing::info!("Using '{}' as 'driver'", dialect);
                tracing::info!("Using '{}' as 'tables'", tables.join(","));
                Some(read_tables(dialect, conn, &tables).await?)
            }
            None => None,
        };

        std::fs::create_dir_all(&app_dir).map_err(|e| GenError::io(&app_dir, e))?;
        let pkg_path = skeleton_package(&app_dir, &app_name, self.package.as_deref())?;

        let skeleton = SkeletonOptions {
            app_dir: app_dir.clone(),
            app_name,
            pkg_path: pkg_path.clone(),
            runtime_pkg: runtime_pkg.clone(),
            driver: dialect,
            conn: self.conn.clone(),
            gofmt: self.gofmt,
        };
        let mut report = scaffold(&skeleton, &templates, confirm.as_mut())?;

        if let Some(schema) = schema {
            let opts = GenOptions {
                app_dir,
                pkg_path,
                runtime_pkg,
                gofmt: self.gofmt,
            };
            let level = Artifacts::MODEL | Artifacts::CONTROLLER | Artifacts::ROUTER;
            let generated = generate(&schema, level, &templates, &opts, confirm.as_mut())?;
            report.written.extend(generated.written);
            report.skipped.extend(generated.skipped);
            report.notices.extend(generated.notices);
        }

        tracing::info!("New API successfully created!");
        Ok(report)
    }
}
