use std::fs::OpenOptions;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::errors::{GenError, GenResult};

/// Decides whether an existing file may be overwritten.
pub trait Confirm {
    fn confirm(&mut self, path: &Path) -> bool;
}

/// Asks on the terminal, re-asking until the answer is yes or no.
/// End of input counts as no.
pub struct Prompt<R> {
    input: R,
}

impl Prompt<std::io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            input: std::io::stdin().lock(),
        }
    }
}

impl<R: BufRead> Prompt<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Confirm for Prompt<R> {
    fn confirm(&mut self, path: &Path) -> bool {
        eprint!(
            "'{}' already exists. Do you want to overwrite it? [Yes|No] ",
            path.display()
        );
        loop {
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => return false,
                Ok(_) => {}
            }
            match parse_answer(&line) {
                Some(answer) => return answer,
                None => eprint!("Please type yes or no and then press enter: "),
            }
        }
    }
}

fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Fixed answer, from `--yes` / `--no`.
#[derive(Debug, Clone, Copy)]
pub struct Assume(pub bool);

impl Confirm for Assume {
    fn confirm(&mut self, _path: &Path) -> bool {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Skipped,
}

/// What to do when the target file cannot be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnOpenError {
    Abort,
    Skip,
}

/// Writes generated files, asking before clobbering and keeping a tally.
pub struct Writer<'a> {
    confirm: &'a mut dyn Confirm,
    gofmt: bool,
    written: Vec<PathBuf>,
    skipped: Vec<PathBuf>,
}

impl<'a> Writer<'a> {
    pub fn new(confirm: &'a mut dyn Confirm, gofmt: bool) -> Self {
        Self {
            confirm,
            gofmt,
            written: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn write(
        &mut self,
        path: &Path,
        contents: &str,
        on_open: OnOpenError,
    ) -> GenResult<WriteOutcome> {
        if path.exists() && !self.confirm.confirm(path) {
            tracing::warn!("Skipped create file '{}'", path.display());
            return Ok(self.skip(path));
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path);
        let mut file = match file {
            Ok(file) => file,
            Err(e) if on_open == OnOpenError::Skip => {
                tracing::warn!("Could not open '{}': {}", path.display(), e);
                return Ok(self.skip(path));
            }
            Err(e) => return Err(GenError::io(path, e)),
        };
        file.write_all(contents.as_bytes())
            .map_err(|e| GenError::io(path, e))?;

        tracing::info!("create {}", path.display());
        if self.gofmt && path.extension().is_some_and(|ext| ext == "go") {
            gofmt(path);
        }
        self.written.push(path.to_path_buf());
        Ok(WriteOutcome::Written)
    }

    /// Records a file that was deliberately left alone.
    pub fn skip(&mut self, path: &Path) -> WriteOutcome {
        self.skipped.push(path.to_path_buf());
        WriteOutcome::Skipped
    }

    pub fn finish(self) -> (Vec<PathBuf>, Vec<PathBuf>) {
        (self.written, self.skipped)
    }
}

fn gofmt(path: &Path) {
    match std::process::Command::new("gofmt").arg("-w").arg(path).status() {
        Ok(status) if status.success() => {}
        Ok(status) => tracing::warn!("gofmt {} exited with {}", path.display(), status),
        Err(e) => tracing::warn!("Could not run gofmt on {}: {}", path.display(), e),
    }
}

/// Creates `dir` (and parents) if missing.
pub fn ensure_dir(dir: &Path) -> GenResult<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| GenError::io(dir, e))?;
        tracing::info!("create {}", dir.display());
    }
    Ok(())
}
