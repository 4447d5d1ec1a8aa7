//! Workspace discovery: project files become modules, source files become
//! units.
//!
//! Handles two layouts:
//! 1. Solution with projects - every `*.csproj` defines a module named after
//!    the project file stem; its units are the `.cs` files under the
//!    project directory, minus nested projects
//! 2. Loose sources - no project file anywhere, so the whole root becomes one
//!    module named after the directory
//!
//! Enumeration order is fixed: modules by project path, units by relative
//! path. Files are read and parsed in parallel and put back in that order.
//!
//! Files that can't be read or decoded are recorded as `LoadError`s and
//! skipped; they never abort loading. A file that parses without a tree is
//! kept as an empty unit and also recorded.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{Error, LoadError, Result};
use crate::languages::source_language;
use crate::source::{Module, SourceUnit};

/// Directory names never descended into.
const EXCLUDED_DIRS: &[&str] = &["bin", "obj", "node_modules", "packages", "TestResults"];

/// All modules loaded from a workspace root.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    modules: Vec<Module>,
    errors: Vec<LoadError>,
}

/// A project found on disk, before its sources are loaded.
#[derive(Debug)]
struct ProjectInfo {
    name: String,
    dir: PathBuf,
}

impl Workspace {
    /// Discover and parse every module under `root`.
    ///
    /// # Errors
    ///
    /// Fails if `root` does not exist or the grammar cannot be loaded.
    /// Individual unreadable files are reported in [`Workspace::errors`].
    pub fn load(root: &Path) -> Result<Self> {
        let root = root.canonicalize().map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("workspace root not found: {}", root.display()),
            ))
        })?;

        let mut errors = Vec::new();
        let mut projects = Vec::new();
        let mut sources = Vec::new();
        walk_dir(&root, &mut projects, &mut sources, &mut errors);

        projects.sort_by(|a, b| a.dir.cmp(&b.dir).then_with(|| a.name.cmp(&b.name)));
        sources.sort();

        if projects.is_empty() {
            let name = root
                .file_name()
                .map_or_else(|| "workspace".to_string(), |n| n.to_string_lossy().to_string());
            debug!(root = %root.display(), module = %name, "No project files, using a single module");
            projects.push(ProjectInfo {
                name,
                dir: root.clone(),
            });
        }

        let mut modules = Vec::with_capacity(projects.len());
        for project in &projects {
            let owned: Vec<&PathBuf> = sources
                .iter()
                .filter(|file| owning_project(&projects, file).is_some_and(|p| p.dir == project.dir))
                .collect();
            let units = load_units(&root, &owned, &mut errors)?;
            debug!(
                module = %project.name,
                units = units.len(),
                "Loaded module"
            );
            modules.push(Module::new(project.name.clone(), units));
        }

        Ok(Self {
            root,
            modules,
            errors,
        })
    }

    /// Wrap modules the host has already parsed.
    #[must_use]
    pub fn from_modules(root: impl Into<PathBuf>, modules: Vec<Module>) -> Self {
        Self {
            root: root.into(),
            modules,
            errors: Vec::new(),
        }
    }

    /// Canonical workspace root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Modules in enumeration order.
    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Files that could not be loaded.
    #[must_use]
    pub fn errors(&self) -> &[LoadError] {
        &self.errors
    }

    /// Total number of units across all modules.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.modules.iter().map(|m| m.units().len()).sum()
    }

    /// Turn a user-supplied path into the unit path used inside the
    /// workspace (relative to the root).
    ///
    /// A relative path is taken relative to the root when it names a file
    /// there, and relative to the current directory otherwise.
    #[must_use]
    pub fn relative_path(&self, path: &Path) -> PathBuf {
        let cwd = std::env::current_dir().ok();
        relative_to_root(&self.root, path, cwd.as_deref())
    }
}

fn relative_to_root(root: &Path, path: &Path, cwd: Option<&Path>) -> PathBuf {
    if path.is_relative() && root.join(path).exists() {
        return path.to_path_buf();
    }
    let absolute = match cwd {
        Some(cwd) if path.is_relative() => cwd.join(path),
        _ => path.to_path_buf(),
    };
    let absolute = absolute.canonicalize().unwrap_or(absolute);
    absolute
        .strip_prefix(root)
        .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
}

/// The deepest project whose directory contains `file`.
fn owning_project<'p>(projects: &'p [ProjectInfo], file: &Path) -> Option<&'p ProjectInfo> {
    projects
        .iter()
        .filter(|p| file.starts_with(&p.dir))
        .max_by_key(|p| p.dir.components().count())
}

/// Outcome of loading one file.
#[derive(Debug)]
enum Loaded {
    /// Parsed with a syntax tree
    Parsed(SourceUnit),
    /// Kept without a syntax tree; scans treat it as empty
    Degraded(SourceUnit, LoadError),
    /// Not loaded at all
    Skipped(LoadError),
}

/// Read and parse files in parallel, keeping the given order.
fn load_units(root: &Path, files: &[&PathBuf], errors: &mut Vec<LoadError>) -> Result<Vec<SourceUnit>> {
    let loaded: Vec<Loaded> = files
        .par_iter()
        .map(|file| load_unit(root, file))
        .collect::<Result<_>>()?;
    Ok(collect_loaded(loaded, errors))
}

/// Split load outcomes into the module's units and the recorded errors.
fn collect_loaded(loaded: Vec<Loaded>, errors: &mut Vec<LoadError>) -> Vec<SourceUnit> {
    let mut units = Vec::with_capacity(loaded.len());
    for outcome in loaded {
        let error = match outcome {
            Loaded::Parsed(unit) => {
                units.push(unit);
                continue;
            }
            Loaded::Degraded(unit, e) => {
                units.push(unit);
                e
            }
            Loaded::Skipped(e) => e,
        };
        if error.kind.is_input_error() {
            debug!(path = %error.path.display(), kind = %error.kind, "Source file not usable");
        } else {
            warn!(path = %error.path.display(), kind = %error.kind, "Failed to load source file");
        }
        errors.push(error);
    }
    units
}

/// Load one file. The outer error is infrastructure (grammar), anything
/// wrong with the file itself is reported through `Loaded`.
fn load_unit(root: &Path, file: &Path) -> Result<Loaded> {
    let relative = file.strip_prefix(root).unwrap_or(file).to_path_buf();
    let bytes = match std::fs::read(file) {
        Ok(bytes) => bytes,
        Err(e) => return Ok(Loaded::Skipped(LoadError::io_error(relative, &e))),
    };
    let Ok(text) = String::from_utf8(bytes) else {
        return Ok(Loaded::Skipped(LoadError::encoding_error(relative)));
    };
    let unit = SourceUnit::parse(relative.clone(), text)?;
    if unit.syntax_root().is_none() {
        return Ok(Loaded::Degraded(unit, LoadError::parse_failed(relative)));
    }
    Ok(Loaded::Parsed(unit))
}

/// Recursively walk a directory, collecting project and source files.
///
/// Directories that cannot be read are recorded as load errors.
fn walk_dir(
    dir: &Path,
    projects: &mut Vec<ProjectInfo>,
    sources: &mut Vec<PathBuf>,
    errors: &mut Vec<LoadError>,
) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!(
                directory = %dir.display(),
                error = %e,
                "Cannot read directory, skipping"
            );
            errors.push(LoadError::io_error(dir.to_path_buf(), &e));
            return;
        }
    };

    let language = source_language();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(
                    directory = %dir.display(),
                    error = %e,
                    "Failed to read directory entry, skipping"
                );
                continue;
            }
        };

        let path = entry.path();
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.starts_with('.') || (is_excluded_dir(name) && path.is_dir()) {
                continue;
            }
        }

        if path.is_dir() {
            walk_dir(&path, projects, sources, errors);
        } else if path.is_file() {
            if language.is_project_file(&path) {
                let name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default();
                projects.push(ProjectInfo {
                    name,
                    dir: dir.to_path_buf(),
                });
            } else if language.is_source_file(&path) {
                sources.push(path);
            }
        }
    }
}

/// Check if a directory should be excluded from loading.
fn is_excluded_dir(name: &str) -> bool {
    EXCLUDED_DIRS
        .iter()
        .any(|excluded| excluded.eq_ignore_ascii_case(name))
}
