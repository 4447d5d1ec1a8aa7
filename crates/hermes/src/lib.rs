//! # Hermes: Handler Lookup for Mediator-Style C# Solutions
//!
//! Hermes answers one question: given a command, request or query type name,
//! where is its handler? It parses C# sources with tree-sitter and applies
//! the usual mediator conventions instead of full type resolution.
//!
//! ## How a name is resolved
//!
//! - Names ending in `Command` look in the `*Domain` project, under
//!   `CommandHandlers`, for `IRequestHandler<Name>`
//! - Names ending in `Request` or `Query` look in the `*Application` project,
//!   under `RequestHandlers` or `QueryHandlers`
//! - Anything else is matched against the parameters of every `Handle`
//!   method in the solution
//!
//! The conventions are configurable per workspace, see [`HermesConfig`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use hermes::Hermes;
//! use std::path::Path;
//!
//! let hermes = Hermes::open(Path::new("/path/to/solution"))?;
//!
//! let resolution = hermes.resolve("CreateOrderCommand");
//! for location in &resolution.locations {
//!     println!("{}", location.display());
//! }
//! # Ok::<(), hermes::Error>(())
//! ```

mod classify;
mod config;
mod error;
mod filter;
mod index;
mod languages;
mod resolver;
mod source;
mod types;
mod workspace;

pub use classify::{Declaration, identifier_of, is_supported_context};
pub use config::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, HermesConfig, StyleConfig};
pub use error::{Error, LoadError, LoadErrorKind, Result};
pub use filter::{HandlerStyle, select_module, unit_matches, units_for_style};
pub use index::{ArgumentShape, CandidateArgument, HandlerCandidate, HandlerIndex, MethodSummary};
pub use resolver::{Resolution, Resolver, Strategy};
pub use source::{Module, SourceUnit};
pub use types::{HandlerLocation, Position, Span};
pub use workspace::Workspace;

use std::path::Path;

use tracing::debug;

/// Handler lookup over a loaded workspace.
///
/// `Hermes` pairs a [`Workspace`] with the conventions used to search it.
/// Every query rescans the parsed trees; nothing is cached between calls.
#[derive(Debug)]
pub struct Hermes {
    workspace: Workspace,
    resolver: Resolver,
}

impl Hermes {
    /// Load a workspace and the configuration it carries.
    ///
    /// Uses `<root>/.hermes/config.yaml` if present, the defaults otherwise.
    ///
    /// # Errors
    ///
    /// Fails if the root does not exist, the configuration is invalid, or
    /// the grammar cannot be loaded.
    pub fn open(root: &Path) -> Result<Self> {
        let config = HermesConfig::discover(root, None)?;
        let workspace = Workspace::load(root)?;
        Ok(Self::with_config(workspace, config))
    }

    /// Search an already-loaded workspace with explicit conventions.
    #[must_use]
    pub fn with_config(workspace: Workspace, config: HermesConfig) -> Self {
        debug!(
            root = %workspace.root().display(),
            modules = workspace.modules().len(),
            units = workspace.unit_count(),
            load_errors = workspace.errors().len(),
            "Workspace ready"
        );
        Self {
            workspace,
            resolver: Resolver::new(config),
        }
    }

    /// Find the handler of `name`, choosing the strategy from its suffix.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Resolution {
        self.resolver.resolve_name(self.workspace.modules(), name)
    }

    /// Find the handler of `name` with an explicit strategy.
    #[must_use]
    pub fn resolve_with(&self, name: &str, strategy: Strategy) -> Resolution {
        self.resolver.resolve(self.workspace.modules(), name, strategy)
    }

    /// Find the handler of whatever the cursor points at.
    ///
    /// `path` may be absolute or relative to the workspace root; the offset
    /// counts characters from the start of the file.
    ///
    /// # Errors
    ///
    /// `Error::UnknownUnit` if the workspace has no unit at `path`.
    pub fn resolve_at(&self, path: &Path, char_offset: usize) -> Result<Option<Resolution>> {
        let relative = self.workspace.relative_path(path);
        self.resolver
            .resolve_at(self.workspace.modules(), &relative, char_offset)
    }

    /// Convert a 1-based line and column in `path` to a character offset.
    ///
    /// # Errors
    ///
    /// `Error::UnknownUnit` if the workspace has no unit at `path`.
    pub fn offset_of(&self, path: &Path, line: u32, column: u32) -> Result<Option<usize>> {
        let relative = self.workspace.relative_path(path);
        let unit = resolver::find_unit(self.workspace.modules(), &relative)
            .ok_or_else(|| Error::UnknownUnit(relative.clone()))?;
        Ok(unit.char_offset(line, column))
    }

    /// The loaded workspace.
    #[must_use]
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// The conventions in use.
    #[must_use]
    pub fn config(&self) -> &HermesConfig {
        self.resolver.config()
    }
}
