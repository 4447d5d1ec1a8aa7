//! Handler resolution: from a requested type name to handler locations.
//!
//! Three strategies, picked by the requested name's suffix:
//!
//! | strategy | scope | match on | results |
//! |----------|-------|----------|---------|
//! | `Command` | command folders of the `*Domain` module | `IRequestHandler<T>` type arguments | first match |
//! | `Request` | request/query folders of the `*Application` module | `IRequestHandler<T>` type arguments | first match |
//! | `SolutionWide` | every unit of every module | `Handle(T ...)` parameters | all matches |
//!
//! Single-result strategies find the file through the interface usage, then
//! point at the first method in that file whose first parameter is the
//! requested type. They report no column.
//!
//! Solution-wide results carry the line the `Handle` declaration starts on
//! and, as column, the 1-based character offset of the `Handle` name inside
//! the declaration's own text (attributes and modifiers included), not its
//! column on the line.
//!
//! Matching is exact string equality on the written type name. Two types
//! with the same short name in different namespaces are indistinguishable.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::classify::{identifier_of, is_supported_context};
use crate::config::HermesConfig;
use crate::error::{Error, Result};
use crate::filter::{select_module, units_for_style, HandlerStyle};
use crate::index::{methods_in, ArgumentShape, HandlerIndex};
use crate::languages::source_language;
use crate::source::{Module, SourceUnit};
use crate::types::HandlerLocation;

/// How a requested name is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Command handler in the domain module, first match
    Command,
    /// Request or query handler in the application module, first match
    Request,
    /// Every `Handle` method in the workspace, all matches
    SolutionWide,
}

impl Strategy {
    /// Pick the strategy for `name` from its suffix, ignoring case.
    ///
    /// Command suffixes are checked first; names with neither suffix are
    /// resolved solution-wide.
    #[must_use]
    pub fn for_name(name: &str, config: &HermesConfig) -> Self {
        let lowered = name.trim().to_lowercase();
        let has_suffix =
            |suffixes: &[String]| suffixes.iter().any(|s| lowered.ends_with(s.as_str()));

        if has_suffix(&config.command.name_suffixes) {
            Self::Command
        } else if has_suffix(&config.request.name_suffixes) {
            Self::Request
        } else {
            Self::SolutionWide
        }
    }

    /// The handler style this strategy selects a module for.
    #[must_use]
    pub fn style(self) -> Option<HandlerStyle> {
        match self {
            Self::Command => Some(HandlerStyle::Command),
            Self::Request => Some(HandlerStyle::Request),
            Self::SolutionWide => None,
        }
    }

    /// Lowercase label for display.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Request => "request",
            Self::SolutionWide => "solution-wide",
        }
    }
}

/// The outcome of one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// The requested name
    pub query: String,
    /// Strategy that produced the result
    pub strategy: Strategy,
    /// Module scanned by a single-result strategy; `None` if none matched
    pub module: Option<String>,
    /// Handler locations in scan order
    pub locations: Vec<HandlerLocation>,
    /// Type arguments skipped because they were nested generics
    pub skipped_arguments: usize,
}

impl Resolution {
    fn empty(query: &str, strategy: Strategy) -> Self {
        Self {
            query: query.to_string(),
            strategy,
            module: None,
            locations: Vec::new(),
            skipped_arguments: 0,
        }
    }

    /// Whether no handler was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// The location to navigate to directly, if there is exactly one.
    #[must_use]
    pub fn unique(&self) -> Option<&HandlerLocation> {
        match self.locations.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Whether a single-result strategy found no module to scan.
    #[must_use]
    pub fn module_missing(&self) -> bool {
        self.strategy.style().is_some() && self.module.is_none()
    }
}

/// Resolves requested names against a set of modules.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: HermesConfig,
}

impl Resolver {
    /// Create a resolver with the given conventions.
    #[must_use]
    pub fn new(config: HermesConfig) -> Self {
        Self { config }
    }

    /// The conventions in use.
    #[must_use]
    pub fn config(&self) -> &HermesConfig {
        &self.config
    }

    /// Resolve `name` with the strategy its suffix selects.
    #[must_use]
    pub fn resolve_name(&self, modules: &[Module], name: &str) -> Resolution {
        self.resolve(modules, name, Strategy::for_name(name, &self.config))
    }

    /// Resolve `name` with an explicit strategy.
    #[must_use]
    pub fn resolve(&self, modules: &[Module], name: &str, strategy: Strategy) -> Resolution {
        let name = name.trim();
        if name.is_empty() || name == source_language().inferred_type_placeholder() {
            debug!(query = name, "Requested name is not resolvable");
            return Resolution::empty(name, strategy);
        }

        let resolution = match strategy.style() {
            Some(style) => self.resolve_single(modules, name, strategy, style),
            None => self.resolve_solution_wide(modules, name),
        };
        debug!(
            query = name,
            strategy = strategy.as_str(),
            module = ?resolution.module,
            found = resolution.locations.len(),
            skipped = resolution.skipped_arguments,
            "Resolution finished"
        );
        resolution
    }

    /// Resolve whatever the cursor at `char_offset` in `path` names.
    ///
    /// Returns `Ok(None)` when the cursor is not on a supported context (a
    /// class, record, constructor or identifier with a usable name).
    ///
    /// # Errors
    ///
    /// `Error::UnknownUnit` if no module contains a unit at `path`.
    pub fn resolve_at(
        &self,
        modules: &[Module],
        path: &Path,
        char_offset: usize,
    ) -> Result<Option<Resolution>> {
        let unit = find_unit(modules, path).ok_or_else(|| Error::UnknownUnit(path.to_path_buf()))?;
        let content = unit.text().as_bytes();
        let node = unit.node_at(char_offset);

        if !is_supported_context(node, content) {
            debug!(
                path = %path.display(),
                char_offset,
                node_kind = node.map(|n| n.kind()),
                "Cursor is not on a supported context"
            );
            return Ok(None);
        }

        let name = identifier_of(node, content);
        Ok(Some(self.resolve_name(modules, &name)))
    }

    fn resolve_single(
        &self,
        modules: &[Module],
        name: &str,
        strategy: Strategy,
        style: HandlerStyle,
    ) -> Resolution {
        let mut resolution = Resolution::empty(name, strategy);
        let Some(module) = select_module(modules, style, &self.config) else {
            return resolution;
        };
        resolution.module = Some(module.name().to_string());

        let units = units_for_style(module, style, &self.config);
        let index = HandlerIndex::interface_usages(&units, &self.config.interface_marker);

        for candidate in index.candidates() {
            for argument in &candidate.arguments {
                match (style, argument.shape) {
                    (_, ArgumentShape::Generic) => {
                        resolution.skipped_arguments += 1;
                        debug!(
                            path = %candidate.unit.path().display(),
                            line = candidate.span.start_line,
                            argument = %argument.name,
                            "Skipping nested generic type argument"
                        );
                        continue;
                    }
                    (HandlerStyle::Request, ArgumentShape::Other) => continue,
                    _ => {}
                }
                if argument.name != name {
                    continue;
                }

                trace!(
                    path = %candidate.unit.path().display(),
                    line = candidate.span.start_line,
                    "Interface usage names the requested type"
                );
                if let Some(line) = handler_line(candidate.unit, name) {
                    resolution.locations.push(HandlerLocation {
                        path: candidate.unit.path().to_path_buf(),
                        line,
                        column: None,
                    });
                    return resolution;
                }
            }
        }
        resolution
    }

    fn resolve_solution_wide(&self, modules: &[Module], name: &str) -> Resolution {
        let mut resolution = Resolution::empty(name, Strategy::SolutionWide);
        let index = HandlerIndex::handle_methods(modules, &self.config.method_marker);

        for candidate in index.candidates() {
            for argument in &candidate.arguments {
                if argument.name == name {
                    resolution.locations.push(HandlerLocation {
                        path: candidate.unit.path().to_path_buf(),
                        line: candidate.span.start().line,
                        column: Some(candidate.marker_offset),
                    });
                }
            }
        }
        resolution
    }
}

/// Line of the first method in `unit` whose first parameter is `name`.
fn handler_line(unit: &SourceUnit, name: &str) -> Option<u32> {
    methods_in(unit)
        .into_iter()
        .find(|method| method.parameter_types.first().is_some_and(|t| t == name))
        .map(|method| method.span.start_line)
}

/// The unit at `path` in any module.
pub(crate) fn find_unit<'w>(modules: &'w [Module], path: &Path) -> Option<&'w SourceUnit> {
    modules
        .iter()
        .flat_map(Module::units)
        .find(|unit| unit.path() == path)
}
