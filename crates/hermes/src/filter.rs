//! Folder and module heuristics.
//!
//! Handlers are found by convention, not by type resolution: a command
//! handler lives in a unit whose path mentions `commandhandlers`, inside the
//! project whose name ends with `domain`. These predicates are the whole of
//! that convention.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{HermesConfig, StyleConfig};
use crate::source::{Module, SourceUnit};

/// A handler style served by a single module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerStyle {
    /// Commands (`FooCommand`)
    Command,
    /// Requests and queries (`FooRequest`, `FooQuery`)
    Request,
}

impl HandlerStyle {
    /// The conventions for this style.
    #[must_use]
    pub fn conventions(self, config: &HermesConfig) -> &StyleConfig {
        match self {
            Self::Command => &config.command,
            Self::Request => &config.request,
        }
    }

    /// Lowercase label for display.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Request => "request",
        }
    }
}

/// Whether `unit`'s path mentions any folder term, ignoring case.
#[must_use]
pub fn unit_matches(unit: &SourceUnit, folders: &[String]) -> bool {
    let path = unit.path().to_string_lossy().to_lowercase();
    folders.iter().any(|term| path.contains(term.as_str()))
}

/// The units of `module` that belong to `style`, in enumeration order.
#[must_use]
pub fn units_for_style<'w>(
    module: &'w Module,
    style: HandlerStyle,
    config: &HermesConfig,
) -> Vec<&'w SourceUnit> {
    let folders = &style.conventions(config).folders;
    module
        .units()
        .iter()
        .filter(|unit| unit_matches(unit, folders))
        .collect()
}

/// The module that serves `style`: the first whose name ends with the
/// style's suffix, ignoring case.
///
/// Returns `None` if no module matches. If several do, the first in
/// enumeration order wins and the rest are reported.
#[must_use]
pub fn select_module<'w>(
    modules: &'w [Module],
    style: HandlerStyle,
    config: &HermesConfig,
) -> Option<&'w Module> {
    let suffix = &style.conventions(config).module_suffix;
    let mut matching = modules.iter().filter(|m| m.name_ends_with(suffix));
    let selected = matching.next();

    let ignored: Vec<&str> = matching.map(Module::name).collect();
    if let Some(module) = selected {
        if ignored.is_empty() {
            debug!(style = style.as_str(), module = module.name(), "Selected module");
        } else {
            warn!(
                style = style.as_str(),
                module = module.name(),
                ignored = ?ignored,
                "Several modules match the suffix, using the first"
            );
        }
    } else {
        debug!(style = style.as_str(), suffix = %suffix, "No module matches the suffix");
    }
    selected
}
