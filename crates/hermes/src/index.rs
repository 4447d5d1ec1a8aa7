//! Handler index: candidate handler declarations found by a tree scan.
//!
//! Two scans exist, both rebuilt on every query:
//!
//! - **Interface usages**: every `IRequestHandler<...>` generic name in a set
//!   of units, with its type arguments
//! - **Handle methods**: every method named `Handle` in every unit of every
//!   module, with its parameter types
//!
//! ## Ordering
//!
//! Units are scanned in parallel with rayon. `par_iter().map().collect()`
//! keeps input order, so the flattened candidate list follows unit
//! enumeration order and, inside a unit, document order. First-match
//! strategies depend on that.
//!
//! ```text
//! units ──par_iter──▶ Vec<Vec<HandlerCandidate>> ──flatten──▶ HandlerIndex
//!        (per unit)     (one Vec per unit, in order)
//! ```
//!
//! Candidates own their extracted names and positions; tree-sitter nodes
//! never cross threads.

use rayon::prelude::*;
use tracing::{debug, trace};
use tree_sitter::Node;

use crate::classify::Declaration;
use crate::languages::csharp::{self, node_kinds};
use crate::languages::tree_sitter_utils::{descendants_of_kind, node_text};
use crate::source::{Module, SourceUnit};
use crate::types::{Position, Span};

/// How a candidate argument was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentShape {
    /// A bare identifier type argument (`FooCommand`)
    Identifier,
    /// A nested generic type argument (`Envelope<FooCommand>`)
    Generic,
    /// Any other type argument (`int`, `Ns.Foo`, `Foo?`, ...)
    Other,
    /// A method parameter's declared type
    Parameter,
}

/// One type argument or parameter of a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateArgument {
    /// Classified name; empty if the shape has none
    pub name: String,
    /// How the argument was written
    pub shape: ArgumentShape,
}

/// A generic-interface usage or a marker-named method.
#[derive(Debug, Clone)]
pub struct HandlerCandidate<'w> {
    /// Unit the candidate was found in
    pub unit: &'w SourceUnit,
    /// Extent of the generic name or method declaration
    pub span: Span,
    /// Position of the marker identifier itself
    pub marker: Position,
    /// 1-based character offset of the marker within the candidate's own text
    pub marker_offset: u32,
    /// Type arguments or parameters, in declaration order
    pub arguments: Vec<CandidateArgument>,
}

/// A method declaration summarized for matching.
#[derive(Debug, Clone)]
pub struct MethodSummary {
    /// Method name
    pub name: String,
    /// Extent of the declaration
    pub span: Span,
    /// Position of the name identifier
    pub name_position: Position,
    /// 1-based character offset of the name within the declaration's text,
    /// counted from its first token (attributes included)
    pub name_offset: u32,
    /// Classified parameter type names, in order
    pub parameter_types: Vec<String>,
}

/// Candidates from one scan, in enumeration order.
#[derive(Debug, Default)]
pub struct HandlerIndex<'w> {
    candidates: Vec<HandlerCandidate<'w>>,
}

impl<'w> HandlerIndex<'w> {
    /// Index every generic name whose base identifier is `marker`.
    #[must_use]
    pub fn interface_usages(units: &[&'w SourceUnit], marker: &str) -> Self {
        let per_unit: Vec<Vec<HandlerCandidate<'w>>> = units
            .par_iter()
            .map(|unit| scan_interface_usages(*unit, marker))
            .collect();
        let index = Self::from_per_unit(per_unit);
        debug!(
            marker,
            units = units.len(),
            candidates = index.len(),
            "Indexed interface usages"
        );
        index
    }

    /// Index every method named `marker` in every unit of every module.
    #[must_use]
    pub fn handle_methods(modules: &'w [Module], marker: &str) -> Self {
        let units: Vec<&'w SourceUnit> = modules.iter().flat_map(Module::units).collect();
        let per_unit: Vec<Vec<HandlerCandidate<'w>>> = units
            .par_iter()
            .map(|unit| scan_handle_methods(*unit, marker))
            .collect();
        let index = Self::from_per_unit(per_unit);
        debug!(
            marker,
            modules = modules.len(),
            units = units.len(),
            candidates = index.len(),
            "Indexed handle methods"
        );
        index
    }

    fn from_per_unit(per_unit: Vec<Vec<HandlerCandidate<'w>>>) -> Self {
        Self {
            candidates: per_unit.into_iter().flatten().collect(),
        }
    }

    /// Candidates in enumeration order.
    #[must_use]
    pub fn candidates(&self) -> &[HandlerCandidate<'w>] {
        &self.candidates
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the scan found nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Summarize every method declaration in `unit`, in document order.
#[must_use]
pub fn methods_in(unit: &SourceUnit) -> Vec<MethodSummary> {
    let Some(root) = unit.syntax_root() else {
        return Vec::new();
    };
    let content = unit.text().as_bytes();
    descendants_of_kind(root, node_kinds::METHOD_DECLARATION)
        .into_iter()
        .filter_map(|method| summarize_method(unit, method, content))
        .collect()
}

fn summarize_method(unit: &SourceUnit, method: Node<'_>, content: &[u8]) -> Option<MethodSummary> {
    let name_node = csharp::declared_name(method)?;
    let name = node_text(&name_node, content)?;
    let parameter_types = csharp::parameters(method)
        .into_iter()
        .map(|param| Declaration::classify(param).name(content))
        .collect();
    Some(MethodSummary {
        name,
        span: unit.span_of(&method),
        name_position: unit.position(name_node.start_byte()),
        name_offset: offset_within(unit, &method, name_node.start_byte()),
        parameter_types,
    })
}

/// 1-based character offset of `byte_offset` within the text of `node`.
fn offset_within(unit: &SourceUnit, node: &Node<'_>, byte_offset: usize) -> u32 {
    let preceding = unit
        .text()
        .get(node.start_byte()..byte_offset)
        .map_or(0, |prefix| prefix.chars().count());
    u32::try_from(preceding + 1).unwrap_or(u32::MAX)
}

fn scan_interface_usages<'w>(unit: &'w SourceUnit, marker: &str) -> Vec<HandlerCandidate<'w>> {
    let Some(root) = unit.syntax_root() else {
        trace!(path = %unit.path().display(), "Unit has no syntax tree, skipping");
        return Vec::new();
    };
    let content = unit.text().as_bytes();

    descendants_of_kind(root, node_kinds::GENERIC_NAME)
        .into_iter()
        .filter(|generic| Declaration::GenericName(*generic).name(content) == marker)
        .map(|generic| {
            let arguments = csharp::type_arguments(generic)
                .into_iter()
                .map(|arg| CandidateArgument {
                    name: Declaration::classify(arg).name(content),
                    shape: match arg.kind() {
                        node_kinds::IDENTIFIER => ArgumentShape::Identifier,
                        node_kinds::GENERIC_NAME => ArgumentShape::Generic,
                        _ => ArgumentShape::Other,
                    },
                })
                .collect();
            let marker_start = csharp::generic_base_identifier(generic)
                .map_or(generic.start_byte(), |base| base.start_byte());
            HandlerCandidate {
                unit,
                span: unit.span_of(&generic),
                marker: unit.position(marker_start),
                marker_offset: offset_within(unit, &generic, marker_start),
                arguments,
            }
        })
        .collect()
}

fn scan_handle_methods<'w>(unit: &'w SourceUnit, marker: &str) -> Vec<HandlerCandidate<'w>> {
    methods_in(unit)
        .into_iter()
        .filter(|method| method.name == marker)
        .map(|method| HandlerCandidate {
            unit,
            span: method.span,
            marker: method.name_position,
            marker_offset: method.name_offset,
            arguments: method
                .parameter_types
                .into_iter()
                .map(|name| CandidateArgument {
                    name,
                    shape: ArgumentShape::Parameter,
                })
                .collect(),
        })
        .collect()
}
