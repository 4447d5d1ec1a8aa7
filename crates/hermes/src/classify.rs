//! Declaration classifier: a uniform "name" for the node shapes the engine
//! understands.
//!
//! | shape | name |
//! |-------|------|
//! | class declaration | declared identifier |
//! | record declaration | declared identifier |
//! | generic name (`Foo<Bar>`) | base identifier (`Foo`) |
//! | identifier reference | identifier text |
//! | constructor declaration | enclosing type's identifier |
//! | parameter | declared type text, trimmed |
//!
//! Every other shape is `Unsupported` and has an empty name. A name equal to
//! the inferred-type keyword (`var`) is also reported as empty, so local type
//! inference can never match a handler.

use tree_sitter::Node;

use crate::languages::csharp::{self, node_kinds};
use crate::languages::source_language;
use crate::languages::tree_sitter_utils::node_text;

/// A node classified into one of the recognized shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration<'tree> {
    /// `class Foo { }`
    Class(Node<'tree>),
    /// `record Foo(...)` / `record struct Foo(...)`
    Record(Node<'tree>),
    /// `Foo<Bar>`
    GenericName(Node<'tree>),
    /// A bare identifier used as a type or expression
    Identifier(Node<'tree>),
    /// `public Foo(...) { }`
    Constructor(Node<'tree>),
    /// `Foo foo` in a parameter list
    Parameter(Node<'tree>),
    /// Anything else
    Unsupported,
}

impl<'tree> Declaration<'tree> {
    /// Classify a node by its kind.
    #[must_use]
    pub fn classify(node: Node<'tree>) -> Self {
        match node.kind() {
            node_kinds::CLASS_DECLARATION => Self::Class(node),
            node_kinds::RECORD_DECLARATION | node_kinds::RECORD_STRUCT_DECLARATION => {
                Self::Record(node)
            }
            node_kinds::GENERIC_NAME => Self::GenericName(node),
            node_kinds::IDENTIFIER => Self::Identifier(node),
            node_kinds::CONSTRUCTOR_DECLARATION => Self::Constructor(node),
            node_kinds::PARAMETER => Self::Parameter(node),
            _ => Self::Unsupported,
        }
    }

    /// Whether a query may start from this shape (the cursor's context).
    #[must_use]
    pub fn is_query_origin(&self) -> bool {
        matches!(
            self,
            Self::Class(_) | Self::Record(_) | Self::Constructor(_) | Self::Identifier(_)
        )
    }

    /// The conventional name of this declaration, empty if it has none.
    #[must_use]
    pub fn name(&self, content: &[u8]) -> String {
        let raw = match self {
            Self::Class(node) | Self::Record(node) => {
                csharp::declared_name(*node).and_then(|n| node_text(&n, content))
            }
            Self::GenericName(node) => {
                csharp::generic_base_identifier(*node).and_then(|n| node_text(&n, content))
            }
            Self::Identifier(node) => node_text(node, content),
            Self::Constructor(node) => csharp::enclosing_type_name(*node)
                .or_else(|| csharp::declared_name(*node))
                .and_then(|n| node_text(&n, content)),
            Self::Parameter(node) => csharp::parameter_type(*node)
                .and_then(|t| node_text(&t, content))
                .map(|text| text.trim().to_string()),
            Self::Unsupported => None,
        };

        match raw {
            Some(name) if name != source_language().inferred_type_placeholder() => name,
            _ => String::new(),
        }
    }
}

/// The conventional name of `node`, empty for unsupported shapes, missing
/// nodes and the inferred-type keyword.
#[must_use]
pub fn identifier_of(node: Option<Node<'_>>, content: &[u8]) -> String {
    node.map(Declaration::classify)
        .map_or_else(String::new, |decl| decl.name(content))
}

/// Whether a query may be started from `node`.
///
/// True only for query-origin shapes (class, record, constructor, identifier
/// reference) with a non-empty name.
#[must_use]
pub fn is_supported_context(node: Option<Node<'_>>, content: &[u8]) -> bool {
    let Some(node) = node else {
        return false;
    };
    let decl = Declaration::classify(node);
    decl.is_query_origin() && !decl.name(content).is_empty()
}
