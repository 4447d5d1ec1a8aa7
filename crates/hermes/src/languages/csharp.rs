//! C# language support for Hermes.
//!
//! Node-shape helpers over the tree-sitter-c-sharp grammar. The classifier,
//! the source model and the index builder go through these instead of
//! poking at field names directly.

use tree_sitter::Node;

use super::tree_sitter_utils::first_child_of_kind;
use super::LanguageSupport;

/// Tree-sitter node kind constants for C# grammar.
///
/// These match the node types defined in tree-sitter-c-sharp. Using constants
/// prevents typos and makes supported node types explicit.
pub mod node_kinds {
    // Type declarations
    pub const CLASS_DECLARATION: &str = "class_declaration";
    pub const STRUCT_DECLARATION: &str = "struct_declaration";
    pub const INTERFACE_DECLARATION: &str = "interface_declaration";
    pub const ENUM_DECLARATION: &str = "enum_declaration";
    pub const RECORD_DECLARATION: &str = "record_declaration";
    pub const RECORD_STRUCT_DECLARATION: &str = "record_struct_declaration";
    pub const DELEGATE_DECLARATION: &str = "delegate_declaration";

    // Members
    pub const METHOD_DECLARATION: &str = "method_declaration";
    pub const CONSTRUCTOR_DECLARATION: &str = "constructor_declaration";
    pub const DESTRUCTOR_DECLARATION: &str = "destructor_declaration";
    pub const PROPERTY_DECLARATION: &str = "property_declaration";
    pub const EVENT_DECLARATION: &str = "event_declaration";
    pub const ENUM_MEMBER_DECLARATION: &str = "enum_member_declaration";
    pub const LOCAL_FUNCTION_STATEMENT: &str = "local_function_statement";
    pub const VARIABLE_DECLARATOR: &str = "variable_declarator";

    // Types & identifiers
    pub const IDENTIFIER: &str = "identifier";
    pub const GENERIC_NAME: &str = "generic_name";
    pub const TYPE_ARGUMENT_LIST: &str = "type_argument_list";
    pub const TYPE_PARAMETER: &str = "type_parameter";

    // Structure
    pub const PARAMETER_LIST: &str = "parameter_list";
    pub const PARAMETER: &str = "parameter";
}

use node_kinds::{
    CLASS_DECLARATION, CONSTRUCTOR_DECLARATION, DELEGATE_DECLARATION, DESTRUCTOR_DECLARATION,
    ENUM_DECLARATION, ENUM_MEMBER_DECLARATION, EVENT_DECLARATION, GENERIC_NAME, IDENTIFIER,
    INTERFACE_DECLARATION, LOCAL_FUNCTION_STATEMENT, METHOD_DECLARATION, PARAMETER,
    PARAMETER_LIST, PROPERTY_DECLARATION, RECORD_DECLARATION, RECORD_STRUCT_DECLARATION,
    STRUCT_DECLARATION, TYPE_ARGUMENT_LIST, TYPE_PARAMETER, VARIABLE_DECLARATOR,
};

/// Type declarations a constructor can belong to.
pub const TYPE_DECLARATIONS: &[&str] = &[
    CLASS_DECLARATION,
    STRUCT_DECLARATION,
    RECORD_DECLARATION,
    RECORD_STRUCT_DECLARATION,
];

/// Declarations whose `name` identifier is a token of the declaration itself,
/// not a separate reference.
const NAME_OWNING_DECLARATIONS: &[&str] = &[
    CLASS_DECLARATION,
    STRUCT_DECLARATION,
    INTERFACE_DECLARATION,
    ENUM_DECLARATION,
    RECORD_DECLARATION,
    RECORD_STRUCT_DECLARATION,
    DELEGATE_DECLARATION,
    METHOD_DECLARATION,
    CONSTRUCTOR_DECLARATION,
    DESTRUCTOR_DECLARATION,
    PROPERTY_DECLARATION,
    EVENT_DECLARATION,
    ENUM_MEMBER_DECLARATION,
    LOCAL_FUNCTION_STATEMENT,
    VARIABLE_DECLARATOR,
    PARAMETER,
    TYPE_PARAMETER,
];

/// C# language support implementation.
pub struct CSharpLanguage;

impl LanguageSupport for CSharpLanguage {
    fn extensions(&self) -> &[&str] {
        &["cs"]
    }

    fn project_extension(&self) -> &str {
        "csproj"
    }

    fn tree_sitter_language(&self) -> tree_sitter::Language {
        tree_sitter_c_sharp::LANGUAGE.into()
    }

    fn inferred_type_placeholder(&self) -> &str {
        "var"
    }
}

/// The `name` field of a declaration node.
pub fn declared_name(node: Node<'_>) -> Option<Node<'_>> {
    node.child_by_field_name("name")
}

/// The base identifier of a generic name (`Foo` in `Foo<Bar>`).
///
/// Older grammar revisions don't expose a `name` field on `generic_name`, so
/// fall back to the first identifier child.
pub fn generic_base_identifier(node: Node<'_>) -> Option<Node<'_>> {
    if node.kind() != GENERIC_NAME {
        return None;
    }
    node.child_by_field_name("name")
        .or_else(|| first_child_of_kind(node, IDENTIFIER))
}

/// The type arguments of a generic name, in declaration order.
pub fn type_arguments(node: Node<'_>) -> Vec<Node<'_>> {
    if node.kind() != GENERIC_NAME {
        return Vec::new();
    }
    let Some(list) = node
        .child_by_field_name("type_arguments")
        .or_else(|| first_child_of_kind(node, TYPE_ARGUMENT_LIST))
    else {
        return Vec::new();
    };
    let mut cursor = list.walk();
    list.named_children(&mut cursor).collect()
}

/// The parameters of a method or constructor, in declaration order.
pub fn parameters(node: Node<'_>) -> Vec<Node<'_>> {
    let Some(list) = node
        .child_by_field_name("parameters")
        .filter(|list| list.kind() == PARAMETER_LIST)
    else {
        return Vec::new();
    };
    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter(|child| child.kind() == PARAMETER)
        .collect()
}

/// The declared type of a parameter, if it has one (lambda parameters may not).
pub fn parameter_type(node: Node<'_>) -> Option<Node<'_>> {
    if node.kind() != PARAMETER {
        return None;
    }
    node.child_by_field_name("type")
}

/// The name identifier of the type declaration enclosing `node`.
pub fn enclosing_type_name(node: Node<'_>) -> Option<Node<'_>> {
    super::tree_sitter_utils::ancestor_of_kind(node, TYPE_DECLARATIONS).and_then(declared_name)
}

/// Whether `leaf` is the name token of `parent` rather than a reference in
/// its own right.
///
/// A class name belongs to its class declaration; the `Foo` in `Foo<Bar>`
/// belongs to the generic name. An identifier used as a type or expression is
/// its own reference.
pub fn owns_name_token(parent: Node<'_>, leaf: Node<'_>) -> bool {
    if parent.kind() == GENERIC_NAME {
        return generic_base_identifier(parent) == Some(leaf);
    }
    NAME_OWNING_DECLARATIONS.contains(&parent.kind()) && declared_name(parent) == Some(leaf)
}
