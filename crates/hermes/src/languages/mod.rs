//! Language-specific syntax knowledge.
//!
//! The engine matches handlers by textual names pulled out of tree-sitter
//! syntax trees. Everything that depends on a concrete grammar (node kinds,
//! field names, the inferred-type keyword, file extensions) lives behind the
//! `LanguageSupport` trait so the classifier and indexer stay grammar-agnostic
//! in shape.

pub mod csharp;
pub mod tree_sitter_utils;

/// The language handled by the engine.
#[must_use]
pub fn source_language() -> &'static dyn LanguageSupport {
    &csharp::CSharpLanguage
}

/// Trait for the grammar-specific facts the engine relies on.
pub trait LanguageSupport: Send + Sync {
    /// File extensions of source units.
    fn extensions(&self) -> &[&str];

    /// File extension of project files that define a module.
    fn project_extension(&self) -> &str;

    /// Get the tree-sitter language for parsing.
    fn tree_sitter_language(&self) -> tree_sitter::Language;

    /// The keyword that asks the compiler to infer a type (`var` in C#).
    ///
    /// Names equal to this token are never resolvable.
    fn inferred_type_placeholder(&self) -> &str;

    /// Whether `path` names a source unit of this language.
    fn is_source_file(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.extensions()
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }

    /// Whether `path` names a project file of this language.
    fn is_project_file(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(self.project_extension()))
    }
}
