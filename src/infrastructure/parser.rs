// tree-sitter front-end: maps a Language to its grammar and produces
// the syntax tree the walker consumes.

use tracing::warn;
use tree_sitter::{Parser, Tree};

use crate::domain::language::Language;

pub struct SyntaxFrontend;

impl SyntaxFrontend {
    /// Parse one source file. Parsers are built per call since
    /// `tree_sitter::Parser` is not Sync and walks run in parallel
    /// across files.
    pub fn parse(language: Language, source: &str) -> Option<Tree> {
        let grammar = match language {
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        };

        let mut parser = Parser::new();
        if let Err(error) = parser.set_language(&grammar) {
            warn!(%error, %language, "failed to load grammar");
            return None;
        }
        parser.parse(source, None)
    }
}
