use std::path::Path;

use anyhow::Result;
use rayon::prelude::*;
use tracing::warn;

use crate::domain::edge::FileGraph;
use crate::domain::language::Language;
use crate::domain::walker::GraphBuilder;
use crate::infrastructure::SyntaxFrontend;
use crate::ports::GraphExporter;

pub struct AnalyzeUsecase<'a> {
    pub builder: GraphBuilder,
    pub exporter: &'a dyn GraphExporter,
}

impl<'a> AnalyzeUsecase<'a> {
    pub fn run(&self, sources: &[(String, String)], export_path: &Path) -> Result<()> {
        // One independent walk per file; nothing is shared between them.
        let graphs: Vec<FileGraph> = sources
            .par_iter()
            .map(|(path, code)| self.analyze_file(path, code))
            .collect();
        self.exporter.export(&graphs, export_path)
    }

    /// Analyze one source file. Files without a known grammar, or that
    /// the grammar cannot tokenize at all, yield an empty graph rather
    /// than an error.
    pub fn analyze_file(&self, path: &str, code: &str) -> FileGraph {
        let Some(language) = Language::from_path(Path::new(path)) else {
            warn!(path, "no grammar for file extension; skipping");
            return FileGraph {
                file: path.to_string(),
                pairs: Vec::new(),
            };
        };

        let Some(tree) = SyntaxFrontend::parse(language, code) else {
            warn!(path, %language, "parser produced no tree; skipping");
            return FileGraph {
                file: path.to_string(),
                pairs: Vec::new(),
            };
        };

        FileGraph {
            file: path.to_string(),
            pairs: self.builder.build_graph(&tree, code),
        }
    }
}
