//! Mermaid Flowchart Exporter
//!
//! Renders the emitted pairs as a mermaid flowchart. Labels arrive
//! pre-escaped for the flowchart syntax; this layer only assigns stable
//! node ids and lays the edges out.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;

use crate::domain::edge::FileGraph;
use crate::ports::GraphExporter;

pub struct MermaidExporter;

impl MermaidExporter {
    /// Convert the per-file graphs to one mermaid flowchart string.
    /// Multiple files render as one subgraph each.
    pub fn to_mermaid(graphs: &[FileGraph]) -> String {
        let mut lines = vec!["flowchart TD".to_string()];

        for (index, graph) in graphs.iter().enumerate() {
            let indent = if graphs.len() > 1 {
                lines.push(format!("    subgraph file{}[\"{}\"]", index, graph.file));
                "        "
            } else {
                "    "
            };

            // One node per distinct label, ids stable within the chart.
            let mut ids: IndexMap<&str, String> = IndexMap::new();
            for pair in &graph.pairs {
                for label in pair {
                    let next = format!("n{}_{}", index, ids.len());
                    ids.entry(label.as_str()).or_insert(next);
                }
            }

            for pair in &graph.pairs {
                let from = &ids[pair[0].as_str()];
                let to = &ids[pair[1].as_str()];
                lines.push(format!(
                    "{indent}{from}[\"{}\"] --> {to}[\"{}\"]",
                    pair[0], pair[1]
                ));
            }

            if graphs.len() > 1 {
                lines.push("    end".to_string());
            }
        }

        lines.join("\n")
    }
}

impl GraphExporter for MermaidExporter {
    fn export(&self, graphs: &[FileGraph], path: &Path) -> Result<()> {
        let content = Self::to_mermaid(graphs);
        fs::write(path, content)
            .with_context(|| format!("Failed to write output file {}", path.display()))
    }
}
