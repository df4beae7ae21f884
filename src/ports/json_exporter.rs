//! JSON Exporter
//!
//! Serializes the emitted pairs for downstream diagram tooling. A single
//! input file exports as a bare array of [label, callee] pairs; multiple
//! files export as an object keyed by file path, in input order.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::domain::edge::FileGraph;
use crate::ports::GraphExporter;

pub struct JsonExporter;

impl JsonExporter {
    pub fn to_json(graphs: &[FileGraph]) -> Result<String> {
        let payload = match graphs {
            [single] => serde_json::to_value(&single.pairs)?,
            many => {
                let mut map = Map::new();
                for graph in many {
                    map.insert(graph.file.clone(), serde_json::to_value(&graph.pairs)?);
                }
                Value::Object(map)
            }
        };
        Ok(serde_json::to_string_pretty(&payload)?)
    }
}

impl GraphExporter for JsonExporter {
    fn export(&self, graphs: &[FileGraph], path: &Path) -> Result<()> {
        let content = Self::to_json(graphs)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write output file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(file: &str) -> FileGraph {
        FileGraph {
            file: file.to_string(),
            pairs: vec![["2:4: A".to_string(), "B".to_string()]],
        }
    }

    #[test]
    fn test_single_file_is_bare_array() {
        let json = JsonExporter::to_json(&[sample("app.js")]).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0][0], "2:4: A");
        assert_eq!(value[0][1], "B");
    }

    #[test]
    fn test_multiple_files_keyed_by_path() {
        let json = JsonExporter::to_json(&[sample("a.js"), sample("b.js")]).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert!(value.is_object());
        assert!(value.get("a.js").is_some());
        assert!(value.get("b.js").is_some());
    }
}
