use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::domain::language::Language;

pub struct SourceLoader;

impl SourceLoader {
    /// Read one explicit input file. The extension is not checked here;
    /// unsupported files are reported (and skipped) at analysis time.
    pub fn load_file(path: &str) -> Result<(String, String)> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {path}"))?;
        Ok((path.to_string(), content))
    }

    /// Recursively collect all analyzable sources under a folder.
    /// Returns a vector of (file_path, file_content).
    pub fn load_folder(dir: &str) -> Result<Vec<(String, String)>> {
        let mut files = Vec::new();
        Self::collect_recursive(Path::new(dir), &mut files)?;
        // Directory iteration order is platform-dependent; keep runs stable.
        files.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(files)
    }

    fn collect_recursive(dir: &Path, out: &mut Vec<(String, String)>) -> Result<()> {
        if dir.ends_with("node_modules") || dir.ends_with(".git") {
            return Ok(());
        }
        if !dir.exists() {
            return Ok(());
        }

        if dir.is_file() {
            if Language::from_path(dir).is_some() {
                let content = fs::read_to_string(dir)
                    .with_context(|| format!("Failed to read file {}", dir.display()))?;
                out.push((dir.display().to_string(), content));
            }
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                Self::collect_recursive(&path, out)?;
            } else if Language::from_path(&path).is_some() {
                match fs::read_to_string(&path) {
                    Ok(content) => out.push((path.display().to_string(), content)),
                    Err(error) => {
                        // Binary or unreadable files should not sink the run.
                        warn!(path = %path.display(), %error, "skipping unreadable file");
                    }
                }
            }
        }
        Ok(())
    }
}
