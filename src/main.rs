// Command-line entry point for Callvine.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use callvine::application::AnalyzeUsecase;
use callvine::domain::walker::GraphBuilder;
use callvine::infrastructure::SourceLoader;
use callvine::ports::json_exporter::JsonExporter;
use callvine::ports::mermaid_exporter::MermaidExporter;
use callvine::ports::GraphExporter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input source file path (can specify multiple)
    #[arg(short, long, required = false)]
    input: Vec<String>,

    /// Input source folder(s)
    #[arg(short = 'd', long, required = false)]
    folder: Vec<String>,

    /// Output file path
    #[arg(short, long)]
    output: PathBuf,

    /// Output format (json, mermaid)
    #[arg(short, long, default_value = "json")]
    format: String,

    /// Also resolve markup tags against symbols declared in the same
    /// file, not just import aliases
    #[arg(long)]
    permissive_components: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut sources: Vec<(String, String)> = Vec::new();
    for input_file in &cli.input {
        sources.push(SourceLoader::load_file(input_file)?);
    }
    for folder in &cli.folder {
        sources.extend(SourceLoader::load_folder(folder)?);
    }

    if sources.is_empty() {
        bail!("Please provide at least one --input <file> or --folder <dir>");
    }

    let exporter: Box<dyn GraphExporter> = match cli.format.as_str() {
        "json" => Box::new(JsonExporter),
        "mermaid" => Box::new(MermaidExporter),
        other => bail!("Unknown output format: {other} (expected json or mermaid)"),
    };

    let usecase = AnalyzeUsecase {
        builder: GraphBuilder::new().permissive(cli.permissive_components),
        exporter: exporter.as_ref(),
    };

    usecase.run(&sources, &cli.output)?;

    println!(
        "Analysis completed! Output written to {} (format: {})",
        cli.output.display(),
        cli.format
    );
    Ok(())
}
