use anyhow::{bail, Result};
use clap::Parser;
use plotsearch::QueryEngine;
use plotsearch_cli::{
    load_catalog, load_documents, load_queries, render_text, run_queries, TitleCatalog,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "plotsearch")]
#[command(about = "Batch TF-IDF search over a movie-plot corpus", long_about = None)]
struct Cli {
    /// Corpus path: a TSV/JSONL file or a directory of them
    #[arg(long)]
    plots: PathBuf,
    /// Metadata table mapping document ids to titles (TSV)
    #[arg(long)]
    metadata: Option<PathBuf>,
    /// File with one query per line
    #[arg(long)]
    queries: Option<PathBuf>,
    /// Ad-hoc query; may be repeated
    #[arg(long = "query")]
    query: Vec<String>,
    /// Emit reports as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let mut queries = cli.query.clone();
    if let Some(path) = &cli.queries {
        queries.extend(load_queries(path)?);
    }
    if queries.is_empty() {
        bail!("no queries given; pass --queries or --query");
    }

    let docs = load_documents(&cli.plots)?;
    let catalog = match &cli.metadata {
        Some(path) => load_catalog(path)?,
        None => TitleCatalog::default(),
    };

    let start = Instant::now();
    let engine = QueryEngine::from_documents(&docs);
    tracing::info!(
        num_docs = docs.len(),
        num_titles = catalog.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "index built"
    );

    let reports = run_queries(&engine, &catalog, &queries);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print!("{}", render_text(&reports));
    }
    Ok(())
}
