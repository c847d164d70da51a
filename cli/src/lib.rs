use anyhow::{Context, Result};
use plotsearch::{Document, QueryEngine, TitleResolver};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// One line of a `.jsonl` corpus file.
#[derive(Debug, Deserialize)]
struct JsonDoc {
    id: String,
    text: String,
}

#[derive(Debug, Serialize)]
pub struct Hit {
    pub rank: usize,
    pub doc_id: String,
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct QueryReport {
    pub query: String,
    pub hits: Vec<Hit>,
}

/// Title lookup backed by the metadata table. Resolves the ids the core
/// hands back into display titles.
#[derive(Debug, Default)]
pub struct TitleCatalog {
    titles: HashMap<String, String>,
}

impl TitleCatalog {
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl TitleResolver for TitleCatalog {
    fn resolve_title(&self, doc_id: &str) -> Option<String> {
        self.titles.get(doc_id).cloned()
    }
}

/// Load the corpus from a file or a directory of files. Tab-separated
/// `id<TAB>text` lines and JSONL documents are both accepted; malformed
/// lines and duplicate ids are skipped, never fatal.
pub fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "tsv" | "txt" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
        files.sort();
    } else {
        files.push(path.to_path_buf());
    }

    let mut docs = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            load_jsonl(&file, &mut docs, &mut seen)?;
        } else {
            load_tsv(&file, &mut docs, &mut seen)?;
        }
    }
    Ok(docs)
}

fn load_tsv(file: &Path, docs: &mut Vec<Document>, seen: &mut HashSet<String>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("open corpus file {}", file.display()))?;
    for (line_no, line) in BufReader::new(f).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match line.split_once('\t') {
            Some((id, text)) if !id.trim().is_empty() => {
                push_document(docs, seen, id.trim().to_owned(), text.to_owned());
            }
            _ => {
                tracing::warn!(
                    file = %file.display(),
                    line = line_no + 1,
                    "skipping malformed corpus line"
                );
            }
        }
    }
    Ok(())
}

fn load_jsonl(file: &Path, docs: &mut Vec<Document>, seen: &mut HashSet<String>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("open corpus file {}", file.display()))?;
    for (line_no, line) in BufReader::new(f).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<JsonDoc>(&line) {
            Ok(json_doc) => push_document(docs, seen, json_doc.id, json_doc.text),
            Err(err) => {
                tracing::warn!(
                    file = %file.display(),
                    line = line_no + 1,
                    %err,
                    "skipping malformed json document"
                );
            }
        }
    }
    Ok(())
}

fn push_document(docs: &mut Vec<Document>, seen: &mut HashSet<String>, id: String, text: String) {
    if !seen.insert(id.clone()) {
        tracing::warn!(doc_id = %id, "skipping duplicate document id");
        return;
    }
    docs.push(Document { id, text });
}

/// Metadata table: tab-separated rows with the document id in the first
/// column and the title in the third. Extra columns are ignored.
pub fn load_catalog(path: &Path) -> Result<TitleCatalog> {
    let f = File::open(path).with_context(|| format!("open metadata file {}", path.display()))?;
    let mut titles = HashMap::new();
    for (line_no, line) in BufReader::new(f).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut cols = line.split('\t');
        let id = cols.next().unwrap_or("").trim();
        let title = cols.nth(1).map(str::trim).unwrap_or("");
        if id.is_empty() || title.is_empty() {
            tracing::warn!(
                file = %path.display(),
                line = line_no + 1,
                "skipping malformed metadata row"
            );
            continue;
        }
        titles.insert(id.to_owned(), title.to_owned());
    }
    Ok(TitleCatalog { titles })
}

/// One query per line; blank lines are skipped.
pub fn load_queries(path: &Path) -> Result<Vec<String>> {
    let f = File::open(path).with_context(|| format!("open queries file {}", path.display()))?;
    let mut queries = Vec::new();
    for line in BufReader::new(f).lines() {
        let line = line?;
        let query = line.trim();
        if !query.is_empty() {
            queries.push(query.to_owned());
        }
    }
    Ok(queries)
}

/// Run every query through the engine and resolve the returned ids to
/// display titles. Unresolved ids fall back to the raw id.
pub fn run_queries(
    engine: &QueryEngine,
    resolver: &dyn TitleResolver,
    queries: &[String],
) -> Vec<QueryReport> {
    queries
        .iter()
        .map(|query| {
            let hits = engine
                .search(query)
                .into_iter()
                .enumerate()
                .map(|(i, doc_id)| {
                    let title = resolver
                        .resolve_title(&doc_id)
                        .unwrap_or_else(|| doc_id.clone());
                    Hit {
                        rank: i + 1,
                        doc_id,
                        title,
                    }
                })
                .collect();
            QueryReport {
                query: query.clone(),
                hits,
            }
        })
        .collect()
}

pub fn render_text(reports: &[QueryReport]) -> String {
    let mut out = String::new();
    for report in reports {
        out.push_str(&format!("query: {}\n", report.query));
        if report.hits.is_empty() {
            out.push_str("  (no results)\n");
        }
        for hit in &report.hits {
            out.push_str(&format!("  {:>2}. {} [{}]\n", hit.rank, hit.title, hit.doc_id));
        }
    }
    out
}
