use std::collections::HashSet;
use std::sync::Arc;

use crate::index::CorpusIndex;
use crate::vectors::{cosine_similarity, VectorStore};
use crate::{tokenize_corpus, DocId, Document};

/// Result count used by the fixed-`k` `search` dispatch path.
pub const DEFAULT_TOP_K: usize = 10;

/// Read-only query front end over a finished corpus index and vector store.
///
/// Both stores must be fully built before an engine exists, so every query
/// runs against complete corpus-wide statistics; the engine never mutates
/// them and clones share the same underlying data.
#[derive(Clone)]
pub struct QueryEngine {
    index: Arc<CorpusIndex>,
    vectors: Arc<VectorStore>,
}

impl QueryEngine {
    pub fn new(index: Arc<CorpusIndex>, vectors: Arc<VectorStore>) -> Self {
        Self { index, vectors }
    }

    /// Tokenize each document once and build both stores from the shared
    /// token arrays.
    pub fn from_documents(docs: &[Document]) -> Self {
        let tokenized = tokenize_corpus(docs);
        Self::new(
            Arc::new(CorpusIndex::build(&tokenized)),
            Arc::new(VectorStore::build(&tokenized)),
        )
    }

    pub fn index(&self) -> &CorpusIndex {
        &self.index
    }

    pub fn vectors(&self) -> &VectorStore {
        &self.vectors
    }

    /// Rank the documents containing `term` by TF-IDF weight. Documents
    /// without the term are never scored; an unknown term yields no results.
    pub fn search_term(&self, term: &str, k: usize) -> Vec<DocId> {
        let term = term.to_lowercase();
        let scored = self
            .index
            .postings(&term)
            .iter()
            .map(|posting| {
                let weight = self.index.tfidf(&term, &posting.doc_id);
                (posting.doc_id.clone(), weight)
            })
            .collect();
        top_k(scored, k)
    }

    /// Rank every document by set-overlap cosine similarity against the
    /// distinct query terms. Documents sharing no term are dropped rather
    /// than padded in at zero.
    pub fn search_phrase(&self, terms: &[String], k: usize) -> Vec<DocId> {
        let query: HashSet<String> = terms.iter().map(|t| t.to_lowercase()).collect();
        let scored = self
            .vectors
            .iter()
            .map(|(doc_id, vector)| (doc_id.clone(), cosine_similarity(&query, vector)))
            .filter(|(_, score)| *score > 0.0)
            .collect();
        top_k(scored, k)
    }

    /// Dispatch: a query with interior whitespace is a phrase, anything else
    /// a single term. Blank queries yield no results.
    pub fn search(&self, query: &str) -> Vec<DocId> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        if query.contains(char::is_whitespace) {
            let terms: Vec<String> = query.split_whitespace().map(str::to_owned).collect();
            self.search_phrase(&terms, DEFAULT_TOP_K)
        } else {
            self.search_term(query, DEFAULT_TOP_K)
        }
    }
}

/// Highest score first; equal scores order by document id so repeated
/// queries return identical rankings.
fn top_k(mut scored: Vec<(DocId, f32)>, k: usize) -> Vec<DocId> {
    scored.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    scored.truncate(k);
    scored.into_iter().map(|(doc_id, _)| doc_id).collect()
}
