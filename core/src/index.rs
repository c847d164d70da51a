use std::collections::HashMap;

use crate::{DocId, TokenizedDocument};

/// One entry in a term's inverted list: the document and the raw number of
/// occurrences of the term in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    pub term_frequency: u32,
}

/// Corpus-wide term statistics: inverted lists with raw term frequencies,
/// document frequencies, and the total document count. Built once from the
/// full tokenized corpus and read-only afterwards; a corpus change means a
/// full rebuild.
#[derive(Debug, Default)]
pub struct CorpusIndex {
    postings: HashMap<String, Vec<Posting>>,
    document_frequency: HashMap<String, u32>,
    num_docs: usize,
}

impl CorpusIndex {
    /// Two-pass batch aggregation: group (term, doc) pairs into raw counts,
    /// then derive per-term document frequencies from the distinct-document
    /// lists.
    pub fn build(docs: &[TokenizedDocument]) -> Self {
        let mut postings: HashMap<String, Vec<Posting>> = HashMap::new();
        for doc in docs {
            let mut counts: HashMap<&str, u32> = HashMap::new();
            for token in &doc.tokens {
                *counts.entry(token).or_insert(0) += 1;
            }
            for (term, term_frequency) in counts {
                postings.entry(term.to_owned()).or_default().push(Posting {
                    doc_id: doc.id.clone(),
                    term_frequency,
                });
            }
        }

        let mut document_frequency = HashMap::with_capacity(postings.len());
        for (term, list) in postings.iter_mut() {
            // One posting per (term, doc), so the list length is the df.
            list.sort_by(|a, b| a.doc_id.cmp(&b.doc_id));
            document_frequency.insert(term.clone(), list.len() as u32);
        }

        let num_docs = docs.len();
        tracing::debug!(num_docs, num_terms = postings.len(), "corpus index built");
        Self {
            postings,
            document_frequency,
            num_docs,
        }
    }

    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    pub fn is_empty(&self) -> bool {
        self.num_docs == 0
    }

    /// Inverted list for a term, sorted by document id. Empty for terms
    /// never seen in the corpus.
    pub fn postings(&self, term: &str) -> &[Posting] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Raw occurrence count of `term` in `doc_id`; 0 when either is unknown.
    pub fn term_frequency(&self, term: &str, doc_id: &str) -> u32 {
        let list = self.postings(term);
        list.binary_search_by(|p| p.doc_id.as_str().cmp(doc_id))
            .map(|i| list[i].term_frequency)
            .unwrap_or(0)
    }

    /// Number of distinct documents containing `term`; 0 for unknown terms.
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    /// TF-IDF weight `tf * log2(n / df)`. Zero for an empty corpus, an
    /// unindexed term, or a document that lacks the term; the log is never
    /// taken with `df == 0`.
    pub fn tfidf(&self, term: &str, doc_id: &str) -> f32 {
        if self.num_docs == 0 {
            return 0.0;
        }
        let df = self.document_frequency(term);
        if df == 0 {
            return 0.0;
        }
        let tf = self.term_frequency(term, doc_id);
        if tf == 0 {
            return 0.0;
        }
        tf as f32 * (self.num_docs as f32 / df as f32).log2()
    }
}
