use std::collections::{HashMap, HashSet};

use crate::{DocId, TokenizedDocument};

/// Per-document distinct token sets, built once alongside the corpus index
/// from the same tokenized documents. Raw frequencies are discarded; the
/// phrase scorer measures presence overlap, not weighted magnitude.
#[derive(Debug, Default)]
pub struct VectorStore {
    vectors: HashMap<DocId, HashSet<String>>,
}

impl VectorStore {
    pub fn build(docs: &[TokenizedDocument]) -> Self {
        let vectors = docs
            .iter()
            .map(|doc| (doc.id.clone(), doc.tokens.iter().cloned().collect()))
            .collect();
        Self { vectors }
    }

    pub fn vector(&self, doc_id: &str) -> Option<&HashSet<String>> {
        self.vectors.get(doc_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DocId, &HashSet<String>)> {
        self.vectors.iter()
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Shared-term count divided by the square roots of the two distinct set
/// sizes. Zero when either set is empty rather than dividing by zero.
pub fn cosine_similarity(a: &HashSet<String>, b: &HashSet<String>) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let overlap = a.intersection(b).count() as f32;
    overlap / ((a.len() as f32).sqrt() * (b.len() as f32).sqrt())
}
