pub mod engine;
pub mod index;
pub mod tokenizer;
pub mod vectors;

pub use engine::{QueryEngine, DEFAULT_TOP_K};
pub use index::{CorpusIndex, Posting};
pub use vectors::{cosine_similarity, VectorStore};

/// Externally assigned, opaque document identifier.
pub type DocId = String;

/// A raw corpus document before tokenization.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocId,
    pub text: String,
}

/// A document reduced to its token sequence. Produced once per document;
/// both the corpus index and the vector store are built from it.
#[derive(Debug, Clone)]
pub struct TokenizedDocument {
    pub id: DocId,
    pub tokens: Vec<String>,
}

/// Tokenize every document in corpus order.
pub fn tokenize_corpus(docs: &[Document]) -> Vec<TokenizedDocument> {
    docs.iter()
        .map(|doc| TokenizedDocument {
            id: doc.id.clone(),
            tokens: tokenizer::tokenize(&doc.text),
        })
        .collect()
}

/// Maps a document id back to a display title. Metadata storage lives
/// outside the search core; callers hand in an implementation.
pub trait TitleResolver {
    fn resolve_title(&self, doc_id: &str) -> Option<String>;
}
