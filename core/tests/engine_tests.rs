use plotsearch::{Document, QueryEngine, DEFAULT_TOP_K};

fn doc(id: &str, text: &str) -> Document {
    Document {
        id: id.to_string(),
        text: text.to_string(),
    }
}

fn two_doc_engine() -> QueryEngine {
    QueryEngine::from_documents(&[
        doc("doc1", "the cat sat on the mat"),
        doc("doc2", "the dog sat on the log"),
    ])
}

#[test]
fn term_search_returns_only_containing_documents() {
    let engine = two_doc_engine();
    assert_eq!(engine.search_term("cat", 10), vec!["doc1"]);
    assert_eq!(engine.search_term("dog", 10), vec!["doc2"]);
}

#[test]
fn term_search_is_case_insensitive() {
    let engine = two_doc_engine();
    assert_eq!(engine.search_term("CAT", 10), vec!["doc1"]);
}

#[test]
fn term_search_unknown_term_is_empty_not_an_error() {
    let engine = two_doc_engine();
    assert!(engine.search_term("zebra", 10).is_empty());
}

#[test]
fn term_search_ranks_by_descending_weight() {
    let engine = QueryEngine::from_documents(&[
        doc("a", "comet"),
        doc("b", "comet comet comet"),
        doc("c", "comet comet"),
        doc("d", "nothing shared"),
    ]);
    assert_eq!(engine.search_term("comet", 10), vec!["b", "c", "a"]);
}

#[test]
fn term_search_breaks_ties_by_doc_id() {
    let engine = QueryEngine::from_documents(&[
        doc("beta", "storm rising"),
        doc("alpha", "storm falling"),
        doc("gamma", "calm seas"),
    ]);
    // Equal tf and df give equal weights; order falls back to doc id.
    assert_eq!(engine.search_term("storm", 10), vec!["alpha", "beta"]);
}

#[test]
fn term_search_caps_results_at_k() {
    let docs: Vec<Document> = (0..12)
        .map(|i| {
            let body = vec!["comet"; i + 1].join(" ");
            doc(&format!("d{i:02}"), &body)
        })
        .chain(std::iter::once(doc("plain", "nothing relevant")))
        .collect();
    let engine = QueryEngine::from_documents(&docs);

    let hits = engine.search_term("comet", DEFAULT_TOP_K);
    assert_eq!(hits.len(), DEFAULT_TOP_K);
    // Highest raw frequency wins.
    assert_eq!(hits[0], "d11");

    // k beyond the number of matches returns all matches, no padding.
    assert_eq!(engine.search_term("comet", 100).len(), 12);
}

#[test]
fn phrase_search_prefers_larger_overlap() {
    let engine = two_doc_engine();
    let terms = vec!["cat".to_string(), "sat".to_string()];
    // doc1 shares {cat, sat}, doc2 only {sat}.
    assert_eq!(engine.search_phrase(&terms, 10), vec!["doc1", "doc2"]);
}

#[test]
fn phrase_search_drops_zero_similarity_documents() {
    let engine = two_doc_engine();
    let terms = vec!["cat".to_string(), "mat".to_string()];
    assert_eq!(engine.search_phrase(&terms, 10), vec!["doc1"]);
}

#[test]
fn phrase_search_with_no_known_terms_is_empty() {
    let engine = two_doc_engine();
    let terms = vec!["zebra".to_string(), "quagga".to_string()];
    assert!(engine.search_phrase(&terms, 10).is_empty());
}

#[test]
fn dispatch_classifies_term_versus_phrase() {
    let engine = two_doc_engine();
    assert_eq!(engine.search("cat"), vec!["doc1"]);
    assert_eq!(engine.search("cat sat"), vec!["doc1", "doc2"]);
}

#[test]
fn blank_queries_yield_no_results() {
    let engine = two_doc_engine();
    assert!(engine.search("").is_empty());
    assert!(engine.search("   \t ").is_empty());
}

#[test]
fn queries_are_idempotent() {
    let engine = two_doc_engine();
    let first = engine.search("dog sat log");
    let second = engine.search("dog sat log");
    assert_eq!(first, second);
}

#[test]
fn empty_corpus_answers_every_query_with_nothing() {
    let engine = QueryEngine::from_documents(&[]);
    assert!(engine.search("cat").is_empty());
    assert!(engine.search("cat sat").is_empty());
}

#[test]
fn results_never_contain_duplicate_ids() {
    let engine = QueryEngine::from_documents(&[
        doc("a", "storm storm voyage"),
        doc("b", "storm voyage voyage"),
    ]);
    for query in ["storm", "storm voyage"] {
        let hits = engine.search(query);
        let mut deduped = hits.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(hits.len(), deduped.len());
    }
}
