use std::sync::Arc;
use std::thread;

use docsift_core::chunk::{chunk_text, ChunkingConfig};
use docsift_core::corpus::MemoryCorpus;
use docsift_core::embedding::similarity;
use docsift_core::index::{IndexConfig, Indexer};
use docsift_core::vectorizer::{Vectorizer, VectorizerConfig};

fn android_corpus() -> MemoryCorpus {
    MemoryCorpus::from_pairs([
        (
            "architecture.md",
            "Android application with Clean Architecture and MVVM pattern",
        ),
        ("coroutines.md", "Kotlin coroutines for asynchronous operations"),
        ("compose.md", "Jetpack Compose for modern UI development"),
    ])
}

fn long_document() -> String {
    let sentences = [
        "Repositories hide data sources behind interfaces. ",
        "ViewModels expose state flows to the UI layer. ",
        "Use cases hold business rules and stay framework free. ",
        "Dependency injection wires modules at application start. ",
    ];
    sentences.iter().cycle().take(40).copied().collect()
}

#[test]
fn test_transform_always_has_dimension_components() {
    let mut vectorizer = Vectorizer::default();
    let long = long_document();
    let texts: [&str; 5] = ["", "a", "!!!", "android", &long];
    for text in texts {
        assert_eq!(vectorizer.transform(text).len(), 384);
    }
    vectorizer.fit(&["android kotlin"]);
    for text in texts {
        assert_eq!(vectorizer.transform(text).len(), 384);
    }
}

#[test]
fn test_custom_dimension_applies_everywhere() {
    let config = IndexConfig {
        vectorizer: VectorizerConfig {
            dimension: 16,
            ..VectorizerConfig::default()
        },
        ..IndexConfig::default()
    };
    let indexer = Indexer::new(config);
    indexer.index(&android_corpus());
    let snapshot = indexer.snapshot();
    assert!(snapshot.vectorizer().vocabulary_size() <= 16);
    assert!(snapshot.embeddings().iter().all(|e| e.len() == 16));
}

#[test]
fn test_search_results_sorted_and_ranked() {
    let indexer = Indexer::default();
    let mut corpus = android_corpus();
    corpus.insert("guide.md", long_document());
    let count = indexer.index(&corpus);
    assert!(count > 3);

    for top_k in [1, 3, count, count + 10] {
        let hits = indexer.search("ViewModels state UI", top_k).unwrap();
        assert_eq!(hits.len(), top_k.min(count));
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        for (i, hit) in hits.iter().enumerate() {
            assert_eq!(hit.rank, i + 1);
        }
    }
}

#[test]
fn test_search_scenario_architecture_query() {
    let indexer = Indexer::default();
    indexer.index(&android_corpus());
    let hits = indexer.search("Android MVVM architecture", 3).unwrap();
    assert_eq!(hits[0].fragment.document_id, "architecture.md");
    assert!(hits[0].score > hits[1].score);
    assert!(hits[0].score > hits[2].score);
}

#[test]
fn test_empty_corpus_then_search() {
    let indexer = Indexer::default();
    assert_eq!(indexer.index(&MemoryCorpus::new()), 0);
    assert!(indexer.search("anything", 5).unwrap().is_empty());
}

#[test]
fn test_equal_scores_keep_fragment_order() {
    let indexer = Indexer::default();
    indexer.index(&MemoryCorpus::from_pairs([
        ("c.md", "kotlin"),
        ("a.md", "kotlin"),
        ("b.md", "kotlin"),
    ]));
    let hits = indexer.search("kotlin", 3).unwrap();
    let ids: Vec<&str> = hits.iter().map(|h| h.fragment.document_id.as_str()).collect();
    assert_eq!(ids, vec!["a.md", "b.md", "c.md"]);
    assert!(hits.iter().all(|h| (h.score - 1.0).abs() < 1e-5));
}

#[test]
fn test_indexing_is_reproducible() {
    let mut corpus = android_corpus();
    corpus.insert("guide.md", long_document());

    let first = Indexer::default();
    first.index(&corpus);
    let second = Indexer::default();
    second.index(&corpus);

    assert_eq!(first.snapshot().fragments(), second.snapshot().fragments());
    assert_eq!(first.snapshot().embeddings(), second.snapshot().embeddings());
}

#[test]
fn test_fragments_match_chunker() {
    let indexer = Indexer::default();
    let text = long_document();
    indexer.index(&MemoryCorpus::from_pairs([("guide.md", text.clone())]));
    let expected = chunk_text(&text, &ChunkingConfig::default());
    let actual: Vec<String> = indexer
        .snapshot()
        .fragments()
        .iter()
        .map(|f| f.text.clone())
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_stored_embeddings_are_unit_or_zero() {
    let indexer = Indexer::default();
    let mut corpus = android_corpus();
    corpus.insert("guide.md", long_document());
    corpus.insert("empty.md", "");
    indexer.index(&corpus);
    for e in indexer.snapshot().embeddings() {
        let self_sim = similarity(e, e).unwrap();
        assert!(self_sim == 0.0 || (self_sim - 1.0).abs() < 1e-5);
    }
}

#[test]
fn test_concurrent_search_during_rebuild() {
    let indexer = Arc::new(Indexer::default());
    indexer.index(&android_corpus());

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let indexer = Arc::clone(&indexer);
            thread::spawn(move || {
                for _ in 0..200 {
                    let snapshot = indexer.snapshot();
                    assert_eq!(snapshot.fragments().len(), snapshot.embeddings().len());
                    let hits = snapshot.search("kotlin coroutines", 2).unwrap();
                    assert!(hits.len() <= 2);
                }
            })
        })
        .collect();

    let writer = {
        let indexer = Arc::clone(&indexer);
        thread::spawn(move || {
            for i in 0..20 {
                let mut corpus = android_corpus();
                corpus.insert(format!("extra{}.md", i), long_document());
                assert!(indexer.index(&corpus) > 3);
            }
        })
    };

    for r in readers {
        r.join().unwrap();
    }
    writer.join().unwrap();
    assert!(indexer.fragment_count() > 3);
}
