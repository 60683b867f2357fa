use songgraph::similarity::{compose, SELF_MATCH};
use songgraph::algo::cosine_similarity;
use songgraph::{find_similar, EmbeddingStore, MusicRecord, NodeKey, SimilarityEngine, SongQuery};
use std::sync::Arc;

fn store() -> EmbeddingStore {
    EmbeddingStore::new(
        4,
        vec![
            (NodeKey::artist("Drake"), vec![0.8, 0.2, 0.1, 0.0]),
            (NodeKey::artist("Future"), vec![0.7, 0.3, 0.0, 0.1]),
            (NodeKey::artist("Adele"), vec![-0.6, 0.1, 0.2, 0.0]),
            (NodeKey::genre("Hip hop"), vec![0.1, 0.0, 0.9, 0.3]),
            (NodeKey::genre("Soul"), vec![0.0, 0.2, -0.5, 0.8]),
        ],
    )
    .unwrap()
}

fn catalog() -> Vec<MusicRecord> {
    vec![
        MusicRecord::new("Fake Love", "Drake", "Hip hop"),
        MusicRecord::new("Mask Off", "Future", "Hip hop"),
        MusicRecord::new("Hello", "Adele", "Soul"),
        MusicRecord::new("Mask Off", "Drake", "Soul"),
        MusicRecord::new("Life Is Good", "Future", "Hip hop"),
    ]
}

#[test]
fn test_composite_self_similarity_is_one() {
    let store = store();
    let v = compose(&store, "Drake", "Hip hop");
    assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
}

#[test]
fn test_cosine_symmetric_and_bounded() {
    let store = store();
    let a = compose(&store, "Drake", "Hip hop");
    let b = compose(&store, "Adele", "Soul");
    let ab = cosine_similarity(&a, &b);
    assert_eq!(ab, cosine_similarity(&b, &a));
    assert!((-1.0..=1.0).contains(&ab));
}

#[test]
fn test_result_guarantees() {
    let catalog = catalog();
    let query = SongQuery::new("Fake Love", "Drake", "Hip hop");
    let results = find_similar(&query, &catalog, &store(), 10);

    // Sorted, no self match, no sentinel, unique titles
    assert!(results.windows(2).all(|w| w[0].similarity >= w[1].similarity));
    assert!(results.iter().all(|r| r.similarity != SELF_MATCH && r.similarity > 0.0));
    assert!(!results.iter().any(|r| r.record.title == "Fake Love" && r.record.artist == "Drake"));

    let mut titles: Vec<&str> = results.iter().map(|r| r.record.title.as_str()).collect();
    let before = titles.len();
    titles.sort();
    titles.dedup();
    assert_eq!(titles.len(), before);

    // Surviving duplicate has the best score for its title
    let mask_off = results.iter().find(|r| r.record.title == "Mask Off").unwrap();
    assert_eq!(mask_off.record.artist, "Future");
}

#[test]
fn test_identical_composition_scores_equal() {
    let catalog = catalog();
    let query = SongQuery::new("Fake Love", "Drake", "Hip hop");
    let results = find_similar(&query, &catalog, &store(), 10);

    let mask_off = results.iter().find(|r| r.record.title == "Mask Off").unwrap();
    let life = results.iter().find(|r| r.record.title == "Life Is Good").unwrap();
    assert_eq!(mask_off.similarity, life.similarity);
    assert_eq!(mask_off.influence, life.influence);
}

#[test]
fn test_unknown_query_returns_nothing() {
    let results = find_similar(&SongQuery::new("?", "Nobody", "Nothing"), &catalog(), &store(), 5);
    assert!(results.is_empty());
}

#[test]
fn test_engine_concurrent_queries_during_publish() {
    let engine = Arc::new(SimilarityEngine::new(
        Arc::new(catalog()),
        Arc::new(EmbeddingStore::empty(4)),
    ));
    let query = SongQuery::new("Fake Love", "Drake", "Hip hop");

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let query = query.clone();
            std::thread::spawn(move || {
                for _ in 0..50 {
                    let results = engine.find_similar(&query, 5);
                    // Either the empty store (nothing) or the full one
                    assert!(results.is_empty() || results.len() == 2);
                }
            })
        })
        .collect();

    engine.publish(Arc::new(store()));
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(
        engine.find_similar(&query, 5),
        find_similar(&query, &catalog(), &store(), 5)
    );
}
