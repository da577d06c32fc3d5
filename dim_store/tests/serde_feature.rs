#![cfg(feature = "serde")]

use dim_store::MultiDimMap;
use rustc_hash::FxHashSet;

#[derive(MultiDimMap, Clone, Debug)]
struct Article {
    #[dimension(auto)]
    id: u64,
    #[dimension(multi)]
    name: FxHashSet<String>,
    #[dimension(multi)]
    tags: FxHashSet<String>,
    body: String,
}

fn tags(names: &[&str]) -> FxHashSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn insert_payload_round_trips_through_json() {
    let insert = ArticleInsert {
        name: tags(&["About Haskell"]),
        tags: tags(&["Haskell", "Programming"]),
        body: "Haskell is great".to_string(),
    };

    let json = serde_json::to_string(&insert).expect("ArticleInsert should serialize");
    let back: ArticleInsert = serde_json::from_str(&json).expect("ArticleInsert should deserialize");

    assert_eq!(back.name, insert.name);
    assert_eq!(back.tags, insert.tags);
    assert_eq!(back.body, insert.body);
}

#[test]
fn value_payload_round_trips_through_json() {
    let value = ArticleValue {
        body: "revised body".to_string(),
    };

    let json = serde_json::to_string(&value).expect("ArticleValue should serialize");
    let back: ArticleValue = serde_json::from_str(&json).expect("ArticleValue should deserialize");

    assert_eq!(back.body, value.body);
}

#[test]
fn rekey_payload_round_trips_through_json() {
    let rekey = ArticleRekey {
        name: tags(&["About Haskell"]),
        tags: tags(&["Haskell", "FP"]),
    };

    let json = serde_json::to_string(&rekey).expect("ArticleRekey should serialize");
    let back: ArticleRekey = serde_json::from_str(&json).expect("ArticleRekey should deserialize");

    assert_eq!(back.name, rekey.name);
    assert_eq!(back.tags, rekey.tags);
}

#[test]
fn inserted_article_is_findable_after_a_round_trip_through_its_insert_payload() {
    let insert = ArticleInsert {
        name: tags(&["About Go"]),
        tags: tags(&["Go", "Programming"]),
        body: "Go is pragmatic".to_string(),
    };
    let json = serde_json::to_string(&insert).unwrap();
    let restored: ArticleInsert = serde_json::from_str(&json).unwrap();

    let mut store = MultiDimArticleStore::new();
    let (id,) = store.insert(restored);

    let found = store.lookup_refs(&eq_tags("Go".to_string()));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, id);
}
