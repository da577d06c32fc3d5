use dim_store::{Selection, Update};
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

fn set(names: &[&str]) -> FxHashSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn haskell_article() -> ArticleInsert {
    ArticleInsert {
        name: set(&["About Haskell"]),
        tags: set(&["Haskell", "Programming"]),
        body: "Haskell is great".to_string(),
    }
}

fn go_article() -> ArticleInsert {
    ArticleInsert {
        name: set(&["About Go"]),
        tags: set(&["Go", "Programming"]),
        body: "Go is pragmatic".to_string(),
    }
}

#[test]
fn oids_are_assigned_starting_at_one_and_increase_monotonically() {
    let mut store = MultiDimArticleStore::new();
    let (id1,) = store.insert(haskell_article());
    let (id2,) = store.insert(go_article());
    assert_eq!(id1, 1);
    assert_eq!(id2, 2);
}

#[test]
fn empty_store_has_no_matches_for_any_selection() {
    let store = MultiDimArticleStore::new();
    assert!(store.lookup_refs(&Selection::all()).is_empty());
    assert!(store.lookup_refs(&eq_tags("Haskell".to_string())).is_empty());
}

#[test]
fn selection_none_always_resolves_empty() {
    let mut store = MultiDimArticleStore::new();
    store.insert(haskell_article());
    assert!(store.lookup_refs(&Selection::none()).is_empty());
}

#[test]
fn and_or_short_circuit_identities_hold_end_to_end() {
    let mut store = MultiDimArticleStore::new();
    store.insert(haskell_article());
    store.insert(go_article());

    let all_count = store.lookup_refs(&Selection::all()).len();
    let anded_with_all = eq_tags("Haskell".to_string()).and(Selection::all());
    assert_eq!(store.lookup_refs(&anded_with_all).len(), 1);

    let ored_with_all = eq_tags("Haskell".to_string()).or(Selection::all());
    assert_eq!(store.lookup_refs(&ored_with_all).len(), all_count);

    let anded_with_none = eq_tags("Haskell".to_string()).and(Selection::none());
    assert!(store.lookup_refs(&anded_with_none).is_empty());
}

#[test]
fn and_is_commutative_over_real_selections() {
    let mut store = MultiDimArticleStore::new();
    store.insert(haskell_article());
    store.insert(go_article());

    let a = eq_tags("Programming".to_string()).and(eq_tags("Haskell".to_string()));
    let b = eq_tags("Haskell".to_string()).and(eq_tags("Programming".to_string()));
    assert_eq!(store.lookup_refs(&a).len(), store.lookup_refs(&b).len());
}

#[test]
fn keep_replaces_value_fields_without_touching_indices() {
    let mut store = MultiDimArticleStore::new();
    let (id,) = store.insert(haskell_article());

    store.update(&eq_id(id), |article| {
        Update::Keep(ArticleValue {
            body: format!("{} (revised)", article.body),
        })
    });

    let found = store.lookup_refs(&eq_id(id));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].body, "Haskell is great (revised)");
    assert_eq!(store.lookup_refs(&eq_tags("Haskell".to_string())).len(), 1);
}

#[test]
fn rekey_replaces_multi_dimensions_but_preserves_the_auto_id() {
    let mut store = MultiDimArticleStore::new();
    let (id,) = store.insert(haskell_article());

    store.update(&eq_id(id), |_| {
        Update::Rekey(
            ArticleValue {
                body: "Haskell is purely functional".to_string(),
            },
            ArticleRekey {
                name: set(&["About Haskell"]),
                tags: set(&["Haskell", "FP"]),
            },
        )
    });

    assert!(store.lookup_refs(&eq_tags("Programming".to_string())).is_empty());
    let found = store.lookup_refs(&eq_tags("FP".to_string()));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, id);
}

#[test]
fn delete_removes_the_element_and_drains_its_index_buckets() {
    let mut store = MultiDimArticleStore::new();
    let (id,) = store.insert(haskell_article());

    let removed = store.delete(&eq_id(id));
    assert_eq!(removed, 1);
    assert_eq!(store.len(), 0);
    assert!(store.lookup_refs(&eq_tags("Haskell".to_string())).is_empty());
}

#[test]
fn deleting_one_of_several_sharing_a_tag_keeps_the_bucket_for_the_rest() {
    let mut store = MultiDimArticleStore::new();
    let (haskell_id,) = store.insert(haskell_article());
    store.insert(go_article());

    store.delete(&eq_id(haskell_id));

    let still_programming = store.lookup_refs(&eq_tags("Programming".to_string()));
    assert_eq!(still_programming.len(), 1);
    assert_eq!(still_programming[0].body, "Go is pragmatic");
}

#[test]
fn empty_multi_dimension_set_is_accepted_and_the_element_stays_findable_by_id() {
    let mut store = MultiDimArticleStore::new();
    let (id,) = store.insert(ArticleInsert {
        name: set(&["Untitled"]),
        tags: FxHashSet::default(),
        body: "no tags yet".to_string(),
    });

    assert_eq!(store.len(), 1);
    assert_eq!(store.lookup_refs(&eq_id(id)).len(), 1);
}

#[test]
fn from_list_builds_a_store_from_a_batch_of_inserts() {
    let store = MultiDimArticleStore::from_list([haskell_article(), go_article()]);
    assert_eq!(store.len(), 2);
}

#[test]
fn gt_lt_gte_lte_partition_a_range_consistently() {
    #[derive(MultiDimMap, Clone, Debug)]
    struct Reading {
        #[dimension(auto)]
        id: u64,
        #[dimension(multi)]
        value: std::collections::BTreeSet<i64>,
    }

    let mut store = MultiDimReadingStore::new();
    for v in [10, 20, 20, 30] {
        store.insert(ReadingInsert {
            value: std::collections::BTreeSet::from([v]),
        });
    }

    assert_eq!(store.lookup_refs(&gt_value(20)).len(), 1);
    assert_eq!(store.lookup_refs(&lt_value(20)).len(), 1);
    assert_eq!(store.lookup_refs(&gte_value(20)).len(), 3);
    assert_eq!(store.lookup_refs(&lte_value(20)).len(), 3);
    assert_eq!(store.lookup_refs(&eq_value(20)).len(), 2);
}
