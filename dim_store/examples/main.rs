use dim_store::Update;
use rustc_hash::FxHashSet;

mod inner {
    use dim_store::MultiDimMap;
    use rustc_hash::FxHashSet;

    #[derive(MultiDimMap, Clone, Debug)]
    pub(crate) struct Article {
        #[dimension(auto)]
        pub(crate) id: u64,
        #[dimension(multi)]
        pub(crate) name: FxHashSet<String>,
        #[dimension(multi)]
        pub(crate) tags: FxHashSet<String>,
        pub(crate) body: String,
    }
}

use inner::{Article, ArticleInsert, ArticleValue};

fn tags(names: &[&str]) -> FxHashSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn main() {
    let mut store = inner::MultiDimArticleStore::new();

    let (haskell_id,) = store.insert(ArticleInsert {
        name: tags(&["About Haskell"]),
        tags: tags(&["Haskell", "Programming"]),
        body: "Haskell is a purely functional programming language.".to_string(),
    });
    let (go_id,) = store.insert(ArticleInsert {
        name: tags(&["About Go"]),
        tags: tags(&["Go", "Programming"]),
        body: "Go is a statically typed, compiled programming language.".to_string(),
    });
    println!("inserted Haskell article as oid {haskell_id}, Go article as oid {go_id}");

    for article in store.lookup_refs(&inner::eq_tags("Programming".to_string())) {
        println!("tagged Programming: {article:?}");
    }

    let haskell_and_go = inner::eq_tags("Haskell".to_string()).or(inner::eq_tags("Go".to_string()));
    println!("matching Haskell or Go: {} article(s)", store.lookup_refs(&haskell_and_go).len());

    store.update(&inner::eq_id(haskell_id), |article: &Article| {
        Update::Keep(ArticleValue {
            body: format!("{} (edited)", article.body),
        })
    });

    store.update(&inner::eq_id(go_id), |_| {
        Update::Rekey(
            ArticleValue {
                body: "Go is a statically typed, compiled programming language by Google.".to_string(),
            },
            inner::ArticleRekey {
                name: tags(&["About Go"]),
                tags: tags(&["Go", "Programming", "Google"]),
            },
        )
    });

    for article in store.lookup_refs(&inner::eq_tags("Google".to_string())) {
        println!("now tagged Google: {article:?}");
    }

    let removed = store.delete(&inner::eq_name("About Haskell".to_string()));
    println!("removed {removed} article(s) named 'About Haskell'");
    assert_eq!(store.len(), 1);
}
