//! `dim_store` — an in-memory, multi-key multi-value store.
//!
//! A container associates each stored value with a composite key made of
//! several independently-indexed *dimensions*; every dimension can be
//! queried by equality or range predicate, with none privileged as a
//! "primary" key. Annotate a struct with `#[derive(MultiDimMap)]` and mark
//! each key field `#[dimension(multi)]` (the stored key at that position
//! is a set of elements) or `#[dimension(auto)]` (the store assigns the
//! element itself, from a private sequence generator); fields carrying
//! neither attribute are plain value payload.
//!
//! ```
//! use dim_store::MultiDimMap;
//! use rustc_hash::FxHashSet;
//!
//! #[derive(MultiDimMap, Clone, Debug)]
//! struct Article {
//!     #[dimension(auto)]
//!     id: u64,
//!     #[dimension(multi)]
//!     name: FxHashSet<String>,
//!     #[dimension(multi)]
//!     tags: FxHashSet<String>,
//!     body: String,
//! }
//!
//! let mut store = MultiDimArticleStore::new();
//! let (id,) = store.insert(ArticleInsert {
//!     name: FxHashSet::from_iter(["About Haskell".to_string()]),
//!     tags: FxHashSet::from_iter(["Haskell".to_string()]),
//!     body: "Haskell is great".to_string(),
//! });
//! assert_eq!(id, 1);
//! assert_eq!(store.len(), 1);
//! ```
//!
//! The core is a single-threaded, value-like data structure: no operation
//! blocks, performs I/O, or is internally parallel (spec.md §5). It has no
//! wire, file, CLI, or environment-variable surface (spec.md §6).

pub mod auto;
pub mod index;
pub mod selection;
pub mod update;

pub use auto::{AutoGenerator, AutoKey};
pub use index::{DimIndex, IdSet};
pub use selection::{evaluate, Selection, Shape};
pub use update::Update;

pub use dim_store_derive::MultiDimMap;

/// Re-exported so the derive macro's generated code can refer to
/// `::dim_store::rustc_hash::FxHashSet`/`FxHashMap` without callers
/// needing a direct dependency on `rustc-hash` themselves.
#[cfg(feature = "rustc-hash")]
pub use rustc_hash;

/// Re-exported so the derive macro can conditionally derive
/// `Serialize`/`Deserialize` on generated payload structs without callers
/// needing a direct dependency on `serde` themselves.
#[cfg(feature = "serde")]
pub use serde;

/// Store-local object identifier (spec.md §3): a monotonically increasing,
/// never-reused, non-negative integer, unique within one store instance
/// for its lifetime.
pub type Oid = u64;
