//! The dimension index: an ordered map from a single dimension's element
//! type to the set of object ids stored under that element (spec.md §4.1).

use std::collections::{BTreeMap, BTreeSet};

use crate::Oid;

/// A set of object ids. Backed by a `BTreeSet` rather than a bitset or
/// hashed set: ids are small, non-negative, and the evaluator only ever
/// needs set-equality plus cheap union/intersection (spec.md §9).
pub type IdSet = BTreeSet<Oid>;

/// Ordered map `E -> IdSet` for one dimension of a store's key.
///
/// `insert`/`delete`/`lookup` are `O(log n)` in the number of distinct
/// elements at this dimension; `split`/`split_lookup` are `O(log n)` plus
/// the cost of unioning the matched buckets, per spec.md's complexity
/// target. Empty buckets are always removed so range queries stay cheap.
#[derive(Debug, Clone)]
pub struct DimIndex<E: Ord + Clone> {
    buckets: BTreeMap<E, IdSet>,
}

impl<E: Ord + Clone> Default for DimIndex<E> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }
}

impl<E: Ord + Clone> DimIndex<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `oid` under the single element `e`, creating the bucket if
    /// absent. Used for `auto` dimensions, which always install exactly
    /// one element per oid.
    pub fn insert_one(&mut self, e: E, oid: Oid) {
        self.buckets.entry(e).or_default().insert(oid);
    }

    /// Adds `oid` under every element of `es`. An empty `es` leaves the
    /// index unchanged — the oid is still considered present at this
    /// dimension by spec.md invariant 1, tracked independently via the
    /// primary value table rather than any index bucket (spec.md §9 open
    /// question, resolved to accept empty multi sets).
    pub fn insert_many<'a>(&mut self, es: impl IntoIterator<Item = &'a E>, oid: Oid)
    where
        E: 'a,
    {
        for e in es {
            self.buckets.entry(e.clone()).or_default().insert(oid);
        }
    }

    /// Removes `oid` from the bucket at every element of `es`, dropping
    /// buckets that become empty.
    pub fn delete_many<'a>(&mut self, es: impl IntoIterator<Item = &'a E>, oid: Oid)
    where
        E: 'a,
    {
        for e in es {
            if let Some(bucket) = self.buckets.get_mut(e) {
                bucket.remove(&oid);
                if bucket.is_empty() {
                    self.buckets.remove(e);
                }
            }
        }
    }

    /// The bucket at `e`, or an empty set if absent.
    pub fn lookup(&self, e: &E) -> IdSet {
        self.buckets.get(e).cloned().unwrap_or_default()
    }

    /// The union of buckets strictly below `e` and the union of buckets
    /// strictly above `e`. `e` itself, if present, is in neither half.
    pub fn split(&self, e: &E) -> (IdSet, IdSet) {
        use std::ops::Bound;

        let mut less = IdSet::new();
        for (_, v) in self.buckets.range((Bound::Unbounded, Bound::Excluded(e))) {
            less.extend(v.iter().copied());
        }
        let mut greater = IdSet::new();
        for (_, v) in self.buckets.range((Bound::Excluded(e), Bound::Unbounded)) {
            greater.extend(v.iter().copied());
        }
        (less, greater)
    }

    /// As `split`, but also returns the bucket at `e` itself.
    pub fn split_lookup(&self, e: &E) -> (IdSet, IdSet, IdSet) {
        let (less, greater) = self.split(e);
        (less, self.lookup(e), greater)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}
