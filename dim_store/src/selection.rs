//! The selection algebra and query evaluator (spec.md §4.4, §4.5).
//!
//! `Selection<S>` is generic over a store's `Shape`, so a selection built
//! for one store can never be evaluated against another — the mismatch is
//! a compile error rather than a runtime precondition, per spec.md §9's
//! "store-shape tag" requirement.

use crate::index::IdSet;

/// What a generated store exposes to the evaluator: its per-dimension
/// predicate atoms, how to resolve one to an id-set, and how to produce
/// the universal id-set (`ALL`).
///
/// Implemented by the `#[derive(MultiDimMap)]` macro for each annotated
/// struct; never implemented by hand.
pub trait Shape {
    type Atom;

    fn eval_atom(&self, atom: &Self::Atom) -> IdSet;
    fn all_ids(&self) -> IdSet;
}

/// An algebraic predicate tree tagged to a specific store shape `S`
/// (spec.md §4.4). Construct atoms via the `eq_*`/`gt_*`/`lt_*`/`gte_*`/
/// `lte_*` functions a store's derive expansion generates, and combine
/// them with [`Selection::and`]/[`Selection::or`].
pub enum Selection<S: Shape> {
    All,
    None,
    And(Box<Selection<S>>, Box<Selection<S>>),
    Or(Box<Selection<S>>, Box<Selection<S>>),
    Atom(S::Atom),
}

// Written by hand rather than derived: `#[derive(Clone)]` would require
// `S: Clone`, which is not what we want to bound on here (only `S::Atom`
// needs to be `Clone`).
impl<S: Shape> Clone for Selection<S>
where
    S::Atom: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Selection::All => Selection::All,
            Selection::None => Selection::None,
            Selection::And(a, b) => Selection::And(a.clone(), b.clone()),
            Selection::Or(a, b) => Selection::Or(a.clone(), b.clone()),
            Selection::Atom(atom) => Selection::Atom(atom.clone()),
        }
    }
}

impl<S: Shape> Selection<S> {
    pub fn all() -> Self {
        Selection::All
    }

    pub fn none() -> Self {
        Selection::None
    }

    pub fn atom(atom: S::Atom) -> Self {
        Selection::Atom(atom)
    }

    /// Intersection, applying the mandatory short-circuit identities from
    /// spec.md §4.4: `AND(NONE, s) = AND(s, NONE) = NONE`,
    /// `AND(ALL, s) = AND(s, ALL) = s`.
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Selection::None, _) | (_, Selection::None) => Selection::None,
            (Selection::All, s) | (s, Selection::All) => s,
            (a, b) => Selection::And(Box::new(a), Box::new(b)),
        }
    }

    /// Union, applying the mandatory short-circuit identities from
    /// spec.md §4.4: `OR(ALL, s) = OR(s, ALL) = ALL`,
    /// `OR(NONE, s) = OR(s, NONE) = s`.
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (Selection::All, _) | (_, Selection::All) => Selection::All,
            (Selection::None, s) | (s, Selection::None) => s,
            (a, b) => Selection::Or(Box::new(a), Box::new(b)),
        }
    }
}

/// Folds a selection over a store's indices into a set of matching ids
/// (spec.md §4.5). A pure function of `(store, selection)` — it never
/// mutates `store`.
pub fn evaluate<S: Shape>(store: &S, selection: &Selection<S>) -> IdSet {
    match selection {
        Selection::All => store.all_ids(),
        Selection::None => IdSet::new(),
        Selection::Atom(atom) => store.eval_atom(atom),
        Selection::And(a, b) => {
            let lhs = evaluate(store, a);
            let rhs = evaluate(store, b);
            lhs.intersection(&rhs).copied().collect()
        }
        Selection::Or(a, b) => {
            let lhs = evaluate(store, a);
            let rhs = evaluate(store, b);
            lhs.union(&rhs).copied().collect()
        }
    }
}
