//! The three outcomes `Store::update`'s callback may return (spec.md §4.3).

/// The result of applying an update closure to one matched element.
///
/// - `Delete`: "no change deletion" — remove the element and every index
///   entry it held.
/// - `Keep(value)`: "new value, same key" — replace the value payload,
///   indices untouched. `V` here only carries the non-dimension fields, so
///   it is impossible to accidentally desynchronize an index through this
///   path.
/// - `Rekey(value, key)`: "new value, new key" — `key` supplies the new
///   multi-dimension element sets; auto-dimension elements are carried
///   over from the existing stored key unchanged, since auto positions can
///   never be user-supplied.
pub enum Update<V, K> {
    Delete,
    Keep(V),
    Rekey(V, K),
}
