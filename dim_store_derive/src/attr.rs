use ::syn::{Field, Meta};

/// The mode a single struct field contributes to a store's key shape.
///
/// Mirrors spec.md §3: a dimension is either `Multi` (the stored key at
/// that position is a set of elements, possibly empty) or `Auto` (a single
/// element generated by the store itself, never user-supplied).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Mode {
    Multi,
    Auto,
}

/// Reads the `#[dimension(multi)]` / `#[dimension(auto)]` attribute off a
/// field. Fields without a `dimension` attribute are not part of the key at
/// all — they live only in the value payload, same as a non-indexed field
/// in the teacher crate.
pub(crate) fn dimension_mode(field: &Field) -> Option<Mode> {
    field.attrs.iter().find_map(|attr| {
        if !attr.path().is_ident("dimension") {
            return None;
        }
        let Meta::List(list) = &attr.meta else {
            panic!("`#[dimension(..)]` must take a parenthesized argument, either `multi` or `auto`");
        };
        let ident = list
            .parse_args::<::syn::Ident>()
            .unwrap_or_else(|e| panic!("failed to parse `#[dimension(..)]` argument: {e}"));
        match ident.to_string().as_str() {
            "multi" => Some(Mode::Multi),
            "auto" => Some(Mode::Auto),
            other => panic!("unknown `#[dimension({other})]`, expected `multi` or `auto`"),
        }
    })
}
