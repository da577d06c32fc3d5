//! `#[derive(MultiDimMap)]` — expands an annotated struct into a
//! dimensional store: a primary value table plus one ordered index per
//! `#[dimension(..)]`-tagged field, and the selection/evaluator glue tying
//! them together. See `dim_store`'s crate docs for the end-user surface
//! this produces.

mod attr;
mod generators;

use ::proc_macro::TokenStream;
use ::syn::{parse_macro_input, DeriveInput, Field, Fields};

use attr::{dimension_mode, Mode};

/// One field of the annotated struct, classified for codegen.
pub(crate) struct DimField<'a> {
    pub(crate) field: &'a Field,
    pub(crate) mode: Option<Mode>,
    /// For `multi` fields, the element type extracted from the declared
    /// `HashSet<E>`/`FxHashSet<E>`/`BTreeSet<E>` field type. For `auto`
    /// fields, the field's declared type itself. Unused for plain fields.
    pub(crate) element_ty: Option<::syn::Type>,
}

impl<'a> DimField<'a> {
    fn name(&self) -> &::syn::Ident {
        self.field.ident.as_ref().expect("MultiDimMap only supports named fields")
    }
}

#[proc_macro_derive(MultiDimMap, attributes(dimension))]
pub fn multi_dim_map(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let fields = match input.data {
        ::syn::Data::Struct(ref d) => match &d.fields {
            Fields::Named(named) => &named.named,
            _ => panic!("MultiDimMap only supports structs with named fields"),
        },
        _ => panic!("MultiDimMap only supports structs, not enums or unions"),
    };

    let dim_fields: Vec<DimField> = fields
        .iter()
        .map(|f| {
            let mode = dimension_mode(f);
            let element_ty = match mode {
                Some(Mode::Auto) => Some(f.ty.clone()),
                Some(Mode::Multi) => Some(generators::multi_element_type(&f.ty)),
                None => None,
            };
            DimField {
                field: f,
                mode,
                element_ty,
            }
        })
        .collect();

    if !dim_fields.iter().any(|f| f.mode.is_some()) {
        panic!("MultiDimMap requires at least one field tagged `#[dimension(multi)]` or `#[dimension(auto)]`");
    }

    let auto_count = dim_fields.iter().filter(|f| f.mode == Some(Mode::Auto)).count();
    if auto_count > 1 {
        // Not forbidden by spec.md, but every worked example has at most
        // one; supporting more adds no value and bloats the projection
        // tuple handling below for no real use case.
        panic!("MultiDimMap currently supports at most one `#[dimension(auto)]` field");
    }

    let element_name = input.ident.clone();
    let element_vis = input.vis.clone();

    let expanded = generators::generate_expanded(&element_name, &element_vis, &dim_fields);

    TokenStream::from(expanded)
}
