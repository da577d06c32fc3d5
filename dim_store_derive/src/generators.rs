use ::convert_case::Casing;
use ::quote::{format_ident, quote};
use ::syn::{GenericArgument, PathArguments, Type, Visibility};

use crate::attr::Mode;
use crate::DimField;

/// Extracts `E` out of a `#[dimension(multi)]` field declared as
/// `HashSet<E>`, `FxHashSet<E>`, or `BTreeSet<E>`.
pub(crate) fn multi_element_type(ty: &Type) -> Type {
    if let Type::Path(type_path) = ty {
        if let Some(seg) = type_path.path.segments.last() {
            let recognized = matches!(
                seg.ident.to_string().as_str(),
                "HashSet" | "FxHashSet" | "BTreeSet"
            );
            if recognized {
                if let PathArguments::AngleBracketed(args) = &seg.arguments {
                    if let Some(GenericArgument::Type(inner)) = args.args.first() {
                        return inner.clone();
                    }
                }
            }
        }
    }
    panic!(
        "`#[dimension(multi)]` fields must be declared as HashSet<E>, FxHashSet<E>, or BTreeSet<E>; found `{}`",
        quote!(#ty)
    );
}

fn upper_camel(ident: &::syn::Ident) -> ::proc_macro2::Ident {
    format_ident!("{}", ident.to_string().to_case(::convert_case::Case::UpperCamel))
}

/// Generates the `FooInsert` / `FooValue` / `FooRekey` payload structs from
/// a chosen subset of fields, as plain `ident: ty` pairs (no attributes
/// carried over — a field's `#[dimension(..)]` is only meaningful under
/// the original derive, and would not parse on a freestanding struct).
fn generate_payload_struct(
    name: &::proc_macro2::Ident,
    vis: &Visibility,
    fields: &[&DimField],
) -> ::proc_macro2::TokenStream {
    let decls: Vec<_> = fields
        .iter()
        .map(|f| {
            let ident = f.name();
            let ty = &f.field.ty;
            let field_vis = &f.field.vis;
            quote! { #field_vis #ident: #ty }
        })
        .collect();
    let serde_derive = if cfg!(feature = "serde") {
        quote! { #[derive(::dim_store::serde::Serialize, ::dim_store::serde::Deserialize)] }
    } else {
        quote! {}
    };
    quote! {
        #serde_derive
        #vis struct #name {
            #(#decls),*
        }
    }
}

/// The per-index delete statements for one binding name (`elem` or
/// whatever local variable currently holds the dimension field values to
/// remove from the indices).
fn index_delete_stmts(var: &::proc_macro2::Ident, indexed_fields: &[&DimField]) -> Vec<::proc_macro2::TokenStream> {
    indexed_fields
        .iter()
        .map(|f| {
            let ident = f.name();
            let index_name = format_ident!("_{}_index", ident);
            match f.mode.unwrap() {
                Mode::Auto => quote! { self.#index_name.delete_many(::std::iter::once(&#var.#ident), oid); },
                Mode::Multi => quote! { self.#index_name.delete_many(#var.#ident.iter(), oid); },
            }
        })
        .collect()
}

/// The per-index insert statements for one binding name.
fn index_insert_stmts(var: &::proc_macro2::Ident, indexed_fields: &[&DimField]) -> Vec<::proc_macro2::TokenStream> {
    indexed_fields
        .iter()
        .map(|f| {
            let ident = f.name();
            let index_name = format_ident!("_{}_index", ident);
            match f.mode.unwrap() {
                Mode::Auto => quote! { self.#index_name.insert_one(#var.#ident.clone(), oid); },
                Mode::Multi => quote! { self.#index_name.insert_many(#var.#ident.iter(), oid); },
            }
        })
        .collect()
}

pub(crate) fn generate_expanded(
    element_name: &::proc_macro2::Ident,
    element_vis: &Visibility,
    dim_fields: &[DimField],
) -> ::proc_macro2::TokenStream {
    let auto_fields: Vec<&DimField> = dim_fields.iter().filter(|f| f.mode == Some(Mode::Auto)).collect();
    let multi_fields: Vec<&DimField> = dim_fields.iter().filter(|f| f.mode == Some(Mode::Multi)).collect();
    let plain_fields: Vec<&DimField> = dim_fields.iter().filter(|f| f.mode.is_none()).collect();
    let indexed_fields: Vec<&DimField> = dim_fields.iter().filter(|f| f.mode.is_some()).collect();

    let map_name = format_ident!("MultiDim{}Store", element_name);
    let insert_name = format_ident!("{}Insert", element_name);
    let value_name = format_ident!("{}Value", element_name);
    let rekey_name = format_ident!("{}Rekey", element_name);
    let projection_name = format_ident!("{}AutoProjection", element_name);
    let atom_name = format_ident!("{}Atom", element_name);

    let insert_fields: Vec<&DimField> = plain_fields.iter().chain(multi_fields.iter()).copied().collect();
    let insert_struct = generate_payload_struct(&insert_name, element_vis, &insert_fields);
    let value_struct = generate_payload_struct(&value_name, element_vis, &plain_fields);
    let rekey_struct = generate_payload_struct(&rekey_name, element_vis, &multi_fields);

    let auto_field_idents: Vec<&::syn::Ident> = auto_fields.iter().map(|f| f.name()).collect();
    let projection_tys: Vec<_> = auto_fields.iter().map(|f| &f.field.ty).collect();
    let projection_type = quote! { ( #(#projection_tys,)* ) };

    let values_map_ty = if cfg!(feature = "rustc-hash") {
        quote! { ::dim_store::rustc_hash::FxHashMap<::dim_store::Oid, #element_name> }
    } else {
        quote! { ::std::collections::HashMap<::dim_store::Oid, #element_name> }
    };

    let index_struct_fields: Vec<_> = indexed_fields
        .iter()
        .map(|f| {
            let index_name = format_ident!("_{}_index", f.name());
            let element_ty = f.element_ty.as_ref().unwrap();
            quote! { #index_name: ::dim_store::DimIndex<#element_ty> }
        })
        .collect();
    let generator_struct_fields: Vec<_> = auto_fields
        .iter()
        .map(|f| {
            let gen_name = format_ident!("_{}_gen", f.name());
            let element_ty = f.element_ty.as_ref().unwrap();
            quote! { #gen_name: ::dim_store::AutoGenerator<#element_ty> }
        })
        .collect();

    // Assigns each auto field from its generator, binding a local of the
    // field's own name to the value assigned for this insert.
    let assign_auto_locals: Vec<_> = auto_fields
        .iter()
        .map(|f| {
            let ident = f.name();
            let gen_name = format_ident!("_{}_gen", ident);
            quote! { let #ident = self.#gen_name.assign_next(); }
        })
        .collect();

    // Constructs the full element from (assigned auto locals, the
    // insert's plain+multi fields) in the struct's original field order.
    let construct_elem_from_insert: Vec<_> = dim_fields
        .iter()
        .map(|f| {
            let ident = f.name();
            match f.mode {
                Some(Mode::Auto) => quote! { #ident },
                Some(Mode::Multi) | None => quote! { #ident: input.#ident },
            }
        })
        .collect();

    let elem_var = format_ident!("elem");
    let index_inserts = index_insert_stmts(&elem_var, &indexed_fields);
    let index_deletes = index_delete_stmts(&elem_var, &indexed_fields);

    // `Update::Keep`: overwrite every plain field from the caller's
    // `FooValue`; dimension fields, and therefore every index, are
    // untouched.
    let keep_assignments: Vec<_> = plain_fields
        .iter()
        .map(|f| {
            let ident = f.name();
            quote! { stored.#ident = value.#ident; }
        })
        .collect();

    // `Update::Rekey`: the new struct literal is built from the
    // pre-shadow `elem` (still holding the old stored fields) for the
    // carried-over `auto` fields, from the caller's `FooRekey` for
    // `multi` fields, and from the caller's `FooValue` for plain fields.
    let rekey_construct_fields: Vec<_> = dim_fields
        .iter()
        .map(|f| {
            let ident = f.name();
            match f.mode {
                Some(Mode::Auto) => quote! { #ident: elem.#ident.clone() },
                Some(Mode::Multi) => quote! { #ident: key.#ident },
                None => quote! { #ident: value.#ident },
            }
        })
        .collect();

    let atom_variants: Vec<_> = indexed_fields
        .iter()
        .flat_map(|f| {
            let camel = upper_camel(f.name());
            let element_ty = f.element_ty.as_ref().unwrap();
            let eq = format_ident!("{camel}Eq");
            let gt = format_ident!("{camel}Gt");
            let lt = format_ident!("{camel}Lt");
            let gte = format_ident!("{camel}Gte");
            let lte = format_ident!("{camel}Lte");
            vec![
                quote! { #eq(#element_ty) },
                quote! { #gt(#element_ty) },
                quote! { #lt(#element_ty) },
                quote! { #gte(#element_ty) },
                quote! { #lte(#element_ty) },
            ]
        })
        .collect();

    let eval_atom_arms: Vec<_> = indexed_fields
        .iter()
        .flat_map(|f| {
            let ident = f.name();
            let camel = upper_camel(ident);
            let index_name = format_ident!("_{}_index", ident);
            let eq = format_ident!("{camel}Eq");
            let gt = format_ident!("{camel}Gt");
            let lt = format_ident!("{camel}Lt");
            let gte = format_ident!("{camel}Gte");
            let lte = format_ident!("{camel}Lte");
            vec![
                quote! { #atom_name::#eq(v) => self.#index_name.lookup(v) },
                quote! { #atom_name::#gt(v) => self.#index_name.split(v).1 },
                quote! { #atom_name::#lt(v) => self.#index_name.split(v).0 },
                quote! {
                    #atom_name::#gte(v) => {
                        let (_, equal, greater) = self.#index_name.split_lookup(v);
                        equal.union(&greater).copied().collect()
                    }
                },
                quote! {
                    #atom_name::#lte(v) => {
                        let (less, equal, _) = self.#index_name.split_lookup(v);
                        less.union(&equal).copied().collect()
                    }
                },
            ]
        })
        .collect();

    let selection_fns: Vec<_> = indexed_fields
        .iter()
        .flat_map(|f| {
            let ident = f.name();
            let camel = upper_camel(ident);
            let element_ty = f.element_ty.as_ref().unwrap();
            let eq = format_ident!("{camel}Eq");
            let gt = format_ident!("{camel}Gt");
            let lt = format_ident!("{camel}Lt");
            let gte = format_ident!("{camel}Gte");
            let lte = format_ident!("{camel}Lte");
            let eq_fn = format_ident!("eq_{ident}");
            let gt_fn = format_ident!("gt_{ident}");
            let lt_fn = format_ident!("lt_{ident}");
            let gte_fn = format_ident!("gte_{ident}");
            let lte_fn = format_ident!("lte_{ident}");
            vec![
                quote! {
                    #element_vis fn #eq_fn(v: #element_ty) -> ::dim_store::Selection<#map_name> {
                        ::dim_store::Selection::atom(#atom_name::#eq(v))
                    }
                },
                quote! {
                    #element_vis fn #gt_fn(v: #element_ty) -> ::dim_store::Selection<#map_name> {
                        ::dim_store::Selection::atom(#atom_name::#gt(v))
                    }
                },
                quote! {
                    #element_vis fn #lt_fn(v: #element_ty) -> ::dim_store::Selection<#map_name> {
                        ::dim_store::Selection::atom(#atom_name::#lt(v))
                    }
                },
                quote! {
                    #element_vis fn #gte_fn(v: #element_ty) -> ::dim_store::Selection<#map_name> {
                        ::dim_store::Selection::atom(#atom_name::#gte(v))
                    }
                },
                quote! {
                    #element_vis fn #lte_fn(v: #element_ty) -> ::dim_store::Selection<#map_name> {
                        ::dim_store::Selection::atom(#atom_name::#lte(v))
                    }
                },
            ]
        })
        .collect();

    // `get_by_<field>` sugar: a direct exact-match accessor bypassing the
    // selection algebra entirely, in the teacher's own per-field style.
    let direct_accessors: Vec<_> = indexed_fields
        .iter()
        .map(|f| {
            let ident = f.name();
            let element_ty = f.element_ty.as_ref().unwrap();
            let index_name = format_ident!("_{}_index", ident);
            let getter_name = format_ident!("get_by_{}", ident);
            quote! {
                #element_vis fn #getter_name(&self, key: &#element_ty) -> ::std::vec::Vec<&#element_name> {
                    self.#index_name
                        .lookup(key)
                        .into_iter()
                        .filter_map(|oid| self._values.get(&oid))
                        .collect()
                }
            }
        })
        .collect();

    quote! {
        #insert_struct

        #value_struct

        #rekey_struct

        #element_vis type #projection_name = #projection_type;

        #[derive(Clone, Debug)]
        #element_vis enum #atom_name {
            #(#atom_variants),*
        }

        #[derive(Clone, Debug)]
        #element_vis struct #map_name {
            _values: #values_map_ty,
            _next_oid: ::dim_store::Oid,
            #(#index_struct_fields,)*
            #(#generator_struct_fields,)*
        }

        impl ::std::default::Default for #map_name {
            fn default() -> Self {
                Self {
                    _values: ::std::default::Default::default(),
                    _next_oid: 1,
                    #(#index_struct_fields: ::std::default::Default::default(),)*
                    #(#generator_struct_fields: ::std::default::Default::default(),)*
                }
            }
        }

        impl #map_name {
            #element_vis fn new() -> Self {
                Self::default()
            }

            #element_vis fn len(&self) -> usize {
                self._values.len()
            }

            #element_vis fn is_empty(&self) -> bool {
                self._values.is_empty()
            }

            #element_vis fn insert(&mut self, input: #insert_name) -> #projection_name {
                let oid = self._next_oid;
                self._next_oid += 1;
                #(#assign_auto_locals)*
                let #elem_var = #element_name {
                    #(#construct_elem_from_insert),*
                };
                #(#index_inserts)*
                self._values.insert(oid, #elem_var);
                ( #(#auto_field_idents,)* )
            }

            #element_vis fn insert_discard(&mut self, input: #insert_name) {
                let _ = self.insert(input);
            }

            #element_vis fn from_list(
                inputs: impl ::std::iter::IntoIterator<Item = #insert_name>,
            ) -> Self {
                let mut store = Self::new();
                for input in inputs {
                    store.insert_discard(input);
                }
                store
            }

            #element_vis fn update(
                &mut self,
                selection: &::dim_store::Selection<Self>,
                mut f: impl FnMut(&#element_name) -> ::dim_store::Update<#value_name, #rekey_name>,
            ) {
                let ids = ::dim_store::evaluate(self, selection);
                for oid in ids {
                    let Some(current) = self._values.get(&oid) else {
                        continue;
                    };
                    match f(current) {
                        ::dim_store::Update::Delete => {
                            if let Some(#elem_var) = self._values.remove(&oid) {
                                #(#index_deletes)*
                            }
                        }
                        ::dim_store::Update::Keep(value) => {
                            if let Some(stored) = self._values.get_mut(&oid) {
                                #(#keep_assignments)*
                            }
                        }
                        ::dim_store::Update::Rekey(value, key) => {
                            if let Some(#elem_var) = self._values.remove(&oid) {
                                #(#index_deletes)*
                                let #elem_var = #element_name {
                                    #(#rekey_construct_fields),*
                                };
                                #(#index_inserts)*
                                self._values.insert(oid, #elem_var);
                            }
                        }
                    }
                }
            }

            /// Removes every element matching `selection`, returning the
            /// number removed. Built from `update` with a closure that
            /// always deletes — a direct entry point for the common
            /// case; every sibling multi-index store in this lineage
            /// exposes one alongside the general update path.
            #element_vis fn delete(&mut self, selection: &::dim_store::Selection<Self>) -> usize {
                let ids = ::dim_store::evaluate(self, selection);
                let removed = ids.len();
                self.update(selection, |_| ::dim_store::Update::Delete);
                removed
            }

            #element_vis fn lookup(
                &self,
                selection: &::dim_store::Selection<Self>,
            ) -> ::std::vec::Vec<(#element_name, #projection_name)>
            where
                #element_name: ::std::clone::Clone,
            {
                let ids = ::dim_store::evaluate(self, selection);
                ids.into_iter()
                    .filter_map(|oid| {
                        let found = self._values.get(&oid)?.clone();
                        let projection = ( #(found.#auto_field_idents.clone(),)* );
                        Some((found, projection))
                    })
                    .collect()
            }

            #element_vis fn lookup_values(
                &self,
                selection: &::dim_store::Selection<Self>,
            ) -> ::std::vec::Vec<#element_name>
            where
                #element_name: ::std::clone::Clone,
            {
                self.lookup(selection).into_iter().map(|(v, _)| v).collect()
            }

            /// Borrowing counterpart of [`Self::lookup_values`] — avoids
            /// cloning when the caller only needs to read the matches.
            #element_vis fn lookup_refs(&self, selection: &::dim_store::Selection<Self>) -> ::std::vec::Vec<&#element_name> {
                let ids = ::dim_store::evaluate(self, selection);
                ids.into_iter().filter_map(|oid| self._values.get(&oid)).collect()
            }

            #(#direct_accessors)*
        }

        impl ::dim_store::Shape for #map_name {
            type Atom = #atom_name;

            fn eval_atom(&self, atom: &Self::Atom) -> ::dim_store::IdSet {
                match atom {
                    #(#eval_atom_arms),*
                }
            }

            fn all_ids(&self) -> ::dim_store::IdSet {
                self._values.keys().copied().collect()
            }
        }

        #(#selection_fns)*
    }
}
