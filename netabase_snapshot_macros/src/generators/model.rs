use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::visitors::model_visitor::{ModelVisitor, RelationshipKind};

/// Generates `impl ::netabase_snapshot::Model` for the visited struct.
///
/// The schema is laid out as three statics inside `schema()`, so the
/// attribute and relationship tables live in read-only memory and every call
/// returns the same reference.
pub fn generate_model_impl(input: &DeriveInput, visitor: &ModelVisitor<'_>) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let model_name = visitor.resolved_model_name();

    let attribute_count = visitor.attributes.len();
    let attribute_defs = visitor.attributes.iter().map(|a| {
        let key = &a.key;
        let type_name = &a.type_name;
        quote! { ::netabase_snapshot::AttributeDef::new(#key, #type_name) }
    });

    let relationship_count = visitor.relationships.len();
    let relationship_defs = visitor.relationships.iter().map(|r| {
        let name = &r.name;
        let target = &r.target;
        match r.kind {
            RelationshipKind::BelongsTo => {
                quote! { ::netabase_snapshot::RelationshipMeta::belongs_to(#name, #target) }
            }
            RelationshipKind::HasMany => {
                quote! { ::netabase_snapshot::RelationshipMeta::has_many(#name, #target) }
            }
        }
    });

    let readers = visitor.attributes.iter().map(|a| {
        let key = &a.key;
        let field = a.field;
        quote! {
            #key => ::core::option::Option::Some(
                ::netabase_snapshot::__private::to_attribute_value(#model_name, #key, &self.#field)
            ),
        }
    });

    quote! {
        impl #impl_generics ::netabase_snapshot::Model for #ident #ty_generics #where_clause {
            fn schema() -> &'static ::netabase_snapshot::ModelSchema {
                static ATTRIBUTES: [::netabase_snapshot::AttributeDef; #attribute_count] = [
                    #(#attribute_defs),*
                ];
                static RELATIONSHIPS: [::netabase_snapshot::RelationshipMeta; #relationship_count] = [
                    #(#relationship_defs),*
                ];
                static SCHEMA: ::netabase_snapshot::ModelSchema =
                    ::netabase_snapshot::ModelSchema::new(#model_name, &ATTRIBUTES, &RELATIONSHIPS);
                &SCHEMA
            }

            fn read_attribute(
                &self,
                name: &str,
            ) -> ::core::option::Option<::netabase_snapshot::__private::Value> {
                match name {
                    #(#readers)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}
