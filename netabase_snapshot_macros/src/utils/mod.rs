use syn::Attribute;

pub mod errors;

/// Name of the helper attribute used on models and their fields.
pub const MODEL_ATTRIBUTE: &str = "model";

/// Key the record id is written under; no attribute or relationship may use it.
pub const RESERVED_ID: &str = "id";

pub fn model_attributes(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|att| att.path().is_ident(MODEL_ATTRIBUTE))
}

/// Joins a token rendering of a type back into source form.
pub fn type_name(ty: &syn::Type) -> String {
    quote::quote!(#ty)
        .to_string()
        .replace(" <", "<")
        .replace("< ", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
        .replace(" :: ", "::")
        .replace(":: ", "::")
        .replace("& ", "&")
}
