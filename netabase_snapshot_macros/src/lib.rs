use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input, visit::Visit};

use crate::visitors::model_visitor::ModelVisitor;

mod generators;
mod utils;
mod visitors;

/// Derives `netabase_snapshot::Model` for a struct with named fields.
///
/// Every field becomes an attribute, keyed by the field name. The macro
/// generates:
/// - a `'static` `ModelSchema` with the attributes and relationships in
///   declaration order
/// - `read_attribute`, a match over attribute names that serializes the
///   matching field to a JSON value
///
/// # Struct attributes
///
/// - `#[model(name = "blog-post")]` - model name; defaults to the struct name
///   in kebab case
/// - `#[model(belongs_to(author = "user"))]` - one belongsTo per entry,
///   `relationship = "target model name"`
/// - `#[model(has_many(comments = "comment", tags = "tag"))]` - one hasMany
///   per entry
///
/// # Field attributes
///
/// - `#[model(skip)]` - not an attribute
/// - `#[model(rename = "publishedAt")]` - attribute key differs from the field name
///
/// Fields must implement `serde::Serialize`. The name `id` is reserved for the
/// record id and is rejected for attributes and relationships alike.
///
/// # Example
///
/// ```ignore
/// use netabase_snapshot::Model;
///
/// #[derive(Model, Clone, Debug)]
/// #[model(belongs_to(author = "user"), has_many(comments = "comment"))]
/// pub struct BlogPost {
///     pub title: String,
///     #[model(rename = "publishedAt")]
///     pub published_at: Option<String>,
///     #[model(skip)]
///     pub render_cache: Option<String>,
/// }
/// // BlogPost::schema().model_name() == "blog-post"
/// // attributes: ["title", "publishedAt"]
/// // relationships: ["author" (belongsTo user), "comments" (hasMany comment)]
/// ```
#[proc_macro_derive(Model, attributes(model))]
pub fn model_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let mut visitor = ModelVisitor::default();
    visitor.visit_derive_input(&input);

    if let Some(error) = visitor.take_error() {
        return error.into_compile_error().into();
    }

    generators::model::generate_model_impl(&input, &visitor).into()
}
