use proc_macro2::Span;
use syn::Error;

/// Utilities for generating consistent error messages

pub fn unsupported_item(span: Span) -> Error {
    Error::new(
        span,
        "Model can only be derived for structs with named fields",
    )
}

pub fn unknown_model_option(span: Span) -> Error {
    Error::new(
        span,
        "Unsupported model option. Expected `name = \"...\"`, `belongs_to(...)` or `has_many(...)`",
    )
}

pub fn unknown_field_option(span: Span) -> Error {
    Error::new(
        span,
        "Unsupported field option. Expected `skip` or `rename = \"...\"`",
    )
}

pub fn invalid_relationship(span: Span) -> Error {
    Error::new(
        span,
        "Relationships must be in the form belongs_to(name = \"target-model\")",
    )
}

pub fn duplicate_name(span: Span, name: &str) -> Error {
    Error::new(
        span,
        format!(
            "Duplicate attribute or relationship name '{}'. Each name can only be declared once per model",
            name
        ),
    )
}

pub fn reserved_name(span: Span, name: &str) -> Error {
    Error::new(
        span,
        format!(
            "'{}' is reserved for the record id and cannot be used as an attribute or relationship name",
            name
        ),
    )
}
