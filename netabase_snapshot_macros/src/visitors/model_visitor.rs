use heck::ToKebabCase;
use proc_macro2::Span;
use syn::{Fields, Ident, LitStr, ext::IdentExt, spanned::Spanned, visit::Visit};

use crate::utils::{RESERVED_ID, errors, model_attributes, type_name};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipKind {
    BelongsTo,
    HasMany,
}

/// A field exposed as a model attribute.
pub struct AttributeInfo<'ast> {
    pub field: &'ast Ident,
    pub key: String,
    pub type_name: String,
}

/// A relationship declared in `#[model(belongs_to(..), has_many(..))]`.
pub struct RelationshipInfo {
    pub name: String,
    pub kind: RelationshipKind,
    pub target: String,
}

#[derive(Default)]
pub struct ModelVisitor<'ast> {
    pub name: Option<&'ast Ident>,
    pub model_name: Option<String>,
    pub attributes: Vec<AttributeInfo<'ast>>,
    pub relationships: Vec<RelationshipInfo>,
    error: Option<syn::Error>,
    declared: Vec<String>,
}

impl<'a> Visit<'a> for ModelVisitor<'a> {
    fn visit_derive_input(&mut self, i: &'a syn::DeriveInput) {
        self.name = Some(&i.ident);

        for attr in model_attributes(&i.attrs) {
            if let Err(e) = self.parse_model_attribute(attr) {
                self.push_error(e);
            }
        }

        match &i.data {
            syn::Data::Struct(data) => match &data.fields {
                Fields::Named(named) => {
                    for field in &named.named {
                        self.visit_field(field);
                    }
                }
                Fields::Unit => {}
                Fields::Unnamed(_) => self.push_error(errors::unsupported_item(i.ident.span())),
            },
            _ => self.push_error(errors::unsupported_item(i.ident.span())),
        }
    }

    fn visit_field(&mut self, field: &'a syn::Field) {
        let Some(ident) = field.ident.as_ref() else {
            return;
        };
        match Self::parse_field_attributes(field) {
            Ok(FieldOptions { skip: true, .. }) => {}
            Ok(FieldOptions { rename, .. }) => {
                let key = rename.unwrap_or_else(|| ident.unraw().to_string());
                self.declare(&key, ident.span());
                self.attributes.push(AttributeInfo {
                    field: ident,
                    key,
                    type_name: type_name(&field.ty),
                });
            }
            Err(e) => self.push_error(e),
        }
    }
}

#[derive(Default)]
struct FieldOptions {
    skip: bool,
    rename: Option<String>,
}

impl<'a> ModelVisitor<'a> {
    /// Model name from `#[model(name = "..")]`, or the kebab-cased struct name.
    pub fn resolved_model_name(&self) -> String {
        match (&self.model_name, self.name) {
            (Some(name), _) => name.clone(),
            (None, Some(ident)) => ident.unraw().to_string().to_kebab_case(),
            (None, None) => String::new(),
        }
    }

    pub fn take_error(&mut self) -> Option<syn::Error> {
        self.error.take()
    }

    fn parse_model_attribute(&mut self, attr: &syn::Attribute) -> syn::Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                self.model_name = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("belongs_to") || meta.path.is_ident("has_many") {
                let kind = if meta.path.is_ident("belongs_to") {
                    RelationshipKind::BelongsTo
                } else {
                    RelationshipKind::HasMany
                };
                meta.parse_nested_meta(|inner| {
                    let ident = inner
                        .path
                        .get_ident()
                        .ok_or_else(|| errors::invalid_relationship(inner.path.span()))?;
                    let target: LitStr = inner.value()?.parse()?;
                    let name = ident.unraw().to_string();
                    self.declare(&name, ident.span());
                    self.relationships.push(RelationshipInfo {
                        name,
                        kind,
                        target: target.value(),
                    });
                    Ok(())
                })
            } else {
                Err(errors::unknown_model_option(meta.path.span()))
            }
        })
    }

    fn parse_field_attributes(field: &syn::Field) -> syn::Result<FieldOptions> {
        let mut options = FieldOptions::default();
        for attr in model_attributes(&field.attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    options.skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    options.rename = Some(lit.value());
                    Ok(())
                } else {
                    Err(errors::unknown_field_option(meta.path.span()))
                }
            })?;
        }
        Ok(options)
    }

    fn declare(&mut self, name: &str, span: Span) {
        if name == RESERVED_ID {
            self.push_error(errors::reserved_name(span, name));
        } else if self.declared.iter().any(|n| n == name) {
            self.push_error(errors::duplicate_name(span, name));
        } else {
            self.declared.push(name.to_owned());
        }
    }

    fn push_error(&mut self, error: syn::Error) {
        match &mut self.error {
            Some(existing) => existing.combine(error),
            None => self.error = Some(error),
        }
    }
}
