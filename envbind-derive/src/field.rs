use darling::{FromField, FromMeta};
use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::{Ident, Type};

#[derive(FromField)]
#[darling(attributes(env))]
pub struct RecordFieldReceiver {
    pub ident: Option<Ident>,
    pub ty: Type,
    /// #[env(name = "...")]
    #[darling(default)]
    pub name: Option<String>,
    /// #[env(required)] OR #[env(required = ...)]
    #[darling(default)]
    pub required: Required,
    /// #[env(env_prefix = "...")], only meaningful on nested records.
    #[darling(default)]
    pub env_prefix: Option<String>,
}

impl RecordFieldReceiver {
    pub fn validate(&self) -> darling::Result<()> {
        match &self.name {
            Some(name) if name.is_empty() => {
                Err(darling::Error::custom("`name` must not be empty").with_span(&self.ty))
            }
            None if self.required.0 => Err(darling::Error::custom(
                "`required` needs a `name` to read the variable from",
            )
            .with_span(&self.ty)),
            _ => Ok(()),
        }
    }

    /// `FieldAttrs` literal describing this field.
    pub fn attrs_tokens(&self, private_path: &TokenStream) -> TokenStream {
        let name = option_tokens(self.name.as_deref());
        let required = self.required.0;
        let env_prefix = option_tokens(self.env_prefix.as_deref());

        quote! {
            #private_path::FieldAttrs {
                name: #name,
                required: #required,
                env_prefix: #env_prefix,
            }
        }
    }
}

fn option_tokens(value: Option<&str>) -> TokenStream {
    match value {
        Some(value) => {
            let value = Literal::string(value);
            quote!(::std::option::Option::Some(#value))
        }
        None => quote!(::std::option::Option::None),
    }
}

/// The `required` flag.
///
/// Accepts a bare word, a boolean literal, or a string. Strings are read with
/// the same spellings as boolean variables and anything else counts as false.
#[derive(Debug, Default, Clone, Copy)]
pub struct Required(pub bool);

impl FromMeta for Required {
    fn from_word() -> darling::Result<Self> {
        Ok(Self(true))
    }

    fn from_bool(value: bool) -> darling::Result<Self> {
        Ok(Self(value))
    }

    fn from_string(value: &str) -> darling::Result<Self> {
        let required = ["1", "t", "true"]
            .iter()
            .any(|s| value.eq_ignore_ascii_case(s));
        Ok(Self(required))
    }
}
