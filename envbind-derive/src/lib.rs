mod field;

use darling::{
    FromDeriveInput,
    ast::{Data, Fields},
};
use proc_macro2::{Literal, TokenStream};
use quote::{ToTokens, quote};
use syn::{DeriveInput, Generics, Ident, parse_macro_input};

use crate::field::RecordFieldReceiver;

#[proc_macro_derive(Record, attributes(env))]
pub fn derive_record(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match impl_derive(input) {
        Ok(output) => output.into(),
        Err(err) => err.write_errors().into(),
    }
}

fn impl_derive(input: DeriveInput) -> darling::Result<TokenStream> {
    let record = RecordReceiver::from_derive_input(&input)?;

    record.validate()?;

    Ok(record.to_token_stream())
}

#[derive(FromDeriveInput)]
#[darling(supports(struct_named))]
struct RecordReceiver {
    pub ident: Ident,
    pub generics: Generics,
    pub data: Data<(), RecordFieldReceiver>,
}

impl ToTokens for RecordReceiver {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let private_path = quote!(__envbind);

        let impl_inspect_fields = self.impl_inspect_fields(&private_path);
        let impl_field_mut = self.impl_field_mut(&private_path);
        let struct_name = &self.ident;

        let derive = quote! {
            const _: () = {
                use ::envbind::__private as #private_path;

                impl #private_path::Record for #struct_name {
                    #impl_inspect_fields

                    #impl_field_mut
                }
            };
        };

        tokens.extend(derive);
    }
}

impl RecordReceiver {
    fn validate(&self) -> darling::Result<()> {
        let mut accumulator = darling::Error::accumulator();

        if !self.generics.params.is_empty() {
            accumulator.push(
                darling::Error::custom("Record derive does not support generic structs")
                    .with_span(&self.generics),
            );
        }
        for field in self.get_fields().iter() {
            accumulator.handle(field.validate());
        }

        accumulator.finish()
    }

    // Every field goes through the probes; which impl applies is decided by
    // the field's type once it is known to the compiler.
    fn impl_inspect_fields(&self, private_path: &TokenStream) -> TokenStream {
        let fields = self.get_fields().iter().enumerate().map(|(index, field)| {
            let ty = &field.ty;
            let index = Literal::usize_unsuffixed(index);
            let attrs = field.attrs_tokens(private_path);

            quote! {
                (&&&#private_path::Probe::<#ty>::new())
                    .inspect_field(__path, #index, __prefix, #attrs, __fields);
            }
        });

        quote! {
            fn inspect_fields(
                __path: &[usize],
                __prefix: &str,
                __fields: &mut ::std::vec::Vec<#private_path::FieldDescriptor>,
            ) {
                #[allow(unused_imports)]
                use #private_path::{InspectLeaf as _, InspectOpaque as _, InspectRecord as _};

                #(#fields)*
            }
        }
    }

    fn impl_field_mut(&self, private_path: &TokenStream) -> TokenStream {
        let arms = self.get_fields().iter().enumerate().map(|(index, field)| {
            let ident = &field.ident;
            let index = Literal::usize_unsuffixed(index);

            quote! {
                #index => ::std::option::Option::Some(
                    (&&&#private_path::SlotProbe::new(&mut self.#ident)).slot()
                ),
            }
        });

        quote! {
            fn field_mut(
                &mut self,
                __index: usize,
            ) -> ::std::option::Option<#private_path::Slot<'_>> {
                #[allow(unused_imports)]
                use #private_path::{SlotLeaf as _, SlotOpaque as _, SlotRecord as _};

                match __index {
                    #(#arms)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    }

    fn get_fields(&self) -> &Fields<RecordFieldReceiver> {
        let Data::Struct(fields) = &self.data else {
            panic!("we've asserted that it's a struct");
        };

        fields
    }
}
