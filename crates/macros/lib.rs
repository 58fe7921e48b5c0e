use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Lit, Meta, MetaNameValue};

/// Helper ─ reads `#[record_schema = "path::TO_DESCRIPTOR"]` off the item.
fn record_schema_attr(attrs: &[Attribute]) -> syn::Result<syn::Path> {
    for attr in attrs {
        if attr.path.is_ident("record_schema") {
            return match attr.parse_meta()? {
                Meta::NameValue(MetaNameValue {
                                    lit: Lit::Str(lit),
                                    ..
                                }) => lit.parse::<syn::Path>(),
                other => Err(syn::Error::new_spanned(
                    other,
                    "`record_schema` must be of the form #[record_schema = \"…\"]",
                )),
            };
        }
    }
    Err(syn::Error::new(
        Span::call_site(),
        "Record needs a #[record_schema = \"…\"] attribute naming its descriptor",
    ))
}

/* -------------------------------------------------------------------------- */
/*                                  Record                                    */
/* -------------------------------------------------------------------------- */

/// Binds a struct to a `MessageDescriptor`. Struct fields map positionally to
/// the descriptor's fields, so their order must match the table.
#[proc_macro_derive(Record, attributes(record_schema))]
pub fn record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_record(&input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn expand_record(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let schema = record_schema_attr(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(s) => match &s.fields {
            Fields::Named(named) => &named.named,
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(name, "Record can only be derived for structs")),
    };

    let idents: Vec<_> = fields
        .iter()
        .filter_map(|f| f.ident.as_ref())
        .collect();

    let count = idents.len();

    Ok(quote! {
        impl ::evmcodec::value::IntoValue for #name {
            fn to_value(&self) -> ::evmcodec::value::Value<'_> {
                ::evmcodec::value::Value::Message(vec![
                    #( ::evmcodec::value::IntoValue::to_value(&self.#idents) ),*
                ])
            }
        }

        impl ::evmcodec::value::FromValue for #name {
            fn from_value(value: ::evmcodec::value::Value<'_>) -> Self {
                match value {
                    ::evmcodec::value::Value::Message(slots) => {
                        debug_assert_eq!(slots.len(), #count, "slot count of {}", stringify!(#name));
                        let mut slots = slots.into_iter();
                        Self {
                            #( #idents: ::evmcodec::value::FromValue::from_value(
                                slots.next().unwrap_or(::evmcodec::value::Value::None)
                            ) ),*
                        }
                    }
                    other => ::evmcodec::value::unexpected_variant(stringify!(#name), &other),
                }
            }
        }

        impl ::evmcodec::value::IntoValue for Vec<#name> {
            fn to_value(&self) -> ::evmcodec::value::Value<'_> {
                ::evmcodec::value::Value::Array(
                    self.iter().map(::evmcodec::value::IntoValue::to_value).collect()
                )
            }
        }

        impl ::evmcodec::value::FromValue for Vec<#name> {
            fn from_value(value: ::evmcodec::value::Value<'_>) -> Self {
                match value {
                    ::evmcodec::value::Value::Array(vals) => vals
                        .into_iter()
                        .map(<#name as ::evmcodec::value::FromValue>::from_value)
                        .collect(),
                    other => ::evmcodec::value::unexpected_variant("repeated", &other),
                }
            }
        }

        impl ::evmcodec::runtime::Record for #name {
            #[inline]
            fn descriptor() -> &'static ::evmcodec::compiler::MessageDescriptor {
                &#schema
            }
        }
    })
}
