//! Procedural macros for estate-cms.
//!
//! `#[derive(Document)]` binds a record type to the collection it is stored in:
//!
//! ```ignore
//! use estate_cms::{Document, bson};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, Document)]
//! #[document(collection = "testimonials")]
//! pub struct Testimonial {
//!     pub name: String,
//!     pub testimonial: String,
//! }
//! ```
//!
//! The generated impl refers to `::estate_cms::document::Document`. Crates that
//! depend on `estate-cms-core` alone name it with `crate`:
//!
//! ```ignore
//! #[derive(Debug, Clone, Serialize, Deserialize, Document)]
//! #[document(collection = "testimonials", crate = "estate_cms_core")]
//! pub struct Testimonial { /* ... */ }
//! ```

#[allow(unused_extern_crates)]
extern crate self as estate_cms_macros;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, LitStr, Path, parse_macro_input, parse_quote};

#[proc_macro_derive(Document, attributes(document))]
pub fn derive_document(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand_document(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_document(input: DeriveInput) -> syn::Result<TokenStream2> {
    let mut collection: Option<LitStr> = None;
    let mut krate: Path = parse_quote!(::estate_cms);

    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("document")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                collection = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("crate") {
                krate = meta.value()?.parse::<LitStr>()?.parse()?;
                Ok(())
            } else {
                Err(meta.error("unsupported document attribute, expected `collection` or `crate`"))
            }
        })?;
    }

    let collection = collection.ok_or_else(|| {
        syn::Error::new_spanned(
            &input.ident,
            "missing #[document(collection = \"...\")] attribute",
        )
    })?;

    if collection.value().is_empty() {
        return Err(syn::Error::new_spanned(&collection, "collection name must not be empty"));
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::document::Document for #name #ty_generics #where_clause {
            fn collection_name() -> &'static str {
                #collection
            }
        }
    })
}
