//! `#[derive(Injectable)]` expansion.

use darling::ast::{Data, Style};
use darling::util::Ignored;
use darling::{FromDeriveInput, FromField};
use proc_macro2::TokenStream;
use quote::quote;

#[derive(FromDeriveInput)]
#[darling(attributes(injectable), supports(struct_any))]
struct InjectableInput {
    ident: syn::Ident,
    generics: syn::Generics,
    data: Data<Ignored, InjectableField>,
}

#[derive(FromField)]
#[darling(attributes(injectable))]
struct InjectableField {
    ident: Option<syn::Ident>,
    ty: syn::Type,
    #[darling(default)]
    inject: bool,
    #[darling(default, rename = "default")]
    or_default: bool,
}

impl InjectableField {
    fn read(&self, args: &syn::Ident) -> darling::Result<TokenStream> {
        match (self.inject, self.or_default) {
            (true, true) => Err(darling::Error::custom(
                "`inject` and `default` cannot be combined: a dependency is always supplied",
            )
            .with_span(&self.ty)),
            (true, false) => Ok(quote! { #args.next()? }),
            (false, true) => Ok(quote! { #args.next_or_default()? }),
            (false, false) => Ok(quote! { #args.next_cloned()? }),
        }
    }
}

pub(crate) fn expand(input: &syn::DeriveInput) -> darling::Result<TokenStream> {
    let InjectableInput { ident, generics, data } = InjectableInput::from_derive_input(input)?;
    let fields = data
        .take_struct()
        .ok_or_else(|| darling::Error::unsupported_shape("enum").with_span(&ident))?;

    let args = syn::Ident::new("__sijill_args", proc_macro2::Span::call_site());
    let mut errors = darling::Error::accumulator();
    let reads: Vec<TokenStream> = fields
        .fields
        .iter()
        .filter_map(|field| errors.handle(field.read(&args)))
        .collect();
    errors.finish()?;

    let body = match fields.style {
        Style::Struct => {
            let names = fields.fields.iter().map(|field| &field.ident);
            quote! { Self { #(#names: #reads,)* } }
        }
        Style::Tuple => quote! { Self( #(#reads,)* ) },
        Style::Unit => quote! { Self },
    };

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::sijill::Injectable for #ident #ty_generics #where_clause {
            fn construct(#args: &mut ::sijill::Args) -> ::sijill::Result<Self> {
                ::core::result::Result::Ok(#body)
            }
        }
    })
}
