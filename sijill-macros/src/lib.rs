//! Proc-macros for Sijill.

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod injectable;

/// Derives `Injectable` by reading the struct's fields from the recipe
/// arguments in declaration order.
///
/// Field attributes:
/// - `#[injectable(inject)]` — the field is an `Arc<T>` filled with a
///   resolved dependency (`args.next()`)
/// - `#[injectable(default)]` — use `Default::default()` once the
///   arguments run out (`args.next_or_default()`)
/// - no attribute — the argument is cloned out (`args.next_cloned()`)
///
/// # Example
/// ```ignore
/// use std::sync::Arc;
/// use sijill::Injectable;
///
/// #[derive(Injectable)]
/// struct Mailer {
///     #[injectable(inject)]
///     transport: Arc<SmtpTransport>,
///     sender: String,
///     #[injectable(default)]
///     retries: u8,
/// }
///
/// // registry.register::<Mailer>(args![@SmtpTransport, String::from("noreply@")]);
/// ```
#[proc_macro_derive(Injectable, attributes(injectable))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    injectable::expand(&input)
        .unwrap_or_else(darling::Error::write_errors)
        .into()
}
