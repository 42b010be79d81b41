//! Derive macros for `localuri`.
//!
//! This crate generates the static API catalog behind `#[derive(ApiCatalog)]`. It:
//! - reads `#[api(...)]` variant attributes
//! - emits a `localuri::ApiKind` implementation backed by one static
//!   `ApiDescriptor` per routable variant, plus a `Display` impl using the
//!   wire name
//!
//! It does **not** classify URIs or redact responses. Those live in the main
//! `localuri` crate and run against the generated table.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod derive_enum;
mod variant;
use derive_enum::derive_enum;

/// Derives `localuri::ApiKind` for a fieldless enum of supported APIs.
///
/// Variants are matched against request paths in **declaration order**; the
/// first variant whose prefix matches wins.
///
/// # Variant Attributes
///
/// Every variant carries exactly one `#[api(...)]` attribute:
///
/// - `#[api(blank)]` - the "unclassified" sentinel. At most one per enum. It has
///   no descriptor and is never matched.
/// - `path = "/_cluster/health"` - the canonical path (required for every other
///   variant). Also the key of the API's allow-list in the redaction catalog.
/// - `prefix = "/_nodes"` - the prefix used for matching and for stripping path
///   parameters. Defaults to `path` and must be a prefix of it.
/// - `suffix = "/stats"` - stripped from the end of the path when extracting
///   path parameters. Defaults to `""`.
/// - `path_params = "none" | "optional" | "required"` - whether the API accepts
///   or requires path parameters. Defaults to `"none"`.
/// - `name = "HEALTH"` - overrides the wire name, which otherwise is the
///   variant identifier in `SCREAMING_SNAKE_CASE`.
///
/// Generic enums, structs, unions, and variants with fields are rejected at
/// compile time, as are duplicate paths and names.
///
/// The enum must be `Copy`, `Eq`, and `Debug` to satisfy `ApiKind`'s bounds.
#[proc_macro_derive(ApiCatalog, attributes(api))]
pub fn derive_api_catalog(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the localuri crate root.
///
/// Handles crate renaming (e.g., `my_uri = { package = "localuri", ... }`).
/// Inside `localuri` itself the crate declares `extern crate self as localuri`,
/// so the absolute path resolves there as well as in its doctests.
fn crate_root() -> proc_macro2::TokenStream {
    match crate_name("localuri") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::localuri },
    }
}

fn crate_path(item: &str) -> proc_macro2::TokenStream {
    let root = crate_root();
    let item_ident = format_ident!("{}", item);
    quote! { #root::#item_ident }
}

fn expand(input: DeriveInput) -> Result<proc_macro2::TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        ..
    } = input;

    if !generics.params.is_empty() {
        return Err(syn::Error::new(
            generics.span(),
            "`ApiCatalog` cannot be derived for generic enums",
        ));
    }

    match data {
        Data::Enum(data) => derive_enum(&ident, data),
        Data::Struct(s) => Err(syn::Error::new(
            s.struct_token.span(),
            "`ApiCatalog` can only be derived for enums",
        )),
        Data::Union(u) => Err(syn::Error::new(
            u.union_token.span(),
            "`ApiCatalog` can only be derived for enums",
        )),
    }
}
