//! Enum-specific `ApiKind` derivation.
//!
//! This module turns the parsed variants into a static descriptor table and
//! the name lookups that go with it. Rules that span several variants (a
//! single sentinel, unique paths and names) are checked here.

use std::collections::HashMap;

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{spanned::Spanned, DataEnum, Fields, LitStr, Result};

use crate::{
    crate_path,
    variant::{parse_variant_options, Route, VariantKind},
};

/// Converts a `CamelCase` identifier into its `SCREAMING_SNAKE_CASE` wire name.
pub(crate) fn screaming_snake(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    let mut prev_lower_or_digit = false;
    for ch in ident.chars() {
        if ch.is_uppercase() && prev_lower_or_digit {
            out.push('_');
        }
        prev_lower_or_digit = ch.is_lowercase() || ch.is_ascii_digit();
        out.extend(ch.to_uppercase());
    }
    out
}

struct ApiVariant {
    ident: Ident,
    name: String,
    route: Option<Route>,
}

fn descriptor_arm(descriptor_path: &TokenStream, ident: &Ident, route: &Route) -> TokenStream {
    let default_path = &route.path;
    let prepend_path = route.prefix.as_ref().unwrap_or(&route.path);
    let append_path = route
        .suffix
        .clone()
        .unwrap_or_else(|| LitStr::new("", route.path.span()));
    let supports = route.path_params.supports();
    let requires = route.path_params.requires();

    quote! {
        Self::#ident => {
            static DESCRIPTOR: #descriptor_path = #descriptor_path {
                default_path: #default_path,
                prepend_path: #prepend_path,
                append_path: #append_path,
                supports_path_params: #supports,
                requires_path_params: #requires,
            };
            ::core::option::Option::Some(&DESCRIPTOR)
        }
    }
}

#[allow(clippy::too_many_lines)]
pub(crate) fn derive_enum(name: &Ident, data: DataEnum) -> Result<TokenStream> {
    let kind_path = crate_path("ApiKind");
    let descriptor_path = crate_path("ApiDescriptor");

    let mut variants = Vec::new();
    let mut blank: Option<Ident> = None;
    let mut seen_paths: HashMap<String, Ident> = HashMap::new();
    let mut seen_names: HashMap<String, Ident> = HashMap::new();

    for variant in data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new(
                variant.fields.span(),
                "`ApiCatalog` variants cannot carry fields",
            ));
        }

        let options = parse_variant_options(&variant.attrs, variant.ident.span())?;
        let wire_name = options
            .name
            .as_ref()
            .map_or_else(|| screaming_snake(&variant.ident.to_string()), LitStr::value);

        if let Some(previous) = seen_names.insert(wire_name.clone(), variant.ident.clone()) {
            return Err(syn::Error::new(
                variant.ident.span(),
                format!("api name `{wire_name}` is already used by `{previous}`"),
            ));
        }

        let route = match options.kind {
            VariantKind::Blank => {
                if let Some(previous) = &blank {
                    return Err(syn::Error::new(
                        variant.ident.span(),
                        format!("only one `blank` variant is allowed; `{previous}` is already blank"),
                    ));
                }
                blank = Some(variant.ident.clone());
                None
            }
            VariantKind::Api(route) => {
                let path = route.path.value();
                if let Some(previous) = seen_paths.insert(path.clone(), variant.ident.clone()) {
                    return Err(syn::Error::new(
                        route.path.span(),
                        format!("api path \"{path}\" is already used by `{previous}`"),
                    ));
                }
                Some(route)
            }
        };

        variants.push(ApiVariant {
            ident: variant.ident,
            name: wire_name,
            route,
        });
    }

    if seen_paths.is_empty() {
        return Err(syn::Error::new(
            name.span(),
            "`ApiCatalog` needs at least one variant with #[api(path = \"...\")]",
        ));
    }

    let routable: Vec<&Ident> = variants
        .iter()
        .filter(|v| v.route.is_some())
        .map(|v| &v.ident)
        .collect();

    let descriptor_arms = variants.iter().map(|v| {
        let ident = &v.ident;
        match &v.route {
            Some(route) => descriptor_arm(&descriptor_path, ident, route),
            None => quote! { Self::#ident => ::core::option::Option::None, },
        }
    });

    let name_arms = variants.iter().map(|v| {
        let ident = &v.ident;
        let wire = &v.name;
        quote! { Self::#ident => #wire, }
    });

    let from_name_arms = variants.iter().map(|v| {
        let ident = &v.ident;
        let wire = &v.name;
        quote! { #wire => ::core::option::Option::Some(Self::#ident), }
    });

    Ok(quote! {
        impl #kind_path for #name {
            const VARIANTS: &'static [Self] = &[#(Self::#routable),*];

            fn descriptor(self) -> ::core::option::Option<&'static #descriptor_path> {
                match self {
                    #(#descriptor_arms)*
                }
            }

            fn name(self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }

            fn from_name(name: &str) -> ::core::option::Option<Self> {
                match name {
                    #(#from_name_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl ::core::fmt::Display for #name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(#kind_path::name(*self))
            }
        }
    })
}
