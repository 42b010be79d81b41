//! Parsing of `#[api(...)]` variant attributes.
//!
//! This module maps attribute syntax to catalog entries and produces
//! structured errors for invalid forms. Path rules that can be checked
//! without the rest of the enum (leading `/`, prefix containment) are
//! checked here; cross-variant rules live in `derive_enum`.

use proc_macro2::Span;
use syn::{meta::ParseNestedMeta, Attribute, LitStr, Meta, Result};

/// How an API treats path parameters.
///
/// | `path_params = ` | supports | requires |
/// |------------------|----------|----------|
/// | `"none"` (default) | no | no |
/// | `"optional"` | yes | no |
/// | `"required"` | yes | yes |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum PathParams {
    #[default]
    None,
    Optional,
    Required,
}

impl PathParams {
    fn parse(lit: &LitStr) -> Result<Self> {
        match lit.value().as_str() {
            "none" => Ok(Self::None),
            "optional" => Ok(Self::Optional),
            "required" => Ok(Self::Required),
            other => Err(syn::Error::new(
                lit.span(),
                format!("unknown path_params mode `{other}`; expected `none`, `optional`, or `required`"),
            )),
        }
    }

    pub(crate) fn supports(self) -> bool {
        !matches!(self, Self::None)
    }

    pub(crate) fn requires(self) -> bool {
        matches!(self, Self::Required)
    }
}

/// Matching rules for a routable API variant.
#[derive(Clone, Debug)]
pub(crate) struct Route {
    /// Canonical path; also the redaction catalog key.
    pub(crate) path: LitStr,
    /// Prefix used for matching. Defaults to `path`.
    pub(crate) prefix: Option<LitStr>,
    /// Suffix stripped when extracting path parameters. Defaults to `""`.
    pub(crate) suffix: Option<LitStr>,
    pub(crate) path_params: PathParams,
}

#[derive(Clone, Debug)]
pub(crate) enum VariantKind {
    /// The "unclassified" sentinel. Never matched, has no descriptor.
    Blank,
    Api(Route),
}

#[derive(Clone, Debug)]
pub(crate) struct VariantOptions {
    pub(crate) kind: VariantKind,
    /// Wire name override. Defaults to the SCREAMING_SNAKE_CASE identifier.
    pub(crate) name: Option<LitStr>,
}

#[derive(Default)]
struct RawOptions {
    blank: bool,
    path: Option<LitStr>,
    prefix: Option<LitStr>,
    suffix: Option<LitStr>,
    path_params: Option<PathParams>,
    name: Option<LitStr>,
}

fn option_name(meta: &ParseNestedMeta<'_>) -> String {
    meta.path
        .get_ident()
        .map_or_else(|| "?".to_string(), ToString::to_string)
}

fn set_once<T>(slot: &mut Option<T>, value: T, meta: &ParseNestedMeta<'_>) -> Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate api option `{}`", option_name(meta))));
    }
    *slot = Some(value);
    Ok(())
}

fn parse_nested(raw: &mut RawOptions, meta: &ParseNestedMeta<'_>) -> Result<()> {
    if meta.path.is_ident("blank") {
        if raw.blank {
            return Err(meta.error("duplicate api option `blank`"));
        }
        raw.blank = true;
        Ok(())
    } else if meta.path.is_ident("path") {
        let lit: LitStr = meta.value()?.parse()?;
        set_once(&mut raw.path, lit, meta)
    } else if meta.path.is_ident("prefix") {
        let lit: LitStr = meta.value()?.parse()?;
        set_once(&mut raw.prefix, lit, meta)
    } else if meta.path.is_ident("suffix") {
        let lit: LitStr = meta.value()?.parse()?;
        set_once(&mut raw.suffix, lit, meta)
    } else if meta.path.is_ident("path_params") {
        let lit: LitStr = meta.value()?.parse()?;
        let mode = PathParams::parse(&lit)?;
        set_once(&mut raw.path_params, mode, meta)
    } else if meta.path.is_ident("name") {
        let lit: LitStr = meta.value()?.parse()?;
        set_once(&mut raw.name, lit, meta)
    } else {
        Err(meta.error(format!(
            "unknown api option `{}`; expected one of `blank`, `path`, `prefix`, `suffix`, `path_params`, `name`",
            option_name(meta)
        )))
    }
}

fn ensure_absolute(lit: &LitStr, option: &str) -> Result<()> {
    if lit.value().starts_with('/') {
        Ok(())
    } else {
        Err(syn::Error::new(
            lit.span(),
            format!("api `{option}` must start with `/`"),
        ))
    }
}

/// Parses the `#[api(...)]` attribute of a single variant.
///
/// `span` is used for errors about a missing attribute.
pub(crate) fn parse_variant_options(attrs: &[Attribute], span: Span) -> Result<VariantOptions> {
    let mut raw = RawOptions::default();
    let mut seen = false;

    for attr in attrs {
        if !attr.path().is_ident("api") {
            continue;
        }
        if seen {
            return Err(syn::Error::new_spanned(
                attr,
                "multiple #[api] attributes specified on the same variant",
            ));
        }
        seen = true;

        match &attr.meta {
            Meta::List(list) => {
                list.parse_nested_meta(|meta| parse_nested(&mut raw, &meta))?;
            }
            Meta::Path(path) => {
                return Err(syn::Error::new_spanned(
                    path,
                    "expected options, e.g. #[api(path = \"/_cluster/health\")] or #[api(blank)]",
                ));
            }
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(
                    nv,
                    "name-value syntax is not supported for #[api]",
                ));
            }
        }
    }

    if !seen {
        return Err(syn::Error::new(
            span,
            "missing #[api(...)] attribute; every variant needs `path = \"...\"` or `blank`",
        ));
    }

    let RawOptions {
        blank,
        path,
        prefix,
        suffix,
        path_params,
        name,
    } = raw;

    if blank {
        if path.is_some() || prefix.is_some() || suffix.is_some() || path_params.is_some() {
            return Err(syn::Error::new(
                span,
                "`blank` variants cannot declare `path`, `prefix`, `suffix`, or `path_params`",
            ));
        }
        return Ok(VariantOptions {
            kind: VariantKind::Blank,
            name,
        });
    }

    let Some(path) = path else {
        return Err(syn::Error::new(
            span,
            "missing api option `path`; use #[api(blank)] for the unclassified variant",
        ));
    };
    ensure_absolute(&path, "path")?;

    if let Some(prefix) = &prefix {
        ensure_absolute(prefix, "prefix")?;
        if !path.value().starts_with(&prefix.value()) {
            return Err(syn::Error::new(
                prefix.span(),
                format!(
                    "api `prefix` \"{}\" must be a prefix of `path` \"{}\"",
                    prefix.value(),
                    path.value()
                ),
            ));
        }
    }

    Ok(VariantOptions {
        kind: VariantKind::Api(Route {
            path,
            prefix,
            suffix,
            path_params: path_params.unwrap_or_default(),
        }),
        name,
    })
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::{Data, DeriveInput};

    use super::*;

    fn parse_variant(tokens: proc_macro2::TokenStream) -> Result<VariantOptions> {
        let input: DeriveInput = syn::parse2(quote! {
            enum Dummy { #tokens }
        })
        .expect("should parse as DeriveInput");
        let Data::Enum(data) = input.data else {
            panic!("expected enum");
        };
        let variant = data.variants.into_iter().next().expect("one variant");
        parse_variant_options(&variant.attrs, Span::call_site())
    }

    #[test]
    fn path_only_defaults_to_no_path_params() {
        let options = parse_variant(quote! {
            #[api(path = "/_cat/tasks")]
            CatTasks
        })
        .unwrap();
        match options.kind {
            VariantKind::Api(route) => {
                assert_eq!(route.path.value(), "/_cat/tasks");
                assert!(route.prefix.is_none());
                assert!(route.suffix.is_none());
                assert_eq!(route.path_params, PathParams::None);
            }
            VariantKind::Blank => panic!("expected Api"),
        }
    }

    #[test]
    fn all_options_are_parsed() {
        let options = parse_variant(quote! {
            #[api(path = "/_nodes/stats", prefix = "/_nodes", suffix = "/stats", path_params = "required", name = "NODES")]
            NodesStats
        })
        .unwrap();
        assert_eq!(options.name.unwrap().value(), "NODES");
        match options.kind {
            VariantKind::Api(route) => {
                assert_eq!(route.prefix.unwrap().value(), "/_nodes");
                assert_eq!(route.suffix.unwrap().value(), "/stats");
                assert!(route.path_params.supports());
                assert!(route.path_params.requires());
            }
            VariantKind::Blank => panic!("expected Api"),
        }
    }

    #[test]
    fn blank_is_parsed() {
        let options = parse_variant(quote! {
            #[api(blank)]
            Blank
        })
        .unwrap();
        assert!(matches!(options.kind, VariantKind::Blank));
    }

    #[test]
    fn blank_with_path_errors() {
        let err = parse_variant(quote! {
            #[api(blank, path = "/x")]
            Blank
        })
        .unwrap_err();
        assert!(err.to_string().contains("`blank` variants cannot declare"));
    }

    #[test]
    fn missing_attribute_errors() {
        let err = parse_variant(quote! { Untagged }).unwrap_err();
        assert!(err.to_string().contains("missing #[api(...)] attribute"));
    }

    #[test]
    fn missing_path_errors() {
        let err = parse_variant(quote! {
            #[api(path_params = "optional")]
            NoPath
        })
        .unwrap_err();
        assert!(err.to_string().contains("missing api option `path`"));
    }

    #[test]
    fn relative_path_errors() {
        let err = parse_variant(quote! {
            #[api(path = "_cat/tasks")]
            CatTasks
        })
        .unwrap_err();
        assert!(err.to_string().contains("must start with `/`"));
    }

    #[test]
    fn prefix_outside_path_errors() {
        let err = parse_variant(quote! {
            #[api(path = "/_nodes/stats", prefix = "/_cluster")]
            NodesStats
        })
        .unwrap_err();
        assert!(err.to_string().contains("must be a prefix of `path`"));
    }

    #[test]
    fn unknown_path_params_mode_errors() {
        let err = parse_variant(quote! {
            #[api(path = "/_cat/tasks", path_params = "sometimes")]
            CatTasks
        })
        .unwrap_err();
        assert!(err.to_string().contains("unknown path_params mode"));
    }

    #[test]
    fn duplicate_option_errors() {
        let err = parse_variant(quote! {
            #[api(path = "/a", path = "/b")]
            Twice
        })
        .unwrap_err();
        assert!(err.to_string().contains("duplicate api option `path`"));
    }

    #[test]
    fn unknown_option_errors() {
        let err = parse_variant(quote! {
            #[api(path = "/a", method = "GET")]
            WithMethod
        })
        .unwrap_err();
        assert!(err.to_string().contains("unknown api option `method`"));
    }

    #[test]
    fn multiple_attributes_error() {
        let err = parse_variant(quote! {
            #[api(path = "/a")]
            #[api(path_params = "optional")]
            Split
        })
        .unwrap_err();
        assert!(err.to_string().contains("multiple #[api] attributes"));
    }

    #[test]
    fn name_value_syntax_errors() {
        let err = parse_variant(quote! {
            #[api = "/a"]
            Assigned
        })
        .unwrap_err();
        assert!(err.to_string().contains("name-value syntax is not supported"));
    }

    #[test]
    fn other_attributes_ignored() {
        let options = parse_variant(quote! {
            #[doc = "cluster health"]
            #[serde(rename = "health")]
            #[api(path = "/_cluster/health")]
            ClusterHealth
        })
        .unwrap();
        assert!(matches!(options.kind, VariantKind::Api(_)));
    }
}
