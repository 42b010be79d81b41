//! Classification and allow-list redaction for a curated set of local cluster APIs.
//!
//! This crate separates:
//! - **Classification**: which supported API a caller's URI-like input targets,
//!   and whether its path parameters are acceptable.
//! - **Redaction**: which fields of that API's raw response may reach the caller.
//!
//! Key rules:
//! - Only `localhost:9200` over `http`/`https` is accepted.
//! - APIs are matched by path prefix in catalog declaration order; the first
//!   match wins.
//! - Redaction is allow-list only. A response root that is not listed is
//!   dropped; a listed root with no sub-paths is kept whole.
//!
//! What this crate does:
//! - defines the API catalog ([`ApiType`], [`ApiCatalog`], and the
//!   [`ApiCatalog`](derive@ApiCatalog) derive for alternate catalogs)
//! - validates caller input into a [`CanonicalRequest`]
//! - loads allow-lists ([`RedactionCatalog`]) and applies them ([`redact`])
//! - provides `slog` adapters and the [`ApiGate`] facade that logs decisions
//!
//! What it does not do:
//! - perform network I/O or dispatch requests
//! - enforce the connection/socket timeouts it validates
//!
//! The `ApiCatalog` derive macro lives in `localuri-derive` and is re-exported here.
//!
//! ```
//! use localuri::{ApiGate, ApiType, UriInput};
//! use serde_json::json;
//!
//! let log = slog::Logger::root(slog::Discard, slog::o!());
//! let gate = ApiGate::bundled(log).unwrap();
//!
//! let request = gate
//!     .classify(&UriInput::from_url("http://localhost:9200/_cluster/health/logs-*"))
//!     .unwrap();
//! assert_eq!(request.api_type(), ApiType::ClusterHealth);
//! assert_eq!(request.path_params(), "logs-*");
//!
//! let filtered = gate
//!     .redact(request.api_type(), &json!({ "status": "green" }))
//!     .unwrap();
//! assert_eq!(filtered, json!({ "status": "green" }));
//! ```

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
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use localuri_derive::ApiCatalog;

// Lets the derive emit `::localuri::...` paths inside this crate too.
#[allow(unused_extern_crates)]
extern crate self as localuri;

// Module declarations
mod api_type;
mod catalog;
mod classify;
mod error;
mod gate;
mod redaction;
mod resolve;
pub mod slog;

// Re-exports
pub use api_type::ApiType;
pub use catalog::{ApiCatalog, ApiDescriptor, ApiKind};
pub use classify::{
    extract_path_params, CanonicalRequest, UriClassifier, UriInput, DEFAULT_SCHEME,
    ILLEGAL_PATH_PARAMETER_CHARACTERS, MAX_CONNECTION_TIMEOUT, MAX_SOCKET_TIMEOUT,
    MIN_CONNECTION_TIMEOUT, MIN_SOCKET_TIMEOUT, SUPPORTED_HOST, SUPPORTED_PORT,
    SUPPORTED_SCHEMES,
};
pub use error::{CatalogError, ClassifyError, FieldPathError, TimeoutKind};
pub use gate::ApiGate;
pub use redaction::{redact, AllowList, FieldPath, RedactionCatalog, ALLOW_LIST_ENV};
pub use resolve::ApiRequest;
