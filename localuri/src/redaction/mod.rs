//! Allow-list redaction of API responses.
//!
//! - **`allow_list`**: which fields one API may return (`AllowList`, `FieldPath`)
//! - **`catalog`**: the allow-lists of every API, keyed by canonical path (`RedactionCatalog`)
//! - **`redact`**: applying an allow-list to a `serde_json::Value`

mod allow_list;
mod catalog;
mod redact;

pub use allow_list::{AllowList, FieldPath};
pub use catalog::{RedactionCatalog, ALLOW_LIST_ENV};
pub use redact::redact;
