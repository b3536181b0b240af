#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Transactional mail rendering for a multi-tenant application platform.
//!
//! Given a template name, a layout, a locale and a bag of substitution
//! values, the crate resolves the template through a static registry,
//! translates the subject line and produces a plain text body plus, on a
//! best-effort basis, an HTML body composed from an MJML content template
//! wrapped in a layout.

pub mod domain;
pub mod infrastructure;
