//! Markup transformers

pub mod mjml;

pub use mjml::MjmlTransformer;
