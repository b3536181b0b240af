//! Translators

pub mod catalog;

pub use catalog::CatalogTranslator;
