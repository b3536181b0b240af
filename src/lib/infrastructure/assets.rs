//! Template source loaders

pub mod fs;

pub use fs::FsTemplateSourceLoader;
