//! Concrete implementations of the rendering collaborators

pub mod assets;
pub mod email;
pub mod i18n;
pub mod markup;
