//! Mail template resolution and dual-format rendering

pub mod assets;
pub mod errors;
pub mod i18n;
pub mod markup;
pub mod message;
pub mod registry;
pub mod templater;
pub mod tenant;

pub use errors::RenderError;
pub use message::{MimeType, Part, RenderedMail};
pub use registry::{MailTemplates, SubjectSpec, MAIL_TEMPLATES, TEMPLATE_TITLE_VAR};
pub use templater::{MailTemplater, RenderRequest};

#[cfg(test)]
pub mod tests {
    pub use super::assets::MockTemplateSourceLoader;
    pub use super::i18n::MockTranslator;
    pub use super::markup::MockMarkupTransformer;
    pub use super::tenant::MockTenantContext;
}
