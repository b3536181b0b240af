//! Error types for the mail rendering pipeline

use thiserror::Error;

use crate::domain::rendering::{assets::TemplateSourceError, markup::MarkupError};

/// Errors that can occur while rendering a mail.
///
/// Any of these aborts the whole render when raised on the text path; on
/// the HTML path they are logged and the render degrades to text only.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No mail template is registered under the requested name
    #[error("no mail template named {name:?}")]
    TemplateNotFound {
        /// The requested template name
        name: String,
    },

    /// A required template source could not be loaded
    #[error("could not load template source {path:?}")]
    SourceUnavailable {
        /// The asset path that failed to resolve
        path: String,

        /// The loader failure
        #[source]
        source: TemplateSourceError,
    },

    /// A template source failed to compile
    #[error("template {path:?} failed to compile")]
    Syntax {
        /// The asset path of the malformed template
        path: String,

        /// The compile failure
        #[source]
        source: tera::Error,
    },

    /// A compiled template failed to execute against the provided data
    #[error("template {path:?} failed to execute")]
    Execution {
        /// The asset path of the failing template
        path: String,

        /// The execution failure
        #[source]
        source: tera::Error,
    },

    /// The external markup engine rejected the composed markup
    #[error("could not convert composed markup to HTML")]
    HtmlConversion(#[from] MarkupError),
}
