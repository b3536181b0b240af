//! Rendered mail parts

use std::fmt;

use serde::{Deserialize, Serialize};

/// MIME type of a rendered mail part
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum MimeType {
    /// `text/plain`
    #[serde(rename = "text/plain")]
    PlainText,

    /// `text/html`
    #[serde(rename = "text/html")]
    Html,
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MimeType::PlainText => write!(f, "text/plain"),
            MimeType::Html => write!(f, "text/html"),
        }
    }
}

/// One alternative body of a rendered mail
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Part {
    /// The rendered body
    pub body: String,

    /// The MIME type of the body
    #[serde(rename = "type")]
    pub mime_type: MimeType,
}

/// A rendered mail, ready to hand to the delivery subsystem.
///
/// The plain text part is always present and comes first; an HTML part
/// follows only when HTML rendering succeeded.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RenderedMail {
    /// The localized subject line
    pub subject: String,

    /// The alternative bodies, plain text first
    pub parts: Vec<Part>,
}
