//! Markup-to-HTML transformation boundary

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::mock;

/// Errors that can occur while converting composed markup to HTML
#[derive(Debug, Error)]
pub enum MarkupError {
    /// The markup could not be parsed
    #[error("markup could not be parsed")]
    Parse(#[source] anyhow::Error),

    /// The markup parsed but could not be rendered to HTML
    #[error("markup could not be rendered to HTML")]
    Render(#[source] anyhow::Error),
}

/// Converts an intermediate mail-safe markup language into final HTML
/// suitable for mail clients.
#[async_trait]
pub trait MarkupTransformer: Send + Sync + 'static {
    /// Transforms the composed markup into HTML
    async fn transform(&self, markup: &[u8]) -> Result<String, MarkupError>;
}

#[cfg(test)]
mock! {
    pub MarkupTransformer {}

    #[async_trait]
    impl MarkupTransformer for MarkupTransformer {
        async fn transform(&self, markup: &[u8]) -> Result<String, MarkupError>;
    }
}
