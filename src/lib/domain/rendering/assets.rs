//! Template source loading boundary

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::mock;

/// Errors that can occur while resolving a template source
#[derive(Debug, Error)]
pub enum TemplateSourceError {
    /// No source exists at the requested path
    #[error("no template source at {path:?}")]
    NotFound {
        /// The requested asset path
        path: String,
    },

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Resolves a logical template path, scoped to a tenant context, into raw
/// template source bytes.
#[async_trait]
pub trait TemplateSourceLoader: Send + Sync + 'static {
    /// Loads the template source stored under `path` for the given tenant
    /// context.
    ///
    /// # Arguments
    /// * `path` - The logical asset path, e.g. `mails/magic_link.text`.
    /// * `context` - The tenant/environment discriminator.
    ///
    /// # Returns
    /// The raw source bytes, or a [`TemplateSourceError`] if the asset
    /// could not be resolved.
    async fn load_template_source(
        &self,
        path: &str,
        context: &str,
    ) -> Result<Vec<u8>, TemplateSourceError>;
}

#[cfg(test)]
mock! {
    pub TemplateSourceLoader {}

    #[async_trait]
    impl TemplateSourceLoader for TemplateSourceLoader {
        async fn load_template_source(&self, path: &str, context: &str) -> Result<Vec<u8>, TemplateSourceError>;
    }
}
