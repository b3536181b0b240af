//! MJML to HTML conversion

use anyhow::anyhow;
use async_trait::async_trait;
use mrml::{mjml::Mjml, prelude::render::Options as RenderOptions};

use crate::domain::rendering::markup::{MarkupError, MarkupTransformer};

/// Converts composed MJML markup into mail-client-ready HTML
#[derive(Clone, Copy, Debug, Default)]
pub struct MjmlTransformer;

#[async_trait]
impl MarkupTransformer for MjmlTransformer {
    async fn transform(&self, markup: &[u8]) -> Result<String, MarkupError> {
        let markup =
            std::str::from_utf8(markup).map_err(|err| MarkupError::Parse(anyhow!(err)))?;

        let parsed = Mjml::parse(markup).map_err(|err| MarkupError::Parse(anyhow!(err)))?;

        parsed
            .render(&RenderOptions::default())
            .map_err(|err| MarkupError::Render(anyhow!(err)))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn test_transforms_a_minimal_document() -> TestResult {
        let transformer = MjmlTransformer;

        let html = transformer
            .transform(b"<mjml><mj-body><mj-text>Hello</mj-text></mj-body></mjml>")
            .await?;

        assert!(html.contains("Hello"));
        assert!(html.contains("<html"));

        Ok(())
    }

    #[tokio::test]
    async fn test_rejects_markup_that_is_not_mjml() {
        let transformer = MjmlTransformer;

        let result = transformer.transform(b"<p>plain html</p>").await;

        assert!(matches!(result, Err(MarkupError::Parse(_))));
    }
}
