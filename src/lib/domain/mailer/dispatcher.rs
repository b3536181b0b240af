//! Renders a mail and hands it to the delivery backend

use std::{fmt, sync::Arc};

use thiserror::Error;
use tracing::debug;

use crate::domain::{
    mailer::{EmailAddress, Mailer, MailerError},
    rendering::{
        assets::TemplateSourceLoader, errors::RenderError, i18n::Translator,
        markup::MarkupTransformer, tenant::TenantContext, MailTemplater, RenderRequest,
    },
};

/// Errors that can occur while dispatching a mail
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The mail could not be rendered
    #[error("could not render the mail")]
    Render(#[from] RenderError),

    /// The rendered mail could not be sent
    #[error("could not send the mail")]
    Send(#[from] MailerError),
}

/// Renders mails through a [`MailTemplater`] and sends them through a
/// [`Mailer`]
pub struct MailDispatcher<L, T, M, B> {
    templater: MailTemplater<L, T, M>,
    mailer: Arc<B>,
}

impl<L, T, M, B> fmt::Debug for MailDispatcher<L, T, M, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailDispatcher").finish_non_exhaustive()
    }
}

impl<L, T, M, B> MailDispatcher<L, T, M, B>
where
    L: TemplateSourceLoader,
    T: Translator,
    M: MarkupTransformer,
    B: Mailer,
{
    /// Creates a new mail dispatcher
    pub fn new(templater: MailTemplater<L, T, M>, mailer: Arc<B>) -> Self {
        Self { templater, mailer }
    }

    /// Renders the requested mail and sends it to `to`.
    ///
    /// # Arguments
    /// * `tenant` - The tenant context scoping assets and catalogs.
    /// * `to` - The recipient address.
    /// * `request` - The mail to render.
    ///
    /// # Returns
    /// A [`Result`] indicating success or failure.
    pub async fn dispatch(
        &self,
        tenant: Option<&dyn TenantContext>,
        to: &EmailAddress,
        request: &RenderRequest,
    ) -> Result<(), DispatchError> {
        let mail = self.templater.render_email(tenant, request).await?;

        debug!(
            template = %request.template_name,
            parts = mail.parts.len(),
            "dispatching rendered mail"
        );

        self.mailer
            .send_email(to, &mail.subject, &mail.parts)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::Value;
    use testresult::TestResult;

    use crate::domain::{
        mailer::tests::MockMailer,
        rendering::{
            assets::TemplateSourceError,
            tests::{MockMarkupTransformer, MockTemplateSourceLoader, MockTranslator},
            MimeType,
        },
    };

    use super::*;

    fn templater(
    ) -> MailTemplater<MockTemplateSourceLoader, MockTranslator, MockMarkupTransformer> {
        let mut loader = MockTemplateSourceLoader::new();
        loader.expect_load_template_source().returning(|path, _| {
            if path == "mails/magic_link.text" {
                Ok(b"Sign in here.".to_vec())
            } else {
                Err(TemplateSourceError::NotFound {
                    path: path.to_owned(),
                })
            }
        });

        let mut translator = MockTranslator::new();
        translator
            .expect_load_contextualized_catalog()
            .returning(|_, _| Ok(()));
        translator
            .expect_translate()
            .returning(|key: &str, _, _, _: &[Value]| key.to_owned());

        MailTemplater::new(
            Arc::new(loader),
            Arc::new(translator),
            Arc::new(MockMarkupTransformer::new()),
        )
    }

    fn request() -> RenderRequest {
        RenderRequest {
            template_name: "magic_link".to_owned(),
            layout_name: "layout".to_owned(),
            locale: "en".to_owned(),
            recipient_name: "Alice".to_owned(),
            template_values: None,
        }
    }

    #[tokio::test]
    async fn test_dispatch_sends_the_rendered_mail() -> TestResult {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send_email()
            .times(1)
            .withf(|to, subject, parts| {
                to == &EmailAddress::new_unchecked("alice@example.com")
                    && subject == "Mail Magic Link Subject"
                    && parts.len() == 1
                    && parts[0].mime_type == MimeType::PlainText
            })
            .returning(|_, _, _| Ok(()));

        let dispatcher = MailDispatcher::new(templater(), Arc::new(mailer));

        dispatcher
            .dispatch(
                None,
                &EmailAddress::new_unchecked("alice@example.com"),
                &request(),
            )
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_dispatch_surfaces_send_failures() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send_email()
            .returning(|_, _, _| Err(MailerError::SendError));

        let dispatcher = MailDispatcher::new(templater(), Arc::new(mailer));

        let result = dispatcher
            .dispatch(
                None,
                &EmailAddress::new_unchecked("alice@example.com"),
                &request(),
            )
            .await;

        assert!(matches!(result, Err(DispatchError::Send(_))));
    }

    #[tokio::test]
    async fn test_dispatch_surfaces_render_failures() {
        let mut loader = MockTemplateSourceLoader::new();
        loader.expect_load_template_source().returning(|path, _| {
            Err(TemplateSourceError::NotFound {
                path: path.to_owned(),
            })
        });

        let mut translator = MockTranslator::new();
        translator
            .expect_load_contextualized_catalog()
            .returning(|_, _| Ok(()));
        translator
            .expect_translate()
            .returning(|key: &str, _, _, _: &[Value]| key.to_owned());

        let templater = MailTemplater::new(
            Arc::new(loader),
            Arc::new(translator),
            Arc::new(MockMarkupTransformer::new()),
        );

        let mailer = MockMailer::new();
        let dispatcher = MailDispatcher::new(templater, Arc::new(mailer));

        let result = dispatcher
            .dispatch(
                None,
                &EmailAddress::new_unchecked("alice@example.com"),
                &request(),
            )
            .await;

        assert!(matches!(
            result,
            Err(DispatchError::Render(RenderError::SourceUnavailable { .. }))
        ));
    }
}
