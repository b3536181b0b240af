//! Template resolution and dual-format rendering pipeline

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tera::{Context as TeraContext, Tera};
use tracing::{error, warn};

use crate::domain::rendering::{
    assets::{TemplateSourceError, TemplateSourceLoader},
    errors::RenderError,
    i18n::{html_translator_fn, translator_fn, Translator},
    markup::MarkupTransformer,
    message::{MimeType, Part, RenderedMail},
    registry::{MailTemplates, MAIL_TEMPLATES, TEMPLATE_TITLE_VAR},
    tenant::TenantContext,
};

/// Context name used for asset and catalog lookup when no tenant context
/// is supplied.
const DEFAULT_CONTEXT: &str = "default";

/// One mail rendering request
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RenderRequest {
    /// Name of the template family to render
    pub template_name: String,

    /// Name of the layout wrapping the HTML content template
    pub layout_name: String,

    /// Locale the mail should be rendered in
    pub locale: String,

    /// Display name of the recipient, carried for the delivery layer
    pub recipient_name: String,

    /// Substitution values handed to the templates
    pub template_values: Option<Map<String, Value>>,
}

/// Renders localized mail subjects and alternative bodies.
///
/// Rendering is stateless and reentrant: every call owns its request, its
/// data map and its output buffers, so unrelated renders may run
/// concurrently without synchronization.
pub struct MailTemplater<L, T, M> {
    registry: &'static MailTemplates,
    loader: Arc<L>,
    translator: Arc<T>,
    transformer: Arc<M>,
}

impl<L, T, M> fmt::Debug for MailTemplater<L, T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailTemplater").finish_non_exhaustive()
    }
}

impl<L, T, M> MailTemplater<L, T, M>
where
    L: TemplateSourceLoader,
    T: Translator,
    M: MarkupTransformer,
{
    /// Creates a templater over the built-in template registry
    pub fn new(loader: Arc<L>, translator: Arc<T>, transformer: Arc<M>) -> Self {
        Self::with_registry(&MAIL_TEMPLATES, loader, translator, transformer)
    }

    /// Creates a templater over a custom template registry
    pub fn with_registry(
        registry: &'static MailTemplates,
        loader: Arc<L>,
        translator: Arc<T>,
        transformer: Arc<M>,
    ) -> Self {
        Self {
            registry,
            loader,
            translator,
            transformer,
        }
    }

    /// Renders the subject and the alternative bodies for a mail.
    ///
    /// The plain text body is mandatory: any failure on that path aborts
    /// the render. The HTML body is best-effort: its failure is logged and
    /// the mail is returned with the text part only.
    pub async fn render_email(
        &self,
        tenant: Option<&dyn TenantContext>,
        request: &RenderRequest,
    ) -> Result<RenderedMail, RenderError> {
        let entry =
            self.registry
                .get(&request.template_name)
                .ok_or_else(|| RenderError::TemplateNotFound {
                    name: request.template_name.clone(),
                })?;

        let context =
            tenant.map_or_else(|| DEFAULT_CONTEXT.to_owned(), |tenant| tenant.context_name());

        let mut args = Vec::with_capacity(entry.variables.len());
        for variable in entry.variables {
            if *variable == TEMPLATE_TITLE_VAR {
                args.push(tenant.map_or(Value::Null, |tenant| {
                    Value::String(tenant.display_title())
                }));
            } else {
                args.push(
                    request
                        .template_values
                        .as_ref()
                        .and_then(|values| values.get(*variable))
                        .cloned()
                        .unwrap_or(Value::Null),
                );
            }
        }

        // Catalog warming failures leave translations falling back to
        // their keys; they never abort the render.
        if let Err(err) = self
            .translator
            .load_contextualized_catalog(&context, &request.locale)
            .await
        {
            warn!(
                context = %context,
                locale = %request.locale,
                "could not load translation catalog: {err}"
            );
        }

        let subject = self
            .translator
            .translate(entry.key, &request.locale, &context, &args);

        let mut data = request.template_values.clone().unwrap_or_default();
        data.insert("Locale".to_owned(), Value::String(request.locale.clone()));
        if let Some(tenant) = tenant {
            data.insert(
                "InstanceURL".to_owned(),
                Value::String(tenant.page_url("/", None)),
            );
        }

        let text = self
            .build_text(&request.template_name, &context, &request.locale, &data)
            .await?;
        let mut parts = vec![Part {
            body: text,
            mime_type: MimeType::PlainText,
        }];

        // If we cannot generate the HTML, we should still send the mail
        // with the text part.
        match self
            .build_html(
                &request.template_name,
                &request.layout_name,
                &context,
                &request.locale,
                &data,
            )
            .await
        {
            Ok(html) => parts.push(Part {
                body: html,
                mime_type: MimeType::Html,
            }),
            Err(err) => error!(
                template = %request.template_name,
                "cannot generate HTML mail: {err}"
            ),
        }

        Ok(RenderedMail { subject, parts })
    }

    /// Renders the plain text body of a mail
    async fn build_text(
        &self,
        name: &str,
        context: &str,
        locale: &str,
        data: &Map<String, Value>,
    ) -> Result<String, RenderError> {
        let path = format!("mails/{name}.text");
        let source = self.load(&path, context).await?;

        let mut tera = Tera::default();
        tera.register_function(
            "t",
            translator_fn(
                Arc::clone(&self.translator),
                locale.to_owned(),
                context.to_owned(),
            ),
        );
        tera.add_raw_template("text", &source)
            .map_err(|source| RenderError::Syntax {
                path: path.clone(),
                source,
            })?;

        let tera_context =
            TeraContext::from_serialize(data).map_err(|source| RenderError::Execution {
                path: path.clone(),
                source,
            })?;

        tera.render("text", &tera_context)
            .map_err(|source| RenderError::Execution { path, source })
    }

    /// Composes the content and layout markup templates and converts the
    /// result to HTML
    async fn build_html(
        &self,
        name: &str,
        layout: &str,
        context: &str,
        locale: &str,
        data: &Map<String, Value>,
    ) -> Result<String, RenderError> {
        let content_path = format!("mails/{name}.mjml");
        let layout_path = format!("mails/{layout}.mjml");
        let content_source = self.load(&content_path, context).await?;
        let layout_source = self.load(&layout_path, context).await?;

        let mut tera = Tera::default();
        tera.register_function(
            "t",
            translator_fn(
                Arc::clone(&self.translator),
                locale.to_owned(),
                context.to_owned(),
            ),
        );
        tera.register_function(
            "tHTML",
            html_translator_fn(
                Arc::clone(&self.translator),
                locale.to_owned(),
                context.to_owned(),
            ),
        );
        tera.add_raw_template("content", &content_source)
            .map_err(|source| RenderError::Syntax {
                path: content_path.clone(),
                source,
            })?;
        tera.add_raw_template("layout", &layout_source)
            .map_err(|source| RenderError::Syntax {
                path: layout_path.clone(),
                source,
            })?;

        let tera_context =
            TeraContext::from_serialize(data).map_err(|source| RenderError::Execution {
                path: layout_path.clone(),
                source,
            })?;

        // The layout is the entry point; it pulls the content template in
        // by its "content" name.
        let markup = tera
            .render("layout", &tera_context)
            .map_err(|source| RenderError::Execution {
                path: layout_path,
                source,
            })?;

        let html = self.transformer.transform(markup.as_bytes()).await?;

        Ok(html)
    }

    async fn load(&self, path: &str, context: &str) -> Result<String, RenderError> {
        let bytes = self
            .loader
            .load_template_source(path, context)
            .await
            .map_err(|source| RenderError::SourceUnavailable {
                path: path.to_owned(),
                source,
            })?;

        String::from_utf8(bytes).map_err(|err| RenderError::SourceUnavailable {
            path: path.to_owned(),
            source: TemplateSourceError::UnknownError(anyhow::Error::new(err)),
        })
    }
}
