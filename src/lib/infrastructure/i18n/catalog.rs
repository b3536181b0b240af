//! Translator backed by JSON catalogs fetched through the asset loader

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use anyhow::Context as _;
use async_trait::async_trait;
use serde_json::Value;

use crate::domain::rendering::{
    assets::{TemplateSourceError, TemplateSourceLoader},
    i18n::Translator,
};

/// Translated strings for one (context, locale) pair
type Catalog = HashMap<String, String>;

/// Translator reading `locales/<locale>.json` catalogs through the
/// template source loader, so catalogs follow the same per-tenant overlay
/// rules as templates.
///
/// Catalogs are cached per (context, locale); the cache is populated
/// lazily and never invalidated. Concurrent warming calls may load the
/// same catalog redundantly, which only costs wasted work.
pub struct CatalogTranslator<L> {
    loader: Arc<L>,
    catalogs: RwLock<HashMap<(String, String), Arc<Catalog>>>,
}

impl<L> fmt::Debug for CatalogTranslator<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogTranslator").finish_non_exhaustive()
    }
}

impl<L> CatalogTranslator<L>
where
    L: TemplateSourceLoader,
{
    /// Creates a translator fetching catalogs through the given loader
    pub fn new(loader: Arc<L>) -> Self {
        Self {
            loader,
            catalogs: RwLock::new(HashMap::new()),
        }
    }

    fn catalog(&self, context: &str, locale: &str) -> Option<Arc<Catalog>> {
        self.catalogs
            .read()
            .expect("catalog cache lock poisoned")
            .get(&(context.to_owned(), locale.to_owned()))
            .cloned()
    }
}

#[async_trait]
impl<L> Translator for CatalogTranslator<L>
where
    L: TemplateSourceLoader,
{
    fn translate(&self, key: &str, locale: &str, context: &str, args: &[Value]) -> String {
        let catalog = self.catalog(context, locale);
        let pattern = catalog
            .as_ref()
            .and_then(|catalog| catalog.get(key))
            .map_or(key, String::as_str);

        interpolate(pattern, args)
    }

    async fn load_contextualized_catalog(
        &self,
        context: &str,
        locale: &str,
    ) -> anyhow::Result<()> {
        let cache_key = (context.to_owned(), locale.to_owned());
        if self
            .catalogs
            .read()
            .expect("catalog cache lock poisoned")
            .contains_key(&cache_key)
        {
            return Ok(());
        }

        let path = format!("locales/{locale}.json");
        let catalog = match self.loader.load_template_source(&path, context).await {
            Ok(bytes) => serde_json::from_slice::<Catalog>(&bytes)
                .with_context(|| format!("malformed translation catalog {path:?}"))?,
            // A locale without a catalog translates every key to itself.
            Err(TemplateSourceError::NotFound { .. }) => Catalog::new(),
            Err(err) => return Err(err.into()),
        };

        self.catalogs
            .write()
            .expect("catalog cache lock poisoned")
            .entry(cache_key)
            .or_insert_with(|| Arc::new(catalog));

        Ok(())
    }
}

/// Replaces each `%s` in the pattern with the next positional argument;
/// `%%` emits a literal percent sign. Absent (`null`) arguments render as
/// the empty string, as do `%s` placeholders without a matching argument.
fn interpolate(pattern: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut args = args.iter();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.peek() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some('s') => {
                chars.next();
                if let Some(value) = args.next() {
                    out.push_str(&display_value(value));
                }
            }
            _ => out.push('%'),
        }
    }

    out
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(string) => string.clone(),
        other => other.to_string(),
    }
}
