//! Translation boundary and the translator functions injected into
//! template execution environments.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;

#[cfg(test)]
use mockall::mock;

/// Resolves translation keys against per-(context, locale) catalogs.
///
/// [`Translator::translate`] is synchronous and reads already-warmed
/// in-memory catalogs; [`Translator::load_contextualized_catalog`] is the
/// idempotent warming call that must be issued before translating for a
/// (context, locale) pair.
#[async_trait]
pub trait Translator: Send + Sync + 'static {
    /// Translates `key` for the given locale and tenant context,
    /// interpolating the positional `args`.
    ///
    /// Absent (`null`) arguments must render gracefully, e.g. as the empty
    /// string.
    fn translate(&self, key: &str, locale: &str, context: &str, args: &[Value]) -> String;

    /// Warms the catalog for a (context, locale) pair.
    ///
    /// Safe to call repeatedly; concurrent redundant loads cost only
    /// wasted work.
    async fn load_contextualized_catalog(&self, context: &str, locale: &str)
        -> anyhow::Result<()>;
}

#[cfg(test)]
mock! {
    pub Translator {}

    #[async_trait]
    impl Translator for Translator {
        fn translate(&self, key: &str, locale: &str, context: &str, args: &[Value]) -> String;
        async fn load_contextualized_catalog(&self, context: &str, locale: &str) -> anyhow::Result<()>;
    }
}

/// Builds the `t` template function bound to a locale and tenant context.
///
/// Inside a template it is called as `{{ t(key="...") }}`, optionally with
/// an `args` array interpolated into the translated string.
pub fn translator_fn<T: Translator>(
    translator: Arc<T>,
    locale: String,
    context: String,
) -> impl tera::Function + 'static {
    move |args: &HashMap<String, Value>| -> tera::Result<Value> {
        let key = translation_key(args)?;
        let vars = positional_args(args);

        Ok(Value::String(
            translator.translate(key, &locale, &context, &vars),
        ))
    }
}

/// Builds the `tHTML` template function bound to a locale and tenant
/// context. Behaves like `t` but HTML-escapes the translated string.
pub fn html_translator_fn<T: Translator>(
    translator: Arc<T>,
    locale: String,
    context: String,
) -> impl tera::Function + 'static {
    move |args: &HashMap<String, Value>| -> tera::Result<Value> {
        let key = translation_key(args)?;
        let vars = positional_args(args);

        Ok(Value::String(tera::escape_html(&translator.translate(
            key, &locale, &context, &vars,
        ))))
    }
}

fn translation_key(args: &HashMap<String, Value>) -> tera::Result<&str> {
    args.get("key")
        .and_then(Value::as_str)
        .ok_or_else(|| tera::Error::msg("translation functions require a string `key` argument"))
}

fn positional_args(args: &HashMap<String, Value>) -> Vec<Value> {
    match args.get("args") {
        Some(Value::Array(values)) => values.clone(),
        Some(value) => vec![value.clone()],
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use serde_json::{json, Value};
    use tera::Function;

    use super::*;

    fn translator_stub() -> MockTranslator {
        let mut translator = MockTranslator::new();

        translator
            .expect_translate()
            .returning(|key, locale, _, args| match args.first() {
                Some(Value::String(arg)) => format!("{key}/{locale}/{arg}"),
                _ => format!("{key}/{locale}"),
            });

        translator
    }

    #[test]
    fn test_t_passes_key_and_args_through() {
        let function = translator_fn(
            Arc::new(translator_stub()),
            "en".to_owned(),
            "acme".to_owned(),
        );

        let mut args = HashMap::new();
        args.insert("key".to_owned(), json!("Hello"));
        args.insert("args".to_owned(), json!(["World"]));

        let rendered = function.call(&args).expect("translatable");

        assert_eq!(rendered, json!("Hello/en/World"));
    }

    #[test]
    fn test_t_requires_a_key() {
        let function = translator_fn(
            Arc::new(translator_stub()),
            "en".to_owned(),
            "acme".to_owned(),
        );

        assert!(function.call(&HashMap::new()).is_err());
    }

    #[test]
    fn test_t_html_escapes_the_translation() {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .returning(|_, _, _, _| "<b>bold</b>".to_owned());

        let function =
            html_translator_fn(Arc::new(translator), "en".to_owned(), "acme".to_owned());

        let mut args = HashMap::new();
        args.insert("key".to_owned(), json!("Bold"));

        let rendered = function.call(&args).expect("translatable");

        assert_eq!(rendered, json!("&lt;b&gt;bold&lt;&#x2F;b&gt;"));
    }
}
