//! Filesystem-backed template source loading

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::domain::rendering::assets::{TemplateSourceError, TemplateSourceLoader};

/// Context directory whose assets are shared by every tenant
const COMMON_CONTEXT: &str = "default";

/// Loads template sources from a directory tree with per-context overlays.
///
/// An asset at `<root>/<context>/<path>` shadows the shared one at
/// `<root>/default/<path>`; lookups fall back to the shared directory when
/// the context has no override.
#[derive(Clone, Debug)]
pub struct FsTemplateSourceLoader {
    root: PathBuf,
}

impl FsTemplateSourceLoader {
    /// Creates a loader rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl TemplateSourceLoader for FsTemplateSourceLoader {
    async fn load_template_source(
        &self,
        path: &str,
        context: &str,
    ) -> Result<Vec<u8>, TemplateSourceError> {
        let mut contexts = vec![context];
        if context != COMMON_CONTEXT {
            contexts.push(COMMON_CONTEXT);
        }

        for dir in contexts {
            let candidate = self.root.join(dir).join(path);

            match fs::read(&candidate).await {
                Ok(bytes) => return Ok(bytes),
                Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
                Err(err) => return Err(TemplateSourceError::UnknownError(err.into())),
            }
        }

        Err(TemplateSourceError::NotFound {
            path: path.to_owned(),
        })
    }
}
