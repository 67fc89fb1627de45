//! Build error types.
//!
//! Every variant here aborts the build. Cosmetic metadata problems (such as
//! an unparseable post date) never surface as errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning the content tree into a site.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("malformed frontmatter in `{path}`")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("frontmatter in `{path}` must be a JSON object")]
    FrontmatterShape { path: PathBuf },

    #[error("template `{name}` not found at `{path}`")]
    TemplateNotFound { name: String, path: PathBuf },

    #[error("IO error when accessing `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("post already exists: `{path}`")]
    PostExists { path: PathBuf },
}

impl BuildError {
    /// Attach a path to an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
