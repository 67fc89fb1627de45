//! Project layout resolution.
//!
//! Every directory the build touches is resolved once against the project
//! root, so the rest of the pipeline only ever sees absolute paths.
//!
//! ```text
//! <root>/
//!     ├── config.json
//!     ├── content/      → markdown sources
//!     ├── templates/    → <name>.html templates
//!     ├── static/       → copied verbatim to <output>/static
//!     └── public/       → output (wiped on every build)
//! ```

use super::defaults;
use crate::{cli::Cli, walker::BLOG_DIR};
use std::path::{Path, PathBuf};

/// Resolved directories for one project.
#[derive(Debug, Clone)]
pub struct SitePaths {
    pub root: PathBuf,
    pub config: PathBuf,
    pub content: PathBuf,
    pub templates: PathBuf,
    pub static_dir: PathBuf,
    pub output: PathBuf,
}

impl SitePaths {
    /// Default layout rooted at `root`.
    pub fn from_root(root: &Path) -> Self {
        let root = normalize_path(root);
        Self {
            config: root.join(defaults::paths::config()),
            content: root.join(defaults::paths::content()),
            templates: root.join(defaults::paths::templates()),
            static_dir: root.join(defaults::paths::static_dir()),
            output: root.join(defaults::paths::output()),
            root,
        }
    }

    /// Layout from CLI arguments; explicit flags are resolved relative to root.
    pub fn from_cli(cli: &Cli) -> Self {
        let mut paths = Self::from_root(cli.root.as_deref().unwrap_or(Path::new("./")));
        let root = paths.root.clone();

        let overrides = [
            (&mut paths.config, cli.config.as_ref()),
            (&mut paths.content, cli.content.as_ref()),
            (&mut paths.templates, cli.templates.as_ref()),
            (&mut paths.static_dir, cli.static_dir.as_ref()),
            (&mut paths.output, cli.output.as_ref()),
        ];
        for (slot, value) in overrides {
            if let Some(value) = value {
                *slot = normalize_path(&root.join(value));
            }
        }

        paths
    }

    /// Directory holding blog posts.
    pub fn blog_dir(&self) -> PathBuf {
        self.content.join(BLOG_DIR)
    }
}

/// Normalize a path to absolute, using canonicalize if the path exists
fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        // For non-existent paths, manually make them absolute
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}
