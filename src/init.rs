//! Site initialization module.
//!
//! Creates the default project layout. Existing files are left untouched, so
//! running `init` on a populated project only fills in what is missing.

use crate::{
    config::{SiteConfig, SitePaths},
    log,
    template::template_path,
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Default `templates/base.html`.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
    <head>
        <meta charset="UTF-8">
        <meta name="viewport" content="width=device-width, initial-scale=1">
        <title>{{ title }}</title>
        <link rel="alternate" type="application/rss+xml" href="/rss.xml">
        <script src="/router.js" defer></script>
    </head>
    <body>
        <nav>
            <a href="/" data-nav>Home</a>
            <a href="/blog" data-nav>Blog</a>
        </nav>
        <main id="content">
            {{ content }}
        </main>
    </body>
</html>
"#;

/// Default `content/index.md`.
pub const DEFAULT_INDEX: &str = "# Welcome to My Website\n\
This is the homepage. Edit `content/index.md` to change this text.\n";

/// Create the default project layout under `paths`.
pub fn new_site(paths: &SitePaths) -> Result<()> {
    for dir in [&paths.content, &paths.templates, &paths.static_dir] {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    SiteConfig::load_or_create(&paths.config)?;
    write_if_missing(
        &template_path(&paths.templates, "base"),
        DEFAULT_TEMPLATE,
    )?;
    write_if_missing(&paths.content.join("index.md"), DEFAULT_INDEX)?;

    log!("init"; "site ready at {}", paths.root.display());
    Ok(())
}

/// Write `content` to `path` unless the file already exists.
fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    log!("init"; "created {}", path.display());
    Ok(())
}
