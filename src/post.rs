//! New post creation.

use crate::{
    config::SitePaths,
    error::BuildError,
    log,
    utils::{date::parse_iso8601, slug::slugify},
};
use anyhow::{Context, Result};
use serde_json::json;
use std::{fs, path::PathBuf};

/// Body written below the header of a new post.
const POST_BODY: &str = "Write your post here.\n";

/// Create `content/blog/<slug>.md` with a `title`/`date` header.
///
/// Refuses to overwrite an existing post.
pub fn new_post(paths: &SitePaths, title: &str, date: &str) -> Result<PathBuf> {
    let blog_dir = paths.blog_dir();
    let path = blog_dir.join(format!("{}.md", slugify(title)));

    if path.exists() {
        return Err(BuildError::PostExists { path }.into());
    }
    if parse_iso8601(date).is_none() {
        log!("warn"; "`{}` is not an ISO 8601 date; it will be left off the blog index", date);
    }

    fs::create_dir_all(&blog_dir)
        .with_context(|| format!("Failed to create {}", blog_dir.display()))?;

    let header = serde_json::to_string_pretty(&json!({ "title": title, "date": date }))?;
    fs::write(&path, format!("{header}\n===\n\n{POST_BODY}"))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    log!("post"; "created {}", path.display());
    Ok(path)
}
