//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── reset_output() ──► wipe and recreate the output directory
//!     │
//!     ├── walker::walk() ──► *.html, PageRegistry, posts
//!     │
//!     ├── (posts present)
//!     │       ├── blog::sort_posts()
//!     │       ├── blog::write_index() ──► blog.html, registers /blog
//!     │       └── rss::write_rss()    ──► rss.xml
//!     │
//!     ├── nav::write_navigation() ──► pages.json, router.js
//!     │
//!     └── assets::copy_static()   ──► static/
//! ```
//!
//! Everything runs sequentially and the aggregation steps only start after the
//! walk has finished, so they always see the complete registry. A failed
//! build leaves whatever was written so far; there is no rollback.

use crate::{
    assets,
    config::{SiteConfig, SitePaths},
    generator::{blog, nav, rss},
    log,
    template::Templates,
    walker::{self, WalkOutput},
};
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use std::fs;

/// Inputs shared by every step of one build.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub config: &'a SiteConfig,
    pub paths: &'a SitePaths,
    /// Captured once, used for every time-dependent output.
    pub build_time: DateTime<Utc>,
}

impl<'a> BuildContext<'a> {
    pub fn new(config: &'a SiteConfig, paths: &'a SitePaths) -> Self {
        Self {
            config,
            paths,
            build_time: Utc::now(),
        }
    }
}

/// Counts reported after a successful build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Registered routes, including `/blog` when an index was written.
    pub pages: usize,
    pub posts: usize,
    pub assets: usize,
}

/// Build the entire site from scratch.
pub fn build_site(ctx: &BuildContext<'_>) -> Result<BuildSummary> {
    let BuildContext {
        config,
        paths,
        build_time,
    } = *ctx;

    if !paths.content.is_dir() {
        bail!(
            "content directory not found: {} (run `marksite init` first)",
            paths.content.display()
        );
    }
    reset_output(paths)?;

    let mut templates = Templates::new(&paths.templates);
    let WalkOutput { mut pages, posts } =
        walker::walk(&paths.content, &paths.output, config, &mut templates)?;

    let mut post_count = 0;
    if let Some(mut posts) = posts.filter(|posts| !posts.is_empty()) {
        blog::sort_posts(&mut posts, config.post_order);
        blog::write_index(&posts, &paths.output, config, &mut templates, &mut pages)?;
        rss::write_rss(&posts, &paths.output, config, build_time)?;
        post_count = posts.len();
    }

    nav::write_navigation(&pages, &paths.output)?;
    let asset_count = assets::copy_static(&paths.static_dir, &paths.output)?;

    let summary = BuildSummary {
        pages: pages.len(),
        posts: post_count,
        assets: asset_count,
    };
    log_build_result(&summary);
    Ok(summary)
}

/// Remove the output directory and create it empty.
///
/// Refuses an output directory that contains the project or any source
/// directory, or that lies inside one.
fn reset_output(paths: &SitePaths) -> Result<()> {
    let output = &paths.output;
    if paths.root.starts_with(output) {
        bail!(
            "refusing to clear output directory {}: it contains the project root",
            output.display()
        );
    }
    for source in [&paths.content, &paths.templates, &paths.static_dir] {
        if source.starts_with(output) || output.starts_with(source) {
            bail!(
                "refusing to clear output directory {}: it overlaps source directory {}",
                output.display(),
                source.display()
            );
        }
    }

    if output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;
    Ok(())
}

fn log_build_result(summary: &BuildSummary) {
    if summary.pages == 0 {
        log!("warn"; "output is empty, check if content has .md files");
    } else {
        log!(
            "build";
            "done: {} pages, {} posts, {} static files",
            summary.pages,
            summary.posts,
            summary.assets
        );
    }
}
