//! Content tree rendering.
//!
//! Mirrors `content/` into the output directory, rendering every `.md` file
//! through its template and collecting two side outputs:
//!
//! ```text
//! walk(content, output)
//!     │
//!     ├── subdirectory ──► create mirrored dir, recurse, merge child output
//!     │
//!     └── *.md ──► parse ──► render ──► write *.html
//!                                  │
//!                                  ├── PageRegistry  (route → title/content)
//!                                  └── posts         (only under blog/)
//! ```
//!
//! Each recursive call returns its own [`WalkOutput`]; the parent merges it
//! in processing order, so a route collision is won by whichever document
//! was processed last. Processing order is `read_dir` order, which is not
//! stable across platforms.

use crate::{
    config::SiteConfig,
    document::{FrontMatter, parse_document},
    error::BuildError,
    log,
    template::{Slots, Templates},
};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fs,
    path::{Component, Path},
};

/// Directory name whose documents are collected as posts.
pub const BLOG_DIR: &str = "blog";

// ============================================================================
// Types
// ============================================================================

/// A rendered page as seen by client-side navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    #[serde(skip)]
    pub route: String,
    pub title: String,
    pub content_html: String,
}

/// Route → page mapping for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageRegistry {
    pages: BTreeMap<String, PageRecord>,
}

impl PageRegistry {
    /// Insert a page, replacing any previous page at the same route.
    pub fn insert(&mut self, record: PageRecord) -> Option<PageRecord> {
        self.pages.insert(record.route.clone(), record)
    }

    /// Merge `other` into `self`; pages in `other` win on collision.
    pub fn extend(&mut self, other: PageRegistry) {
        self.pages.extend(other.pages);
    }

    pub fn get(&self, route: &str) -> Option<&PageRecord> {
        self.pages.get(route)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Pages in route order.
    pub fn iter(&self) -> impl Iterator<Item = &PageRecord> {
        self.pages.values()
    }
}

/// A document found directly inside a `blog` directory.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    /// Output path relative to the site root, `/`-separated.
    pub output_path: String,
    pub metadata: FrontMatter,
    /// Header `title`, else the output file stem.
    pub title: String,
}

impl PostRecord {
    pub fn route(&self) -> String {
        route_for(Path::new(&self.output_path))
    }

    /// The raw `date` header, empty when absent.
    pub fn date(&self) -> &str {
        self.metadata.date().unwrap_or_default()
    }
}

/// Everything a walk produces besides the written files.
#[derive(Debug, Clone, Default)]
pub struct WalkOutput {
    pub pages: PageRegistry,
    /// `None` when the content root has no `blog` directory.
    pub posts: Option<Vec<PostRecord>>,
}

impl WalkOutput {
    fn new(collect_posts: bool) -> Self {
        Self {
            pages: PageRegistry::default(),
            posts: collect_posts.then(Vec::new),
        }
    }

    fn merge(&mut self, child: WalkOutput) {
        self.pages.extend(child.pages);
        if let (Some(posts), Some(child_posts)) = (self.posts.as_mut(), child.posts) {
            posts.extend(child_posts);
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Render the tree under `content_root` into `output_root`.
///
/// `output_root` must already exist. Non-markdown files are skipped.
pub fn walk(
    content_root: &Path,
    output_root: &Path,
    config: &SiteConfig,
    templates: &mut Templates,
) -> Result<WalkOutput, BuildError> {
    let mut walker = Walker {
        content_root,
        output_root,
        config,
        templates,
        collect_posts: content_root.join(BLOG_DIR).is_dir(),
    };
    walker.walk_dir(Path::new(""))
}

/// Route for an output path relative to the output root.
///
/// `blog/my-post.html` → `/blog/my-post`, `docs/index.html` → `/docs`,
/// `index.html` → `/`.
pub fn route_for(relative: &Path) -> String {
    let stem = relative.with_extension("");
    let mut parts: Vec<_> = stem
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    if parts.last().is_some_and(|last| last == "index") {
        parts.pop();
    }

    format!("/{}", parts.join("/"))
}

// ============================================================================
// Internal
// ============================================================================

struct Walker<'a> {
    content_root: &'a Path,
    output_root: &'a Path,
    config: &'a SiteConfig,
    templates: &'a mut Templates,
    collect_posts: bool,
}

impl Walker<'_> {
    /// Walk `content_root/relative`, returning what it and its children produced.
    fn walk_dir(&mut self, relative: &Path) -> Result<WalkOutput, BuildError> {
        let mut output = WalkOutput::new(self.collect_posts);
        let dir = self.content_root.join(relative);
        let entries = fs::read_dir(&dir).map_err(|err| BuildError::io(&dir, err))?;

        for entry in entries {
            let entry = entry.map_err(|err| BuildError::io(&dir, err))?;
            let path = entry.path();
            let relative = relative.join(entry.file_name());

            if path.is_dir() {
                let out_dir = self.output_root.join(&relative);
                fs::create_dir_all(&out_dir).map_err(|err| BuildError::io(&out_dir, err))?;
                output.merge(self.walk_dir(&relative)?);
            } else if is_markdown(&path) {
                self.render_file(&path, &relative, &mut output)?;
            }
        }

        Ok(output)
    }

    fn render_file(
        &mut self,
        source: &Path,
        relative: &Path,
        output: &mut WalkOutput,
    ) -> Result<(), BuildError> {
        let text = fs::read_to_string(source).map_err(|err| BuildError::io(source, err))?;
        let doc = parse_document(&text, source, self.config)?;
        let html = self.templates.render(
            &doc.template_name,
            &Slots {
                title: &doc.title,
                content: &doc.body_html,
            },
        )?;

        let relative = relative.with_extension("html");
        let out_path = self.output_root.join(&relative);
        fs::write(&out_path, html).map_err(|err| BuildError::io(&out_path, err))?;
        log!("content"; "{}", relative.display());

        if let Some(posts) = output.posts.as_mut()
            && in_blog_dir(&relative)
        {
            let title = doc.metadata.title().map_or_else(
                || {
                    relative
                        .file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                        .unwrap_or_default()
                },
                str::to_owned,
            );
            posts.push(PostRecord {
                output_path: to_slash_path(&relative),
                metadata: doc.metadata,
                title,
            });
        }

        output.pages.insert(PageRecord {
            route: route_for(&relative),
            title: doc.title,
            content_html: doc.body_html,
        });

        Ok(())
    }
}

fn is_markdown(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "md")
}

/// Whether the file's immediate parent directory is named `blog`.
fn in_blog_dir(relative: &Path) -> bool {
    relative
        .parent()
        .and_then(Path::file_name)
        .is_some_and(|name| name == BLOG_DIR)
}

fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
