//! Post ordering and the blog index page.
//!
//! The index is written to `blog.html` and registered at route `/blog` so the
//! client router can swap to it like any other page.

use crate::{
    config::{PostOrder, SiteConfig},
    error::BuildError,
    log,
    template::{Slots, Templates},
    utils::{date, html::html_escape},
    walker::{PageRecord, PageRegistry, PostRecord},
};
use std::{cmp::Reverse, fmt::Write, fs, path::Path};

/// Index page file name, relative to the output root.
pub const INDEX_FILE: &str = "blog.html";
/// Route the index page is registered under.
pub const INDEX_ROUTE: &str = "/blog";

// ============================================================================
// Ordering
// ============================================================================

/// Order posts newest first. The sort is stable.
///
/// With [`PostOrder::Lexicographic`] the raw `date` strings are compared, so
/// `"2024-3-1"` sorts before `"2024-12-01"`; undated posts compare as `""`
/// and land last. [`PostOrder::Chronological`] compares parsed dates and
/// puts undated or unparseable posts last.
pub fn sort_posts(posts: &mut [PostRecord], order: PostOrder) {
    match order {
        PostOrder::Lexicographic => posts.sort_by(|a, b| b.date().cmp(a.date())),
        PostOrder::Chronological => {
            posts.sort_by_cached_key(|post| Reverse(date::parse_iso8601(post.date())));
        }
    }
}

// ============================================================================
// Index Page
// ============================================================================

/// Render the index, write `blog.html` and register it at `/blog`.
///
/// `posts` must already be ordered.
pub fn write_index(
    posts: &[PostRecord],
    output_root: &Path,
    config: &SiteConfig,
    templates: &mut Templates,
    pages: &mut PageRegistry,
) -> Result<(), BuildError> {
    let title = index_title(config);
    let content = index_body(posts);
    let html = templates.render(
        &config.default_template,
        &Slots {
            title: &title,
            content: &content,
        },
    )?;

    let path = output_root.join(INDEX_FILE);
    fs::write(&path, html).map_err(|err| BuildError::io(&path, err))?;
    log!("blog"; "{} ({} posts)", INDEX_FILE, posts.len());

    pages.insert(PageRecord {
        route: INDEX_ROUTE.to_owned(),
        title,
        content_html: content,
    });
    Ok(())
}

pub fn index_title(config: &SiteConfig) -> String {
    format!("Blog - {}", config.site_title)
}

/// Index page content: a heading and one navigation-aware link per post.
///
/// Dates that do not parse as ISO 8601 are left out.
pub fn index_body(posts: &[PostRecord]) -> String {
    let mut html = String::from("<h1>Blog</h1>\n<ul class=\"post-list\">\n");

    for post in posts {
        let _ = write!(
            html,
            "<li><a href=\"{}\" data-nav>{}</a>",
            html_escape(&post.route()),
            html_escape(&post.title)
        );
        if let Some(dt) = date::parse_iso8601(post.date()) {
            let _ = write!(
                html,
                " <time datetime=\"{}\">{}</time>",
                html_escape(post.date().trim()),
                date::to_long_form(&dt)
            );
        }
        html.push_str("</li>\n");
    }

    html.push_str("</ul>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FrontMatter;
    use serde_json::json;

    fn post(name: &str, date: Option<&str>) -> PostRecord {
        PostRecord {
            output_path: format!("blog/{name}.html"),
            metadata: FrontMatter::from(json!({ "date": date }).as_object().cloned().unwrap()),
            title: name.to_owned(),
        }
    }

    fn titles(posts: &[PostRecord]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_sort_lexicographic_missing_last() {
        let mut posts = vec![
            post("jan", Some("2024-01-15")),
            post("none", None),
            post("mar", Some("2024-03-01")),
        ];
        sort_posts(&mut posts, PostOrder::Lexicographic);
        assert_eq!(titles(&posts), ["mar", "jan", "none"]);
    }

    #[test]
    fn test_sort_lexicographic_is_string_order() {
        let mut posts = vec![post("dec", Some("2024-12-01")), post("mar", Some("2024-3-01"))];
        sort_posts(&mut posts, PostOrder::Lexicographic);
        assert_eq!(titles(&posts), ["mar", "dec"]);
    }

    #[test]
    fn test_sort_chronological() {
        let mut posts = vec![
            post("bad", Some("someday")),
            post("dec", Some("2024-12-01")),
            post("mar", Some("2024-03-01T10:00:00Z")),
            post("none", None),
        ];
        sort_posts(&mut posts, PostOrder::Chronological);
        assert_eq!(titles(&posts), ["dec", "mar", "bad", "none"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut posts = vec![
            post("a", Some("2024-01-01")),
            post("b", None),
            post("c", Some("2024-01-01")),
            post("d", None),
        ];
        sort_posts(&mut posts, PostOrder::Lexicographic);
        assert_eq!(titles(&posts), ["a", "c", "b", "d"]);
    }

    #[test]
    fn test_index_body_links_and_dates() {
        let posts = vec![
            post("first", Some("2024-01-15T08:00:00Z")),
            post("second", Some("not a date")),
        ];
        let html = index_body(&posts);

        assert!(html.starts_with("<h1>Blog</h1>"));
        assert!(html.contains(
            "<li><a href=\"/blog/first\" data-nav>first</a> \
             <time datetime=\"2024-01-15T08:00:00Z\">January 15, 2024</time></li>"
        ));
        assert!(html.contains("<li><a href=\"/blog/second\" data-nav>second</a></li>"));
        assert!(!html.contains("not a date"));
    }

    #[test]
    fn test_index_body_escapes_titles() {
        let mut p = post("x", None);
        p.title = "<Rust & C>".into();
        let html = index_body(&[p]);
        assert!(html.contains(">&lt;Rust &amp; C&gt;</a>"));
    }

    #[test]
    fn test_write_index_registers_page() {
        let dir = tempfile::tempdir().unwrap();
        let templates_dir = dir.path().join("templates");
        fs::create_dir_all(&templates_dir).unwrap();
        fs::write(templates_dir.join("base.html"), "<title>{{ title }}</title>{{ content }}").unwrap();

        let config = SiteConfig {
            site_title: "Notes".into(),
            ..SiteConfig::default()
        };
        let mut templates = Templates::new(&templates_dir);
        let mut pages = PageRegistry::default();
        let posts = vec![post("hello", Some("2024-01-15"))];

        write_index(&posts, dir.path(), &config, &mut templates, &mut pages).unwrap();

        let html = fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap();
        assert!(html.starts_with("<title>Blog - Notes</title><h1>Blog</h1>"));
        assert!(html.contains("January 15, 2024"));

        let page = pages.get(INDEX_ROUTE).unwrap();
        assert_eq!(page.title, "Blog - Notes");
        assert_eq!(page.content_html, index_body(&posts));
    }
}
