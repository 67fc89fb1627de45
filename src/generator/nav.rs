//! Client-side navigation artifacts.
//!
//! - `pages.json`: the page registry, `{ route: { title, content_html } }`
//! - `router.js`: the same table assigned to `window.__PAGE_DATA__`, followed
//!   by the fixed router from `embed/router.js`
//!
//! The router source never changes between builds; only the data prelude is
//! generated.

use crate::{log, walker::PageRegistry};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Page table file name, relative to the output root.
pub const DATA_FILE: &str = "pages.json";
/// Router script file name, relative to the output root.
pub const SCRIPT_FILE: &str = "router.js";

/// Fixed router logic.
pub const ROUTER_SOURCE: &str = include_str!("../embed/router.js");

// ============================================================================
// Public API
// ============================================================================

/// Write `pages.json` and `router.js` for the complete registry.
pub fn write_navigation(pages: &PageRegistry, output_root: &Path) -> Result<()> {
    let data = page_data_json(pages)?;
    let script = router_script(&data);

    let data_path = output_root.join(DATA_FILE);
    fs::write(&data_path, &data)
        .with_context(|| format!("Failed to write {}", data_path.display()))?;

    let script_path = output_root.join(SCRIPT_FILE);
    fs::write(&script_path, script)
        .with_context(|| format!("Failed to write {}", script_path.display()))?;

    log!("nav"; "{} routes", pages.len());
    Ok(())
}

/// Serialize the registry. Routes are emitted in sorted order.
pub fn page_data_json(pages: &PageRegistry) -> Result<String> {
    serde_json::to_string(pages).context("Failed to serialize page data")
}

/// Router script for already-serialized page data.
pub fn router_script(data_json: &str) -> String {
    format!(
        "window.__PAGE_DATA__ = {};\n{}",
        escape_for_script(data_json),
        ROUTER_SOURCE
    )
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Make JSON safe to embed in a `<script>` context.
///
/// Every escaped character can only occur inside JSON strings, where the
/// `\uXXXX` form decodes to the same value.
fn escape_for_script(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::PageRecord;
    use serde_json::{Value, json};

    fn registry() -> PageRegistry {
        let mut pages = PageRegistry::default();
        pages.insert(PageRecord {
            route: "/blog/post".into(),
            title: "Post".into(),
            content_html: "<p>Hi</p>".into(),
        });
        pages.insert(PageRecord {
            route: "/".into(),
            title: "Home".into(),
            content_html: "<h1>Home</h1>\n".into(),
        });
        pages
    }

    #[test]
    fn test_page_data_json() {
        let data = page_data_json(&registry()).unwrap();
        let value: Value = serde_json::from_str(&data).unwrap();

        assert_eq!(
            value,
            json!({
                "/": { "title": "Home", "content_html": "<h1>Home</h1>\n" },
                "/blog/post": { "title": "Post", "content_html": "<p>Hi</p>" }
            })
        );
        // Sorted keys keep the output byte-stable across builds.
        assert!(data.find("\"/\"").unwrap() < data.find("\"/blog/post\"").unwrap());
    }

    #[test]
    fn test_router_script_escapes_markup() {
        let mut pages = PageRegistry::default();
        pages.insert(PageRecord {
            route: "/x".into(),
            title: "a & b".into(),
            content_html: "</script><script>alert(1)</script>\u{2028}".into(),
        });
        let data = page_data_json(&pages).unwrap();
        let script = router_script(&data);

        let prelude = script.lines().next().unwrap();
        assert!(!prelude.contains("</script>"));
        assert!(!prelude.contains('&'));
        assert!(!prelude.contains('\u{2028}'));

        // The escaped table still decodes to the same data.
        let json = prelude
            .strip_prefix("window.__PAGE_DATA__ = ")
            .and_then(|s| s.strip_suffix(';'))
            .unwrap();
        let decoded: Value = serde_json::from_str(json).unwrap();
        assert_eq!(decoded["/x"]["title"], "a & b");
        assert_eq!(
            decoded["/x"]["content_html"],
            "</script><script>alert(1)</script>\u{2028}"
        );
    }

    #[test]
    fn test_router_script_contains_router() {
        let script = router_script("{}");
        assert!(script.starts_with("window.__PAGE_DATA__ = {};\n"));
        assert!(script.ends_with(ROUTER_SOURCE));
        assert!(ROUTER_SOURCE.contains("DOMContentLoaded"));
        assert!(ROUTER_SOURCE.contains("pushState"));
        assert!(ROUTER_SOURCE.contains("data-nav"));
    }

    /// Browser globals the router touches, recording side effects in `calls`.
    const DOM_STUB: &str = r#"
var calls = { assign: [], pushState: [], replaceState: [], scrollTo: 0 };
var contentElement = { innerHTML: "", querySelectorAll: function () { return []; } };
var document = {
  readyState: "complete",
  title: "",
  body: contentElement,
  getElementById: function (id) { return id === "content" ? contentElement : null; },
  querySelector: function () { return null; },
  querySelectorAll: function () { return []; },
  addEventListener: function () {}
};
var window = {
  location: {
    pathname: "/",
    href: "http://localhost/",
    origin: "http://localhost",
    hash: "",
    assign: function (href) { calls.assign.push(href); },
    reload: function () {}
  },
  history: {
    pushState: function (state, title, url) { calls.pushState.push(url); },
    replaceState: function (state) { calls.replaceState.push(state.route); }
  },
  addEventListener: function () {},
  scrollTo: function () { calls.scrollTo += 1; }
};
"#;

    /// Evaluate the generated script against the DOM stub, then `expr`, which
    /// must produce a JSON string.
    fn eval_router(pages: &PageRegistry, expr: &str) -> Value {
        use boa_engine::{Context, Source};

        let script = router_script(&page_data_json(pages).unwrap());
        let code = format!("{DOM_STUB}\n{script}\n{expr}");
        let mut context = Context::default();
        let result = context
            .eval(Source::from_bytes(code.as_bytes()))
            .unwrap_or_else(|err| panic!("router script failed: {err}"));
        let json = result
            .to_string(&mut context)
            .unwrap()
            .to_std_string_escaped();
        serde_json::from_str(&json).unwrap()
    }

    fn page(route: &str, title: &str) -> PageRecord {
        PageRecord {
            route: route.into(),
            title: title.into(),
            content_html: format!("<p>{title}</p>"),
        }
    }

    #[test]
    fn test_router_normalizes_routes() {
        let routes = eval_router(
            &PageRegistry::default(),
            r#"JSON.stringify([
                "/blog/index.html", "/blog/post.html", "/", "/index.html",
                "/a.b/", "/docs/", "//x//y.html", ""
            ].map(function (p) { return window.__marksiteRouter.normalizeRoute(p, false); }))"#,
        );

        assert_eq!(
            routes,
            json!(["/blog", "/blog/post", "/", "/", "/a.b", "/docs", "/x/y", "/"])
        );
    }

    #[test]
    fn test_router_lookup() {
        let mut pages = registry();
        pages.insert(page("/a.b", "Dotted"));
        pages.insert(page("/blog", "Blog"));

        let found = eval_router(
            &pages,
            r#"JSON.stringify([
                "/blog/post.html", "/blog/post", "/blog/index.html", "/blog/",
                "/index.html", "/a.b", "/a.b/", "/missing", "/missing.html"
            ].map(function (p) {
                var match = window.__marksiteRouter.lookup(p);
                return match && match.route;
            }))"#,
        );

        assert_eq!(
            found,
            json!([
                "/blog/post", "/blog/post", "/blog", "/blog",
                "/", "/a.b", "/a.b", null, null
            ])
        );
    }

    #[test]
    fn test_router_navigation() {
        let outcome = eval_router(
            &registry(),
            r#"var router = window.__marksiteRouter;
            var known = router.navigate(
                { pathname: "/blog/post", href: "http://localhost/blog/post", search: "", hash: "" },
                true
            );
            var swapped = { title: document.title, html: contentElement.innerHTML };
            var unknown = router.navigate(
                { pathname: "/nowhere", href: "http://localhost/nowhere", search: "", hash: "" },
                true
            );
            JSON.stringify({ known: known, unknown: unknown, swapped: swapped, calls: calls })"#,
        );

        assert_eq!(outcome["known"], true);
        assert_eq!(outcome["swapped"], json!({ "title": "Post", "html": "<p>Hi</p>" }));
        assert_eq!(outcome["unknown"], false);
        assert_eq!(outcome["calls"]["assign"], json!(["http://localhost/nowhere"]));
        assert_eq!(outcome["calls"]["pushState"], json!(["/blog/post"]));
        assert_eq!(outcome["calls"]["scrollTo"], 1);
        // The initial page is registered with the history entry on load.
        assert_eq!(outcome["calls"]["replaceState"], json!(["/"]));
    }

    #[test]
    fn test_write_navigation_empty_registry() {
        let dir = tempfile::tempdir().unwrap();
        write_navigation(&PageRegistry::default(), dir.path()).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join(DATA_FILE)).unwrap(), "{}");
        assert!(dir.path().join(SCRIPT_FILE).exists());
    }
}
