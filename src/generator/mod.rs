//! Artifacts derived from the whole site after the content walk.
//!
//! - **blog**: post ordering and the `blog.html` index page
//! - **rss**: `rss.xml` feed
//! - **nav**: `pages.json` and `router.js` for client-side navigation

pub mod blog;
pub mod nav;
pub mod rss;
