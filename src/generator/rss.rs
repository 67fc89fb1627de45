//! rss feed generation.
//!
//! One channel, one item per post, in the order the posts are given.

use crate::{config::SiteConfig, log, utils::date, walker::PostRecord};
use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::{fs, path::Path};

/// Feed file name, relative to the output root.
pub const FEED_FILE: &str = "rss.xml";

// ============================================================================
// Public API
// ============================================================================

/// Build the feed for `posts` and write it to `rss.xml`.
pub fn write_rss(
    posts: &[PostRecord],
    output_root: &Path,
    config: &SiteConfig,
    build_time: DateTime<Utc>,
) -> Result<()> {
    RssFeed::new(config, posts, build_time).write(output_root)
}

/// Absolute URL of a post: the site URL and the relative output path joined
/// by exactly one `/`.
pub fn post_url(site_url: &str, output_path: &str) -> String {
    format!(
        "{}/{}",
        site_url.trim_end_matches('/'),
        output_path.trim_start_matches('/')
    )
}

// ============================================================================
// RssFeed Implementation
// ============================================================================

/// rss feed builder
struct RssFeed<'a> {
    config: &'a SiteConfig,
    posts: &'a [PostRecord],
    build_time: DateTime<Utc>,
}

impl<'a> RssFeed<'a> {
    fn new(config: &'a SiteConfig, posts: &'a [PostRecord], build_time: DateTime<Utc>) -> Self {
        Self {
            config,
            posts,
            build_time,
        }
    }

    /// Generate rss xml string
    fn into_xml(self) -> Result<String> {
        let items: Vec<_> = self
            .posts
            .iter()
            .map(|post| post_to_rss_item(post, self.config, self.build_time))
            .collect();

        let channel = ChannelBuilder::default()
            .title(&self.config.site_title)
            .link(&self.config.site_url)
            .description(&self.config.site_description)
            .last_build_date(Some(date::to_rfc2822(&self.build_time)))
            .generator("marksite".to_string())
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| anyhow!("rss validation failed: {e}"))?;
        Ok(channel.to_string())
    }

    /// Write rss feed to file
    fn write(self, output_root: &Path) -> Result<()> {
        let count = self.posts.len();
        let xml = self.into_xml()?;
        fs::write(output_root.join(FEED_FILE), xml)?;

        log!("rss"; "{} ({} items)", FEED_FILE, count);
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert a post to an rss item.
///
/// A missing or unparseable date falls back to the build time, since every
/// item carries a `pubDate`.
fn post_to_rss_item(post: &PostRecord, config: &SiteConfig, build_time: DateTime<Utc>) -> rss::Item {
    let link = post_url(&config.site_url, &post.output_path);
    let description = post
        .metadata
        .description()
        .map_or_else(|| post.title.clone(), str::to_owned);
    let pub_date = date::parse_iso8601(post.date()).unwrap_or(build_time);

    ItemBuilder::default()
        .title(Some(post.title.clone()))
        .link(Some(link.clone()))
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(Some(description))
        .pub_date(Some(date::to_rfc2822(&pub_date)))
        .build()
}
