//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// config.json Defaults
// ============================================================================

pub mod site {
    pub fn default_template() -> String {
        "base".into()
    }

    pub fn site_title() -> String {
        "My website".into()
    }

    pub fn site_url() -> String {
        "http://localhost:8000/".into()
    }

    pub fn site_description() -> String {
        String::new()
    }
}

// ============================================================================
// Project Layout Defaults
// ============================================================================

pub mod paths {
    use std::path::PathBuf;

    pub fn config() -> PathBuf {
        "config.json".into()
    }

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn templates() -> PathBuf {
        "templates".into()
    }

    pub fn static_dir() -> PathBuf {
        "static".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }
}
