//! Page templates.
//!
//! A template is an HTML file at `templates/<name>.html` with two slots,
//! `{{ title }}` and `{{ content }}`. Rendering is a single literal pass over
//! the template: no escaping, no loops, no conditionals. Text inserted into a
//! slot is never scanned for further placeholders.

use crate::error::BuildError;
use regex::{Captures, Regex};
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

static RE_SLOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{ (title|content) \}\}").unwrap());

/// Values substituted into a template.
#[derive(Debug, Clone, Copy)]
pub struct Slots<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

/// A loaded template.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Load `<dir>/<name>.html`.
    pub fn load(dir: &Path, name: &str) -> Result<Self, BuildError> {
        let path = template_path(dir, name);
        match fs::read_to_string(&path) {
            Ok(source) => Ok(Self::new(source)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(BuildError::TemplateNotFound {
                name: name.to_owned(),
                path,
            }),
            Err(err) => Err(BuildError::io(path, err)),
        }
    }

    /// Substitute every slot occurrence.
    pub fn render(&self, slots: &Slots<'_>) -> String {
        RE_SLOT
            .replace_all(&self.source, |caps: &Captures<'_>| match &caps[1] {
                "title" => slots.title,
                _ => slots.content,
            })
            .into_owned()
    }
}

/// Templates loaded during one build, keyed by name.
#[derive(Debug)]
pub struct Templates {
    dir: PathBuf,
    loaded: HashMap<String, Template>,
}

impl Templates {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            loaded: HashMap::new(),
        }
    }

    /// Get a template by name, reading it from disk on first use.
    pub fn get(&mut self, name: &str) -> Result<&Template, BuildError> {
        if !self.loaded.contains_key(name) {
            let template = Template::load(&self.dir, name)?;
            self.loaded.insert(name.to_owned(), template);
        }
        Ok(&self.loaded[name])
    }

    /// Render the named template with `slots`.
    pub fn render(&mut self, name: &str, slots: &Slots<'_>) -> Result<String, BuildError> {
        Ok(self.get(name)?.render(slots))
    }
}

/// Location of a named template.
pub fn template_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.html"))
}
