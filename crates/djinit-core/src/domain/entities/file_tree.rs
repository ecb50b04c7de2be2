//! In-memory file trees.
//!
//! [`FileTree`] is the publicly constructible base skeleton handed to the
//! composer. [`VirtualFileTree`] is the composer's output: it can only be
//! created inside this crate, so holding one means composition succeeded.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use super::DomainError;
use super::common::RelativePath;
use super::render::RenderContext;

/// Mapping from relative path to file content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    files: BTreeMap<RelativePath, String>,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, returning the previous content if the path was taken.
    pub fn insert(&mut self, path: RelativePath, content: impl Into<String>) -> Option<String> {
        self.files.insert(path, content.into())
    }

    /// Builder-style insert for string paths.
    pub fn with_file(mut self, path: &str, content: impl Into<String>) -> Result<Self, DomainError> {
        self.insert(RelativePath::try_new(path)?, content);
        Ok(self)
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        let key = RelativePath::try_new(path).ok()?;
        self.files.get(&key).map(String::as_str)
    }

    pub fn contains(&self, path: &RelativePath) -> bool {
        self.files.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RelativePath, &str)> {
        self.files.iter().map(|(p, c)| (p, c.as_str()))
    }

    pub fn files(&self) -> &BTreeMap<RelativePath, String> {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FromIterator<(RelativePath, String)> for FileTree {
    fn from_iter<I: IntoIterator<Item = (RelativePath, String)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

/// The complete output of composition: path to final content.
///
/// Iteration order is path order, so writing and printing are reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFileTree {
    files: BTreeMap<RelativePath, String>,
}

impl VirtualFileTree {
    pub(crate) fn from_map(files: BTreeMap<RelativePath, String>) -> Self {
        Self { files }
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        let key = RelativePath::try_new(path).ok()?;
        self.files.get(&key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RelativePath, &str)> {
        self.files.iter().map(|(p, c)| (p, c.as_str()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &RelativePath> {
        self.files.keys()
    }

    pub fn files(&self) -> &BTreeMap<RelativePath, String> {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Substitute placeholders in every path and every file body.
    ///
    /// Fails with [`DomainError::DuplicatePath`] if two paths render to the
    /// same location, and with a path error if a rendered path is invalid.
    pub fn render(&self, ctx: &RenderContext) -> Result<Self, DomainError> {
        let mut rendered = BTreeMap::new();

        for (path, content) in &self.files {
            let new_path = RelativePath::try_new(ctx.render_path(path.as_str()))?;
            match rendered.entry(new_path) {
                Entry::Occupied(e) => {
                    return Err(DomainError::DuplicatePath {
                        path: e.key().to_string(),
                    });
                }
                Entry::Vacant(e) => {
                    e.insert(ctx.render(content));
                }
            }
        }

        Ok(Self { files: rendered })
    }
}
