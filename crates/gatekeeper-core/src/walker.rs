//! Tree walking: which files a scan visits, and in which order.
//!
//! Walks are depth-first with directory entries sorted by name, so two walks
//! over the same tree always yield the same sequence. Any read failure ends
//! the walk with [`ScanError::Io`]; a partial walk never looks like a pass.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::context::{extension_of, SourceFile};
use crate::error::ScanError;

/// Directory names never descended into.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".next",
    "out",
    "build",
    "dist",
    "coverage",
    ".turbo",
    ".vercel",
    ".git",
];

/// File extensions visited by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "css", "scss"];

/// A directory subtree plus the filters that decide what is visited in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRoot {
    /// Directory, relative to the tree's base.
    pub path: PathBuf,
    /// Allowed extensions, lower-case and without the dot.
    pub extensions: Vec<String>,
    /// Directory names to skip.
    pub exclude_dirs: Vec<String>,
    /// Whether a missing directory is a configuration error.
    pub required: bool,
}

impl ScanRoot {
    /// Creates an optional root with the default filters.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_string()).collect(),
            exclude_dirs: DEFAULT_EXCLUDED_DIRS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            required: false,
        }
    }

    /// Marks the root as required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Replaces the allowed extensions.
    #[must_use]
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| {
                let e: String = e.into();
                e.trim_start_matches('.').to_ascii_lowercase()
            })
            .collect();
        self
    }

    /// Replaces the excluded directory names.
    #[must_use]
    pub fn exclude_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_dirs = names.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a file at `path` has an allowed extension.
    #[must_use]
    pub fn accepts_file(&self, path: &Path) -> bool {
        let ext = extension_of(path);
        !ext.is_empty() && self.extensions.iter().any(|e| *e == ext)
    }

    /// Whether a directory named `name` is skipped. Hidden directories always are.
    #[must_use]
    pub fn skips_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.exclude_dirs.iter().any(|d| d == name)
    }
}

/// Lazy sequence of files produced by a walk.
pub type SourceIter<'a> = Box<dyn Iterator<Item = Result<SourceFile, ScanError>> + 'a>;

/// Something that can be walked: the file system, or a synthetic tree.
pub trait SourceTree {
    /// Whether the root directory exists in this tree.
    fn has_root(&self, root: &ScanRoot) -> bool;

    /// Starts a fresh walk over `root`.
    fn walk<'a>(&'a self, root: &'a ScanRoot) -> SourceIter<'a>;
}

/// A tree on disk under a base directory.
#[derive(Debug, Clone)]
pub struct DiskTree {
    base: PathBuf,
}

impl DiskTree {
    /// Creates a tree rooted at `base`.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn load(&self, path: &Path) -> Result<SourceFile, ScanError> {
        let content = std::fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
        let relative = path
            .strip_prefix(&self.base)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
        Ok(SourceFile::new(path, relative, content))
    }
}

impl SourceTree for DiskTree {
    fn has_root(&self, root: &ScanRoot) -> bool {
        self.base.join(&root.path).is_dir()
    }

    fn walk<'a>(&'a self, root: &'a ScanRoot) -> SourceIter<'a> {
        let start = self.base.join(&root.path);
        let walker = WalkDir::new(&start)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                let skip = root.skips_dir(&name);
                if skip {
                    debug!("Excluding directory: {}", entry.path().display());
                }
                !skip
            });

        Box::new(walker.filter_map(move |entry| match entry {
            Err(e) => {
                let path = e
                    .path()
                    .map_or_else(|| start.clone(), Path::to_path_buf);
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
                Some(Err(ScanError::io(path, source)))
            }
            Ok(entry) => {
                if !entry.file_type().is_file() || !root.accepts_file(entry.path()) {
                    return None;
                }
                Some(self.load(entry.path()))
            }
        }))
    }
}

#[derive(Debug, Clone)]
enum MemoryEntry {
    File(String),
    Unreadable,
}

/// A synthetic tree held in memory, walked exactly like a [`DiskTree`].
///
/// Paths are relative to an imaginary base. Entries are kept in path order,
/// which is the same order a depth-first walk with name-sorted entries
/// produces.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    entries: BTreeMap<PathBuf, MemoryEntry>,
}

impl MemoryTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file.
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Adds or replaces a file in place.
    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.entries
            .insert(path.into(), MemoryEntry::File(content.into()));
    }

    /// Marks a directory as unreadable; walking into it fails.
    #[must_use]
    pub fn unreadable_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.entries.insert(path.into(), MemoryEntry::Unreadable);
        self
    }

    fn visible(root: &ScanRoot, relative: &Path) -> bool {
        // Every directory component below the root must pass the filter.
        let Ok(inner) = relative.strip_prefix(&root.path) else {
            return false;
        };
        let mut components: Vec<_> = inner.components().collect();
        components.pop();
        components
            .iter()
            .all(|c| !root.skips_dir(&c.as_os_str().to_string_lossy()))
    }
}

impl SourceTree for MemoryTree {
    fn has_root(&self, root: &ScanRoot) -> bool {
        root.path.as_os_str().is_empty()
            || self
                .entries
                .keys()
                .any(|p| p.starts_with(&root.path) && p != &root.path)
    }

    fn walk<'a>(&'a self, root: &'a ScanRoot) -> SourceIter<'a> {
        let mut blocked: Option<&'a Path> = None;
        Box::new(self.entries.iter().filter_map(move |(path, entry)| {
            if !path.starts_with(&root.path) {
                return None;
            }
            if blocked.is_some_and(|dir| path.starts_with(dir)) {
                return None;
            }
            match entry {
                MemoryEntry::Unreadable => {
                    if !Self::visible(root, &path.join("_")) {
                        return None;
                    }
                    blocked = Some(path.as_path());
                    Some(Err(ScanError::io(
                        path.clone(),
                        std::io::Error::new(
                            std::io::ErrorKind::PermissionDenied,
                            "permission denied",
                        ),
                    )))
                }
                MemoryEntry::File(content) => {
                    if !root.accepts_file(path) || !Self::visible(root, path) {
                        return None;
                    }
                    Some(Ok(SourceFile::new(path.clone(), path.clone(), content.clone())))
                }
            }
        }))
    }
}
