//! Recursive directory listing
//!
//! Walks a root directory depth-first and reports every file found below it,
//! relative to the root. Order follows the underlying walk unless sorting is
//! requested.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ListingResult, MergeError};
use crate::parser::directory::ensure_directory;

/// Options for a listing run
#[derive(Debug, Clone)]
pub struct ListerConfig {
    /// Directory whose descendants are enumerated
    pub root: PathBuf,
    /// Follow symbolic links while walking
    pub follow_links: bool,
    /// Skip subtrees that cannot be read instead of aborting the listing
    pub skip_unreadable: bool,
    /// Visit directory entries in file-name order
    pub sort: bool,
}

impl ListerConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: false,
            skip_unreadable: false,
            sort: false,
        }
    }

    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn with_skip_unreadable(mut self, skip: bool) -> Self {
        self.skip_unreadable = skip;
        self
    }

    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.root.as_os_str().is_empty() {
            return Err("Root directory must not be empty".to_string());
        }
        Ok(())
    }
}

/// A file discovered during traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the listing root
    pub relative_path: PathBuf,
    /// Path as produced by the walk (root joined with `relative_path`)
    pub path: PathBuf,
}

impl FileEntry {
    fn from_walk(root: &Path, path: &Path) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(path);
        Self {
            relative_path: relative.to_path_buf(),
            path: path.to_path_buf(),
        }
    }

    pub fn display(&self) -> std::path::Display<'_> {
        self.relative_path.display()
    }
}

/// Outcome of an eager listing
#[derive(Debug, Default)]
pub struct Listing {
    pub entries: Vec<FileEntry>,
    /// Subtrees skipped in `skip_unreadable` mode
    pub skipped: Vec<MergeError>,
}

impl Listing {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lists every file under a root directory
#[derive(Debug, Clone)]
pub struct DirectoryLister {
    config: ListerConfig,
}

impl DirectoryLister {
    pub fn new(config: ListerConfig) -> Self {
        Self { config }
    }

    /// Lazily walk the tree. The root is checked up front; errors met later are
    /// yielded in place.
    pub fn iter(&self) -> ListingResult<Files> {
        self.config.validate().map_err(MergeError::configuration)?;
        ensure_directory(&self.config.root)?;

        let mut walker = WalkDir::new(&self.config.root)
            .min_depth(1)
            .follow_links(self.config.follow_links);
        if self.config.sort {
            walker = walker.sort_by_file_name();
        }

        Ok(Files {
            root: self.config.root.clone(),
            inner: walker.into_iter(),
        })
    }

    /// Collect the whole listing. Any traversal error aborts the run unless
    /// `skip_unreadable` is set.
    pub fn list(&self) -> ListingResult<Listing> {
        let mut listing = Listing::default();
        for entry in self.iter()? {
            match entry {
                Ok(entry) => listing.entries.push(entry),
                Err(err) if self.config.skip_unreadable => listing.skipped.push(err),
                Err(err) => return Err(err),
            }
        }
        Ok(listing)
    }
}

/// Iterator over the files below a root
pub struct Files {
    root: PathBuf,
    inner: walkdir::IntoIter,
}

impl Iterator for Files {
    type Item = ListingResult<FileEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(err.into())),
            };

            if entry.file_type().is_dir() {
                continue;
            }
            // Unfollowed links to directories are not files.
            if entry.path_is_symlink() && entry.path().is_dir() {
                continue;
            }

            return Some(Ok(FileEntry::from_walk(&self.root, entry.path())));
        }
    }
}

/// List all files under `root` with default options
pub fn list_files(root: impl Into<PathBuf>) -> ListingResult<Vec<FileEntry>> {
    let lister = DirectoryLister::new(ListerConfig::new(root));
    Ok(lister.list()?.entries)
}
