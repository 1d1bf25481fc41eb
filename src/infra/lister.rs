//! Filepath: src/infra/lister.rs
//! Single-level directory listing behind a small trait.
//!
//! The scanner only needs two things from a filesystem: the names in one
//! directory and whether a path is a directory. [`FsLister`] provides them
//! from disk using ripgrep's `ignore` walker, with opt-ins:
//! - Extra ignore globs matched against entry names
//! - Hidden file policy (dotfiles included by default)
//! - `.gitignore` / `.ignore` processing (off by default)
//!
//! Names come back in the order the OS enumerates them; nothing is sorted.

use std::io;

use camino::Utf8Path;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use tracing::{trace, warn};

/// Directory access the scanner depends on.
pub trait DirectoryLister
{
    /// Names (not paths) of the entries directly inside `path`.
    /// Fails if `path` cannot be read.
    fn list(
        &self,
        path: &Utf8Path,
    ) -> io::Result<Vec<String>>;

    /// True if `path` is a directory.
    fn is_directory(
        &self,
        path: &Utf8Path,
    ) -> bool;
}

impl<L: DirectoryLister + ?Sized> DirectoryLister for &L
{
    fn list(
        &self,
        path: &Utf8Path,
    ) -> io::Result<Vec<String>>
    {
        (**self).list(path)
    }

    fn is_directory(
        &self,
        path: &Utf8Path,
    ) -> bool
    {
        (**self).is_directory(path)
    }
}

/// Lists real directories on disk.
pub struct FsLister
{
    /// Compiled set of additional ignore patterns, matched on names
    ignore_patterns: GlobSet,

    /// Include hidden (dot) files; default true
    include_hidden: bool,

    /// Honor .gitignore/.ignore files; default false
    respect_ignore_files: bool,
}

impl Default for FsLister
{
    fn default() -> Self
    {
        Self {
            ignore_patterns: GlobSet::empty(),
            include_hidden: true,
            respect_ignore_files: false,
        }
    }
}

impl FsLister
{
    /// Build a lister that skips names matching any of
    /// `additional_ignores` (e.g. "*.tmp", "Thumbs.db").
    pub fn new(additional_ignores: &[String]) -> Result<Self, globset::Error>
    {
        let mut builder = GlobSetBuilder::new();

        for pattern in additional_ignores
        {
            builder.add(Glob::new(pattern)?);
        }

        Ok(Self {
            ignore_patterns: builder.build()?,
            ..Self::default()
        })
    }

    /// (Optional) Include or exclude hidden files (dotfiles).
    pub fn with_include_hidden(
        mut self,
        include_hidden: bool,
    ) -> Self
    {
        self.include_hidden = include_hidden;
        self
    }

    /// (Optional) Apply .gitignore, .ignore and global git excludes.
    pub fn with_respect_ignore_files(
        mut self,
        respect: bool,
    ) -> Self
    {
        self.respect_ignore_files = respect;
        self
    }

    /// Internal: construct a configured one-level WalkBuilder for `root`.
    fn build_walk(
        &self,
        root: &Utf8Path,
    ) -> WalkBuilder
    {
        let mut b = WalkBuilder::new(root);

        // All ignore-file handling on or off together
        b.standard_filters(self.respect_ignore_files);

        // WalkBuilder::hidden(true) => *skip* dotfiles
        b.hidden(!self.include_hidden);

        // Root is depth 0, its entries depth 1
        b.max_depth(Some(1));
        b.follow_links(false);

        b
    }
}

impl DirectoryLister for FsLister
{
    fn list(
        &self,
        root: &Utf8Path,
    ) -> io::Result<Vec<String>>
    {
        // Missing or unreadable roots fail here with the OS error intact
        std::fs::read_dir(root)?;

        let mut out = Vec::new();
        for res in self
            .build_walk(root)
            .build()
        {
            let entry = res.map_err(|err| {
                err.into_io_error()
                    .unwrap_or_else(|| io::Error::other("directory walk failed"))
            })?;

            if entry.depth() == 0
            {
                continue;
            }

            let Some(name) = entry
                .file_name()
                .to_str()
            else
            {
                warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
                continue;
            };

            if self
                .ignore_patterns
                .is_match(name)
            {
                trace!(name, "ignored by pattern");
                continue;
            }

            out.push(name.to_string());
        }

        Ok(out)
    }

    fn is_directory(
        &self,
        path: &Utf8Path,
    ) -> bool
    {
        path.is_dir()
    }
}
