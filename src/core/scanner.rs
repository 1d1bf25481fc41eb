//! Filepath: src/core/scanner.rs
//! Partition one directory's files into sequences.
//!
//! A single forward pass in listing order: each file joins the first
//! existing sequence (in creation order) whose signature it matches, or
//! starts a new sequence if it is sequence-shaped. Nothing is backtracked,
//! so a file never lands in two sequences.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, instrument, trace};

use crate::core::filename::FilenameParser;
use crate::core::sequence::Sequence;
use crate::infra::lister::{DirectoryLister, FsLister};
use crate::infra::utils::PathUtils;

/// Scan failures. Only directory access can fail.
#[derive(Debug, thiserror::Error)]
pub enum ScanError
{
    #[error("cannot list directory {path}")]
    List
    {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Allowed file extensions, stored without leading dots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter
{
    allowed: Vec<String>,
}

impl ExtensionFilter
{
    /// Normalize `extensions`: surrounding dots are stripped, blanks dropped.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut allowed: Vec<String> = Vec::new();
        for ext in extensions
        {
            let ext = ext
                .as_ref()
                .trim_matches('.');
            if !ext.is_empty() && !allowed.iter().any(|a| a == ext)
            {
                allowed.push(ext.to_string());
            }
        }
        Self { allowed }
    }

    /// No extensions means no filtering.
    pub fn is_empty(&self) -> bool
    {
        self.allowed.is_empty()
    }

    pub fn extensions(&self) -> &[String]
    {
        &self.allowed
    }

    /// True if the file name's own extension is allowed.
    pub fn allows(
        &self,
        name: &str,
    ) -> bool
    {
        PathUtils::extension(name).is_some_and(|ext| {
            self.allowed
                .iter()
                .any(|a| a == ext)
        })
    }
}

impl From<&str> for ExtensionFilter
{
    fn from(ext: &str) -> Self
    {
        Self::new([ext])
    }
}

impl From<String> for ExtensionFilter
{
    fn from(ext: String) -> Self
    {
        Self::new([ext])
    }
}

impl From<Vec<String>> for ExtensionFilter
{
    fn from(exts: Vec<String>) -> Self
    {
        Self::new(exts)
    }
}

impl From<&[&str]> for ExtensionFilter
{
    fn from(exts: &[&str]) -> Self
    {
        Self::new(exts)
    }
}

impl<const N: usize> From<[&str; N]> for ExtensionFilter
{
    fn from(exts: [&str; N]) -> Self
    {
        Self::new(exts)
    }
}

/// Groups the files of a directory into [`Sequence`]s.
pub struct SequenceScanner<L>
{
    lister: L,
}

impl<L: DirectoryLister> SequenceScanner<L>
{
    pub fn new(lister: L) -> Self
    {
        Self { lister }
    }

    /// Find every sequence among the files directly inside `path`.
    ///
    /// Returns `Ok(None)` when the directory holds no files, when the
    /// extension filter leaves nothing, or when no file is sequence-shaped.
    /// Sequences come back in order of first appearance; member paths are
    /// `path/name` with forward slashes.
    #[instrument(level = "debug", skip(self))]
    pub fn find_sequences(
        &self,
        path: &Utf8Path,
        extensions: Option<&ExtensionFilter>,
    ) -> Result<Option<Vec<Sequence>>, ScanError>
    {
        let names = self
            .lister
            .list(path)
            .map_err(|source| ScanError::List { path: path.to_owned(), source })?;
        if names.is_empty()
        {
            debug!("directory is empty");
            return Ok(None);
        }

        let mut files: Vec<String> = names
            .into_iter()
            .filter(|name| {
                !self
                    .lister
                    .is_directory(&path.join(name))
            })
            .collect();
        if files.is_empty()
        {
            debug!("directory holds no files");
            return Ok(None);
        }

        if let Some(filter) = extensions.filter(|f| !f.is_empty())
        {
            files.retain(|name| filter.allows(name));
            if files.is_empty()
            {
                debug!(extensions = ?filter.extensions(), "no files with allowed extensions");
                return Ok(None);
            }
        }

        let dir = PathUtils::normalize_slashes(path.as_str());
        let mut sequences: Vec<Sequence> = Vec::new();

        for name in &files
        {
            let Some(parsed) = FilenameParser::shared().parse(name)
            else
            {
                trace!(name, "not sequence-shaped");
                continue;
            };
            let full = PathUtils::join(&dir, name);

            match sequences
                .iter_mut()
                .find(|seq| seq.matches_parsed(&parsed))
            {
                Some(seq) => seq.append(full),
                None if !parsed
                    .number_text
                    .is_empty() =>
                {
                    trace!(name, "starting new sequence");
                    sequences.push(Sequence::from(full.as_str()));
                }
                None =>
                {}
            }
        }

        debug!(files = files.len(), sequences = sequences.len(), "scan complete");

        if sequences.is_empty() { Ok(None) } else { Ok(Some(sequences)) }
    }
}

/// Scan `path` on disk with default listing rules.
pub fn find_sequences(
    path: impl AsRef<Utf8Path>,
    extensions: Option<&ExtensionFilter>,
) -> Result<Option<Vec<Sequence>>, ScanError>
{
    SequenceScanner::new(FsLister::default()).find_sequences(path.as_ref(), extensions)
}
