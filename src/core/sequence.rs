//! Filepath: src/core/sequence.rs
//! A numbered file sequence: entries sharing one prefix/suffix/extension
//! signature, kept sorted by frame number.
//!
//! The signature, padding and directory come from the first file a sequence
//! is seeded with and never change afterwards. Later files are not checked
//! against the signature here; callers use [`Sequence::matches`] first.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use camino::Utf8Path;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::core::filename::{FilenameParser, ParsedFilename};
use crate::infra::utils::PathUtils;

/// Errors from frame-range queries.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum SequenceError
{
    /// Step must move forward
    #[error("frame step must be positive, got {0}")]
    NonPositiveStep(Decimal),

    /// No entries to default start/end from
    #[error("sequence is empty and no explicit start and end frame was given")]
    Unbounded,
}

/// One file of a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceEntry
{
    pub path: String,
    pub number: Decimal,
}

impl SequenceEntry
{
    /// Parse `path`; names outside the grammar sit at frame 0.
    fn new(path: String) -> Self
    {
        let number = FilenameParser::shared()
            .parse(&path)
            .map(|p| p.number)
            .unwrap_or_else(|| {
                trace!(%path, "entry does not parse, using frame 0");
                Decimal::ZERO
            });
        Self { path, number }
    }
}

impl AsRef<str> for SequenceEntry
{
    fn as_ref(&self) -> &str
    {
        &self.path
    }
}

/// Files sharing a prefix/suffix/extension, ordered by frame number.
#[derive(Debug, Clone, Default)]
pub struct Sequence
{
    /// Sorted ascending by number; equal numbers keep insertion order
    entries: Vec<SequenceEntry>,

    /// Membership index over `entries`
    paths: HashSet<String>,

    /// First seeding file; source of signature and padding
    template: ParsedFilename,

    /// Folder of the first seeding file, forward slashes
    directory: String,
}

impl Sequence
{
    /// Empty sequence with a blank signature.
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Seed a sequence from `files`. The first path defines the signature,
    /// padding and directory; every path becomes an entry.
    pub fn from_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seq = Self::new();
        let mut files = files.into_iter();

        if let Some(first) = files.next()
        {
            let first: String = first.into();
            seq.template = FilenameParser::shared()
                .parse(&first)
                .unwrap_or_default();
            seq.directory = Utf8Path::new(&first)
                .parent()
                .map(|dir| PathUtils::normalize_slashes(dir.as_str()))
                .unwrap_or_default();
            seq.append(first);
        }

        for f in files
        {
            seq.append(f);
        }
        seq
    }

    pub fn prefix(&self) -> &str
    {
        &self.template.prefix
    }

    pub fn suffix(&self) -> &str
    {
        &self.template.suffix
    }

    pub fn extension(&self) -> &str
    {
        &self.template.extension
    }

    /// Leading zeros of the first file's frame token.
    pub fn padding(&self) -> usize
    {
        self.template.padding()
    }

    /// Digit width synthesized frame numbers are zero-filled to.
    pub fn width(&self) -> usize
    {
        self.template.width()
    }

    pub fn directory(&self) -> &str
    {
        &self.directory
    }

    pub fn entries(&self) -> &[SequenceEntry]
    {
        &self.entries
    }

    pub fn len(&self) -> usize
    {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.entries.is_empty()
    }

    pub fn first_frame(&self) -> Option<Decimal>
    {
        self.entries
            .first()
            .map(|e| e.number)
    }

    pub fn last_frame(&self) -> Option<Decimal>
    {
        self.entries
            .last()
            .map(|e| e.number)
    }

    /// Add a file. Appending a path already present does nothing.
    pub fn append(
        &mut self,
        path: impl Into<String>,
    )
    {
        let path = path.into();
        if self
            .paths
            .contains(&path)
        {
            return;
        }

        let entry = SequenceEntry::new(path);
        // after every equal number, so ties stay in insertion order
        let at = self
            .entries
            .partition_point(|e| e.number <= entry.number);

        self.paths
            .insert(entry.path.clone());
        self.entries
            .insert(at, entry);
    }

    /// Drop the entry with this path (a path string or an entry).
    /// Returns whether anything was removed.
    pub fn remove(
        &mut self,
        path: impl AsRef<str>,
    ) -> bool
    {
        let path = path.as_ref();
        if !self
            .paths
            .remove(path)
        {
            return false;
        }

        if let Some(idx) = self
            .entries
            .iter()
            .position(|e| e.path == path)
        {
            self.entries
                .remove(idx);
        }
        true
    }

    /// Entry paths in frame order, or `None` for an empty sequence.
    pub fn files(&self) -> Option<Vec<&str>>
    {
        if self.is_empty()
        {
            return None;
        }
        Some(
            self.entries
                .iter()
                .map(|e| e.path.as_str())
                .collect(),
        )
    }

    /// True if `filename` has this sequence's prefix, suffix and extension.
    pub fn matches(
        &self,
        filename: &str,
    ) -> bool
    {
        FilenameParser::shared()
            .parse(filename)
            .is_some_and(|p| self.matches_parsed(&p))
    }

    /// [`matches`](Self::matches) for an already parsed name.
    pub fn matches_parsed(
        &self,
        parsed: &ParsedFilename,
    ) -> bool
    {
        self.template
            .same_signature(parsed)
    }

    /// Full path a given frame of this sequence would have.
    pub fn path_for(
        &self,
        frame: Decimal,
    ) -> String
    {
        PathUtils::join(&self.directory, &self.template.file_name_for(frame))
    }

    /// Paths of frames absent from `start..=end` walked by `step`.
    ///
    /// `start` and `end` default to the lowest and highest frame present.
    /// `end` is always a candidate, also when no step lands on it. Each
    /// entry satisfies at most one candidate frame. Returns `Ok(None)` when
    /// nothing is missing. Only the in-memory entries are consulted.
    #[instrument(level = "debug", skip(self), fields(sequence = %self))]
    pub fn find_missing_frames(
        &self,
        step: Decimal,
        start: Option<Decimal>,
        end: Option<Decimal>,
    ) -> Result<Option<Vec<String>>, SequenceError>
    {
        if step <= Decimal::ZERO
        {
            return Err(SequenceError::NonPositiveStep(step));
        }

        let start = start
            .or_else(|| self.first_frame())
            .ok_or(SequenceError::Unbounded)?;
        let end = end
            .or_else(|| self.last_frame())
            .ok_or(SequenceError::Unbounded)?;

        // frame -> entries still unclaimed at that frame
        let mut available: BTreeMap<Decimal, usize> = BTreeMap::new();
        for e in &self.entries
        {
            *available
                .entry(e.number)
                .or_default() += 1;
        }

        let mut missing = Vec::new();
        let mut claim = |frame: Decimal| match available.get_mut(&frame)
        {
            Some(left) if *left > 0 => *left -= 1,
            _ => missing.push(self.path_for(frame)),
        };

        let mut frame = start;
        while frame <= end
        {
            claim(frame);

            // `end` is always a candidate, even off the step grid
            match end.checked_sub(frame)
            {
                Some(gap) if gap < step =>
                {
                    if gap > Decimal::ZERO
                    {
                        claim(end);
                    }
                    break;
                }
                // frame + step <= end here, so this cannot overflow
                _ => frame += step,
            }
        }

        debug!(missing = missing.len(), %start, %end, %step, "checked frame range");

        if missing.is_empty() { Ok(None) } else { Ok(Some(missing)) }
    }

    /// [`find_missing_frames`](Self::find_missing_frames) over the present
    /// range with a step of one.
    pub fn missing_frames(&self) -> Result<Option<Vec<String>>, SequenceError>
    {
        self.find_missing_frames(Decimal::ONE, None, None)
    }

    /// Name pattern with the frame token as `#` marks, e.g. `shot_###.exr`.
    pub fn pattern(&self) -> String
    {
        format!(
            "{}{}{}.{}",
            self.prefix(),
            "#".repeat(
                self.width()
                    .max(1)
            ),
            self.suffix(),
            self.extension()
        )
    }

    /// Serializable snapshot of this sequence and its gaps at `step`.
    pub fn report(
        &self,
        step: Decimal,
    ) -> Result<SequenceReport, SequenceError>
    {
        let missing = if self.is_empty()
        {
            Vec::new()
        }
        else
        {
            self.find_missing_frames(step, None, None)?
                .unwrap_or_default()
        };

        Ok(SequenceReport {
            pattern: PathUtils::join(&self.directory, &self.pattern()),
            prefix: self.prefix().to_string(),
            suffix: self.suffix().to_string(),
            extension: self.extension().to_string(),
            padding: self.padding(),
            first: self.first_frame(),
            last: self.last_frame(),
            count: self.len(),
            files: self
                .entries
                .iter()
                .map(|e| e.path.clone())
                .collect(),
            missing,
        })
    }
}

impl From<&str> for Sequence
{
    fn from(path: &str) -> Self
    {
        Self::from_files([path])
    }
}

impl<S: Into<String>> FromIterator<S> for Sequence
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self
    {
        Self::from_files(iter)
    }
}

impl fmt::Display for Sequence
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        write!(f, "{}", PathUtils::join(&self.directory, &self.pattern()))?;
        if let (Some(first), Some(last)) = (self.first_frame(), self.last_frame())
        {
            write!(f, " [{first}-{last}]")?;
        }
        Ok(())
    }
}

/// What a scan reports per sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceReport
{
    pub pattern: String,
    pub prefix: String,
    pub suffix: String,
    pub extension: String,
    pub padding: usize,
    pub first: Option<Decimal>,
    pub last: Option<Decimal>,
    pub count: usize,
    pub files: Vec<String>,
    pub missing: Vec<String>,
}
