//! Filepath: src/core/filename.rs
//! Filename grammar for numbered frame files.
//!
//! A sequence-shaped name splits into four parts,
//! `<prefix><number><suffix>.<extension>`:
//!
//! ```text
//! shot_0042_beauty.exr  ->  "shot_" | "0042" | "_beauty" | "exr"
//! comp.1001.5.dpx       ->  "comp." | "1001.5" | "" | "dpx"
//! ```
//!
//! Numbers are exact decimals so long digit runs and sub-frame values
//! (`001.5`) survive without float rounding. A name that does not fit the
//! grammar yields `None`; that is the common case and not an error.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use camino::Utf8Path;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

/// Anchored grammar: (prefix)(number)(suffix).(extension)
pub const SEQUENCE_PATTERN: &str = r"^(\D+[._])(\d+\.?\d*)([._]?\w*)\.(\w{2,5})$";

static SHARED: LazyLock<FilenameParser> = LazyLock::new(FilenameParser::new);

/// One filename split along the sequence grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedFilename
{
    /// Leading non-digit text, ending in `.` or `_`
    pub prefix: String,

    /// Numeric value of the frame token, leading zeros stripped
    pub number: Decimal,

    /// Frame token exactly as it appeared (drives padding)
    pub number_text: String,

    /// Text between the number and the extension, may be empty
    pub suffix: String,

    /// Extension without the dot
    pub extension: String,
}

impl ParsedFilename
{
    /// Integer digits of the raw frame token.
    fn integer_digits(&self) -> &str
    {
        self.number_text
            .split('.')
            .next()
            .unwrap_or_default()
    }

    /// Count of leading zeros in the integer part of the frame token.
    ///
    /// An all-zero token keeps one significant zero: `"0"` has no padding,
    /// `"000"` has two padding zeros.
    pub fn padding(&self) -> usize
    {
        let digits = self.integer_digits();
        let significant = digits
            .trim_start_matches('0')
            .len()
            .max(1);
        digits
            .len()
            .saturating_sub(significant)
    }

    /// Digits after the point in the raw frame token.
    pub fn fraction_digits(&self) -> u32
    {
        self.number_text
            .split_once('.')
            .map_or(0, |(_, frac)| frac.len() as u32)
    }

    /// Width integer digits are zero-filled to when synthesizing names.
    /// Zero means the token was unpadded and numbers are written as-is.
    pub fn width(&self) -> usize
    {
        if self.padding() > 0 { self.integer_digits().len() } else { 0 }
    }

    /// Render `frame` the way this file's frame token is written: integer
    /// digits zero-filled to [`width`](Self::width), at least as many
    /// fraction digits as the token had.
    pub fn format_number(
        &self,
        frame: Decimal,
    ) -> String
    {
        let mut frame = frame.normalize();
        frame.rescale(
            frame
                .scale()
                .max(self.fraction_digits()),
        );
        let text = frame.to_string();
        let (int, frac) = match text.split_once('.')
        {
            Some((int, frac)) => (int, Some(frac)),
            None => (text.as_str(), None),
        };
        let (sign, digits) = match int.strip_prefix('-')
        {
            Some(rest) => ("-", rest),
            None => ("", int),
        };

        let mut out = format!("{sign}{digits:0>width$}", width = self.width());
        match frac
        {
            Some(frac) =>
            {
                out.push('.');
                out.push_str(frac);
            }
            // `1.` tokens keep their dangling separator
            None if self
                .number_text
                .ends_with('.') =>
            {
                out.push('.')
            }
            None =>
            {}
        }
        out
    }

    /// Filename of `frame` in the same sequence as this file.
    pub fn file_name_for(
        &self,
        frame: Decimal,
    ) -> String
    {
        format!(
            "{}{}{}.{}",
            self.prefix,
            self.format_number(frame),
            self.suffix,
            self.extension
        )
    }

    /// Whether `other` belongs to the same sequence (number ignored).
    pub fn same_signature(
        &self,
        other: &ParsedFilename,
    ) -> bool
    {
        self.prefix == other.prefix
            && self.suffix == other.suffix
            && self.extension == other.extension
    }
}

impl fmt::Display for ParsedFilename
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        write!(
            f,
            "{}{}{}.{}",
            self.prefix, self.number_text, self.suffix, self.extension
        )
    }
}

/// Compiled sequence grammar. Build once and share.
#[derive(Debug, Clone)]
pub struct FilenameParser
{
    regex: Regex,
}

impl Default for FilenameParser
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl FilenameParser
{
    /// Compile the sequence grammar.
    pub fn new() -> Self
    {
        Self {
            regex: Regex::new(SEQUENCE_PATTERN).expect("sequence grammar is a valid regex"),
        }
    }

    /// Process-wide parser, compiled on first use.
    pub fn shared() -> &'static FilenameParser
    {
        &SHARED
    }

    /// Parse the final component of `name`.
    ///
    /// Returns `None` when the name does not fully match the grammar or the
    /// frame token does not fit an exact decimal.
    pub fn parse(
        &self,
        name: &str,
    ) -> Option<ParsedFilename>
    {
        let file_name = Utf8Path::new(name).file_name()?;
        let caps = self
            .regex
            .captures(file_name)?;

        let number_text = caps.get(2)?.as_str();
        let number = parse_number(number_text)?;

        Some(ParsedFilename {
            prefix: caps
                .get(1)?
                .as_str()
                .to_string(),
            number,
            number_text: number_text.to_string(),
            suffix: caps
                .get(3)
                .map(|m| m.as_str())
                .unwrap_or_default()
                .to_string(),
            extension: caps
                .get(4)?
                .as_str()
                .to_string(),
        })
    }

    /// True if `name` could seed a sequence.
    pub fn is_sequence_candidate(
        &self,
        name: &str,
    ) -> bool
    {
        self.parse(name)
            .is_some_and(|p| {
                !p.number_text
                    .is_empty()
            })
    }
}

/// Parse `name` with the shared grammar.
pub fn parse_filename(name: &str) -> Option<ParsedFilename>
{
    FilenameParser::shared().parse(name)
}

/// True if `name` matches the shared grammar with a frame number.
pub fn is_sequence_candidate(name: &str) -> bool
{
    FilenameParser::shared().is_sequence_candidate(name)
}

/// Exact value of a frame token, leading zeros stripped first.
fn parse_number(text: &str) -> Option<Decimal>
{
    let trimmed = text
        .trim_start_matches('0')
        .trim_end_matches('.');
    if trimmed.is_empty() || trimmed.starts_with('.')
    {
        Decimal::from_str(&format!("0{trimmed}")).ok()
    }
    else
    {
        Decimal::from_str(trimmed).ok()
    }
}
