//! **framescan** - Group numbered frame files into sequences and find the gaps
//!
//! Media pipelines store a shot as thousands of files like `render_0001.exr`.
//! This crate splits such names into prefix/number/suffix/extension, groups a
//! directory's files into [`Sequence`]s, and reports which frames are missing.
//!
//! ```no_run
//! use framescan::{ExtensionFilter, find_sequences};
//!
//! let filter = ExtensionFilter::from("exr");
//! for seq in find_sequences("/shots/sh010", Some(&filter))?.unwrap_or_default() {
//!     if let Some(missing) = seq.missing_frames()? {
//!         println!("{seq}: {} missing", missing.len());
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Command-line interface with clap integration
pub mod cli;

/// CLI command handlers
pub mod cli_ext {
    /// scan / missing / parse subcommands
    pub mod scan_cmd;
}

/// Shell completion generation
pub mod completion;

/// Core sequence logic - grammar, aggregate, scanner
pub mod core {
    /// Filename grammar (prefix, frame number, suffix, extension)
    pub mod filename;
    pub use filename::{FilenameParser, ParsedFilename, is_sequence_candidate, parse_filename};

    /// Sorted sequence aggregate with missing-frame detection
    pub mod sequence;
    pub use sequence::{Sequence, SequenceEntry, SequenceError, SequenceReport};

    /// Single-pass directory bucketing into sequences
    pub mod scanner;
    pub use scanner::{ExtensionFilter, ScanError, SequenceScanner, find_sequences};
}

/// Infrastructure - Configuration, directory listing, and utilities
pub mod infra {
    /// Configuration management with TOML support
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Directory listing capability and its on-disk implementation
    pub mod lister;
    pub use lister::{DirectoryLister, FsLister};

    /// Utility functions and helpers for common operations
    pub mod utils;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use cli_ext::scan_cmd::{run_missing as missing_run, run_parse as parse_run, run_scan as scan_run};
pub use infra::{Config, DirectoryLister, FsLister, load_config};

// Core types for external consumers
pub use crate::core::{
    ExtensionFilter, FilenameParser, ParsedFilename, ScanError, Sequence, SequenceEntry, SequenceError,
    SequenceReport, SequenceScanner, find_sequences, is_sequence_candidate, parse_filename,
};
