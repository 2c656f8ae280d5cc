//! Directory listing and per-company JSON merging
//!
//! Two independent utilities: [`listing::DirectoryLister`] walks a tree and
//! reports every file relative to its root, and [`merge::JsonMerger`] folds a
//! flat directory of `*.json` files into one JSON object keyed by file name.

pub mod cli;
pub mod error;
pub mod listing;
pub mod merge;
pub mod parser;

// Re-export commonly used types
pub use error::{ListingResult, MergeError, MergeErrorKind, MergeResult, ParseError};
pub use listing::{list_files, DirectoryLister, FileEntry, ListerConfig, Listing};
pub use merge::{
    merge_directory, CompanyRecord, JsonMerger, MergeConfig, MergeEvent, MergeReport,
    MergeStatistics, MergedDocument, SkippedFile,
};
