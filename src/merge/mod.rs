//! Merging a flat directory of per-company JSON files into one document
//!
//! Every `*.json` file at the top level of the input directory is parsed as an
//! untyped JSON value and stored under its company key (the file name minus one
//! trailing `.json`). Files that are not valid JSON, or whose names are not
//! valid UTF-8, are skipped and reported; they never abort the run. Failing to
//! list the input directory, read a candidate or write the output is fatal.

pub mod config;
pub mod stats;
pub mod writer;

pub use config::MergeConfig;
pub use stats::MergeStatistics;

use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{MergeError, MergeResult, ParseError};
use crate::parser::directory::find_json_files;
use crate::parser::filter::company_key;
use crate::parser::{parse_from_string, read_source};

/// One company key and its parsed content
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRecord {
    pub key: String,
    pub value: Value,
}

impl CompanyRecord {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Company key to content mapping, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MergedDocument {
    records: Map<String, Value>,
}

impl MergedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the value it replaced
    pub fn insert(&mut self, record: CompanyRecord) -> Option<Value> {
        self.records.insert(record.key, record.value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.records.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.records)
    }

    /// Render with `indent` spaces per level
    pub fn to_pretty_string(&self, indent: u8) -> MergeResult<String> {
        writer::to_pretty_string(self, indent)
    }
}

/// An input file left out of the document
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub file_name: String,
    pub path: PathBuf,
    pub error: ParseError,
}

/// Progress notifications emitted while merging
#[derive(Debug)]
pub enum MergeEvent<'a> {
    /// Candidate files have been enumerated
    Discovered { total: usize },
    Merged {
        key: &'a str,
        file_name: &'a str,
        replaced: bool,
    },
    Skipped(&'a SkippedFile),
    Written { path: &'a Path, bytes: u64 },
}

/// Outcome of a merge run
#[derive(Debug)]
pub struct MergeReport {
    pub document: MergedDocument,
    pub skipped: Vec<SkippedFile>,
    /// Where the document was written; `None` for validate-only runs
    pub output_file: Option<PathBuf>,
    pub statistics: MergeStatistics,
}

/// Merges the `.json` files of one directory into a single document
#[derive(Debug, Clone)]
pub struct JsonMerger {
    config: MergeConfig,
}

impl JsonMerger {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    pub fn merge(&self) -> MergeResult<MergeReport> {
        self.merge_with(|_| {})
    }

    /// Run the merge, reporting each step to `on_event`
    pub fn merge_with<F>(&self, mut on_event: F) -> MergeResult<MergeReport>
    where
        F: FnMut(MergeEvent<'_>),
    {
        self.config.validate().map_err(MergeError::configuration)?;

        let start = Instant::now();
        let mut statistics = MergeStatistics::new();
        let candidates = self.candidates()?;
        statistics.files_scanned = candidates.len();
        on_event(MergeEvent::Discovered {
            total: candidates.len(),
        });

        let mut document = MergedDocument::new();
        let mut skipped = Vec::new();

        for path in candidates {
            let Some(raw_name) = path.file_name() else {
                continue;
            };
            // Lossy names could collide on U+FFFD and overwrite each other.
            let Some(file_name) = raw_name.to_str().map(str::to_string) else {
                let file_name = raw_name.to_string_lossy().into_owned();
                let skip = SkippedFile {
                    error: ParseError::new("file name is not valid UTF-8".to_string(), None)
                        .with_file(&file_name),
                    file_name,
                    path,
                };
                statistics.record_skipped();
                on_event(MergeEvent::Skipped(&skip));
                skipped.push(skip);
                continue;
            };
            let Some(key) = company_key(&file_name) else {
                continue;
            };

            let content = read_source(&path)?;
            match parse_from_string(&content) {
                Ok(value) => {
                    let replaced = document.insert(CompanyRecord::new(key, value)).is_some();
                    statistics.record_merged(content.len() as u64, replaced);
                    on_event(MergeEvent::Merged {
                        key,
                        file_name: &file_name,
                        replaced,
                    });
                }
                Err(error) => {
                    let skip = SkippedFile {
                        error: error.with_file(&file_name),
                        file_name,
                        path,
                    };
                    statistics.record_skipped();
                    on_event(MergeEvent::Skipped(&skip));
                    skipped.push(skip);
                }
            }
        }

        let output_file = if self.config.validate_only {
            None
        } else {
            let rendered = document.to_pretty_string(self.config.indent_size)?;
            let bytes =
                writer::write_output(&self.config.output_file, &rendered, self.config.atomic_write)?;
            statistics.output_size_bytes = bytes;
            on_event(MergeEvent::Written {
                path: &self.config.output_file,
                bytes,
            });
            Some(self.config.output_file.clone())
        };

        statistics.finish(start.elapsed());

        Ok(MergeReport {
            document,
            skipped,
            output_file,
            statistics,
        })
    }

    /// Candidate files, minus the output document when it lives in the input
    /// directory and would otherwise be merged into itself.
    fn candidates(&self) -> MergeResult<Vec<PathBuf>> {
        let files = find_json_files(&self.config.input_dir, self.config.sort_by_name)?;

        let output = match fs::canonicalize(&self.config.output_file) {
            Ok(output) => output,
            Err(_) => return Ok(files),
        };

        Ok(files
            .into_iter()
            .filter(|path| fs::canonicalize(path).map_or(true, |p| p != output))
            .collect())
    }
}

/// Merge `input_dir` into `output_file` with default settings
pub fn merge_directory(
    input_dir: impl Into<PathBuf>,
    output_file: impl Into<PathBuf>,
) -> MergeResult<MergeReport> {
    JsonMerger::new(MergeConfig::new(input_dir, output_file)).merge()
}
