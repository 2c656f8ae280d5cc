//! Configuration options for merge runs

use std::path::PathBuf;

/// Indentation used for the merged document unless overridden
pub const DEFAULT_INDENT: u8 = 4;

/// Merge configuration options
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Flat directory holding the per-company `.json` files
    pub input_dir: PathBuf,
    /// Path of the merged document
    pub output_file: PathBuf,
    /// Spaces per indentation level (0-8)
    pub indent_size: u8,
    /// Process candidates in file-name order instead of directory order
    pub sort_by_name: bool,
    /// Write through a temporary file and rename it into place
    pub atomic_write: bool,
    /// Parse and report only; leave the output untouched
    pub validate_only: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_file: PathBuf::from("merged.json"),
            indent_size: DEFAULT_INDENT,
            sort_by_name: true,
            atomic_write: true,
            validate_only: false,
        }
    }
}

impl MergeConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_file: output_file.into(),
            ..Default::default()
        }
    }

    /// Set indentation size
    pub fn with_indent_size(mut self, size: u8) -> Result<Self, String> {
        if size > 8 {
            return Err("Indent size must be 0-8 spaces".to_string());
        }
        self.indent_size = size;
        Ok(self)
    }

    pub fn with_atomic_write(mut self, atomic: bool) -> Self {
        self.atomic_write = atomic;
        self
    }

    pub fn with_validate_only(mut self, validate_only: bool) -> Self {
        self.validate_only = validate_only;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.indent_size > 8 {
            return Err("Indent size must be 0-8 spaces".to_string());
        }

        if self.input_dir.as_os_str().is_empty() {
            return Err("Input directory must not be empty".to_string());
        }

        if self.output_file.file_name().is_none() {
            return Err(format!(
                "Output path must name a file: {}",
                self.output_file.display()
            ));
        }

        Ok(())
    }
}
