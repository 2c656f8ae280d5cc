//! Statistics for merge runs

use std::time::Duration;

/// Counters collected over one merge run
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Candidate `.json` files found in the input directory
    pub files_scanned: usize,
    /// Files parsed and inserted into the document
    pub files_merged: usize,
    /// Files skipped because they were not valid JSON or had non-UTF-8 names
    pub files_skipped: usize,
    /// Insertions that overwrote an earlier value under the same key
    pub keys_replaced: usize,
    /// Bytes read from successfully merged inputs
    pub input_size_bytes: u64,
    /// Bytes written to the output file (0 when nothing was written)
    pub output_size_bytes: u64,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Timestamp of when statistics were collected
    pub collected_at: chrono::DateTime<chrono::Utc>,
}

impl Default for MergeStatistics {
    fn default() -> Self {
        Self {
            files_scanned: 0,
            files_merged: 0,
            files_skipped: 0,
            keys_replaced: 0,
            input_size_bytes: 0,
            output_size_bytes: 0,
            processing_time_ms: 0,
            collected_at: chrono::Utc::now(),
        }
    }
}

impl MergeStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_merged(&mut self, input_bytes: u64, replaced: bool) {
        self.files_merged += 1;
        self.input_size_bytes += input_bytes;
        if replaced {
            self.keys_replaced += 1;
        }
    }

    pub fn record_skipped(&mut self) {
        self.files_skipped += 1;
    }

    /// Stamp the elapsed time and collection time
    pub fn finish(&mut self, elapsed: Duration) {
        self.processing_time_ms = elapsed.as_millis() as u64;
        self.collected_at = chrono::Utc::now();
    }

    /// Throughput over merged inputs, in bytes per second
    pub fn throughput_bytes_per_sec(&self) -> f32 {
        if self.processing_time_ms > 0 {
            self.input_size_bytes as f32 / (self.processing_time_ms as f32 / 1000.0)
        } else {
            0.0
        }
    }

    /// Get a formatted summary
    pub fn summary(&self) -> String {
        format!(
            "Merged {} of {} files ({} skipped) in {:.1}s",
            self.files_merged,
            self.files_scanned,
            self.files_skipped,
            self.processing_time_ms as f32 / 1000.0
        )
    }
}
