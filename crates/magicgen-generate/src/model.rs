use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::naming::FileNaming;

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Directory where output files are written.
    pub out_dir: PathBuf,
    /// Number of files to produce.
    pub file_count: u64,
    /// Number of records written to each file.
    pub data_lines: u64,
    /// Base name and prefix strategy for output files.
    pub naming: FileNaming,
    /// Worker count; 1 runs sequentially, 0 uses every available CPU.
    pub parallelism: usize,
    /// Run seed. A random seed is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("out"),
            file_count: 1,
            data_lines: 1000,
            naming: FileNaming::default(),
            parallelism: 1,
            seed: None,
        }
    }
}

impl GenerateOptions {
    /// Effective number of workers for this run.
    pub fn worker_count(&self) -> usize {
        let requested = if self.parallelism == 0 {
            std::thread::available_parallelism()
                .map(|count| count.get())
                .unwrap_or(1)
        } else {
            self.parallelism
        };
        let files = usize::try_from(self.file_count).unwrap_or(usize::MAX);
        requested.min(files).max(1)
    }
}

/// Summary of one written file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub records: u64,
    pub bytes_written: u64,
    /// Values written as null because their field never resolved.
    pub unresolved_values: u64,
}

/// A file that could not be produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub out_dir: PathBuf,
    pub seed: u64,
    pub files_requested: u64,
    pub files: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
    pub records_total: u64,
    pub bytes_written: u64,
    pub unresolved_values: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, out_dir: PathBuf, seed: u64, files_requested: u64) -> Self {
        Self {
            run_id,
            out_dir,
            seed,
            files_requested,
            files: Vec::new(),
            failures: Vec::new(),
            records_total: 0,
            bytes_written: 0,
            unresolved_values: 0,
            duration_ms: 0,
        }
    }

    pub fn record_file(&mut self, file: FileReport) {
        self.records_total += file.records;
        self.bytes_written += file.bytes_written;
        self.unresolved_values += file.unresolved_values;
        self.files.push(file);
    }

    pub fn record_failure(&mut self, failure: FileFailure) {
        self.failures.push(failure);
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
