use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use rand::Rng;
use tracing::{info, warn};

use magicgen_core::Schema;

use crate::errors::GenerationError;
use crate::generators::{Clock, SystemClock};
use crate::model::{FileFailure, GenerateOptions, GenerationReport};
use crate::planner::plan_files;
use crate::pool::run_jobs;

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub out_dir: PathBuf,
    pub report: GenerationReport,
}

/// Entry point for writing generated files from a validated schema.
#[derive(Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for GenerationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationEngine")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self {
            options,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Generate every file. All files are attempted even when some fail; the
    /// run then returns [`GenerationError::Failed`] carrying the full report.
    pub fn run(&self, schema: &Schema) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let out_dir = self.options.out_dir.clone();
        let seed = self
            .options
            .seed
            .unwrap_or_else(|| rand::rng().random::<u64>());

        let jobs = plan_files(schema, &self.options, seed)?;
        std::fs::create_dir_all(&out_dir)?;

        let workers = self.options.worker_count();
        info!(
            run_id = %run_id,
            files = self.options.file_count,
            records_per_file = self.options.data_lines,
            fields = schema.len(),
            workers,
            seed,
            out_dir = %out_dir.display(),
            "generation started"
        );

        let mut report = GenerationReport::new(
            run_id.clone(),
            out_dir.clone(),
            seed,
            self.options.file_count,
        );
        for outcome in run_jobs(jobs, workers, Arc::clone(&self.clock)) {
            match outcome.result {
                Ok(file) => report.record_file(file),
                Err(err) => {
                    warn!(
                        path = %outcome.path.display(),
                        error = %err,
                        "file generation failed"
                    );
                    report.record_failure(FileFailure {
                        path: outcome.path,
                        message: err.to_string(),
                    });
                }
            }
        }
        report.duration_ms = start.elapsed().as_millis() as u64;

        if !report.is_success() {
            warn!(
                run_id = %run_id,
                failed = report.failures.len(),
                succeeded = report.files.len(),
                "generation failed"
            );
            return Err(GenerationError::Failed(report));
        }

        if report.unresolved_values > 0 {
            warn!(
                run_id = %run_id,
                unresolved_values = report.unresolved_values,
                "some values were written as null"
            );
        }
        info!(
            run_id = %run_id,
            files = report.files.len(),
            records = report.records_total,
            bytes_written = report.bytes_written,
            duration_ms = report.duration_ms,
            out_dir = %out_dir.display(),
            "generation completed"
        );
        Ok(GenerationResult { out_dir, report })
    }
}
