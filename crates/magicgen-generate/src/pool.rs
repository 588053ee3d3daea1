//! Fan-out of file jobs over a fixed pool of worker threads.
//!
//! Every job owns its schema copy and output path, so workers share nothing
//! but the read-only clock. Results come back over a channel and are
//! re-ordered by job index.

use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::channel;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use workerpool::Pool;
use workerpool::thunk::{Thunk, ThunkWorker};

use crate::errors::GenerationError;
use crate::generators::Clock;
use crate::model::FileReport;
use crate::output::write_records;
use crate::planner::GenerationJob;
use crate::record::RecordGenerator;

/// Result of one job.
#[derive(Debug)]
pub struct JobOutcome {
    pub index: u64,
    pub path: PathBuf,
    pub result: Result<FileReport, GenerationError>,
}

impl GenerationJob {
    /// Generate and write this job's file start to finish.
    pub fn execute(&self, clock: &dyn Clock) -> Result<FileReport, GenerationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let generator = RecordGenerator::with_clock(&self.schema, clock);
        let stats = write_records(&self.path, &generator, self.records, &mut rng)?;
        debug!(
            path = %self.path.display(),
            records = stats.records,
            bytes_written = stats.bytes_written,
            "file written"
        );
        Ok(FileReport {
            path: self.path.clone(),
            records: stats.records,
            bytes_written: stats.bytes_written,
            unresolved_values: stats.unresolved_values,
        })
    }

    fn run_isolated(self, clock: &dyn Clock) -> JobOutcome {
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.execute(clock)
        }));
        let result = match outcome {
            Ok(result) => result,
            Err(panic) => Err(GenerationError::WorkerPanicked {
                path: self.path.clone(),
                message: panic_message(panic),
            }),
        };
        JobOutcome {
            index: self.index,
            path: self.path,
            result,
        }
    }
}

/// Run every job and return one outcome per job, ordered by job index.
///
/// With `workers <= 1` jobs run in the calling thread. A failing or
/// panicking job never prevents the remaining jobs from running.
pub fn run_jobs(
    jobs: Vec<GenerationJob>,
    workers: usize,
    clock: Arc<dyn Clock>,
) -> Vec<JobOutcome> {
    let mut outcomes: Vec<JobOutcome> = if workers <= 1 {
        jobs.into_iter()
            .map(|job| job.run_isolated(clock.as_ref()))
            .collect()
    } else {
        let pool = Pool::<ThunkWorker<JobOutcome>>::new(workers);
        let (tx, rx) = channel();
        for job in jobs {
            let clock = Arc::clone(&clock);
            pool.execute_to(
                tx.clone(),
                Thunk::of(move || job.run_isolated(clock.as_ref())),
            );
        }
        drop(tx);
        pool.join();
        rx.iter().collect()
    };

    outcomes.sort_by_key(|outcome| outcome.index);
    outcomes
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic during generation".to_string()
    }
}
