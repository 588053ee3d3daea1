use std::collections::BTreeSet;
use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use magicgen_core::Schema;

use crate::errors::GenerationError;
use crate::model::GenerateOptions;

/// One unit of work: a whole output file, written by a single worker.
#[derive(Debug, Clone)]
pub struct GenerationJob {
    pub index: u64,
    pub schema: Schema,
    pub records: u64,
    pub path: PathBuf,
    pub seed: u64,
}

/// Build the job list for a run, one job per output file.
///
/// Names are drawn from a run-level RNG so random prefixes are reproducible
/// for a fixed seed. Each job gets its own seed derived from the run seed
/// and its file name.
pub fn plan_files(
    schema: &Schema,
    options: &GenerateOptions,
    run_seed: u64,
) -> Result<Vec<GenerationJob>, GenerationError> {
    options.naming.validate()?;

    let mut naming_rng = ChaCha8Rng::seed_from_u64(run_seed);
    let mut seen = BTreeSet::new();
    let mut jobs = Vec::with_capacity(usize::try_from(options.file_count).unwrap_or(0));

    for index in 0..options.file_count {
        let file_name = options.naming.file_name(index, &mut naming_rng);
        if !seen.insert(file_name.clone()) {
            return Err(GenerationError::InvalidOptions(format!(
                "file name '{file_name}' generated twice"
            )));
        }
        jobs.push(GenerationJob {
            index,
            schema: schema.clone(),
            records: options.data_lines,
            path: options.out_dir.join(&file_name),
            seed: hash_seed(run_seed, &file_name),
        });
    }

    Ok(jobs)
}

pub(crate) fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
