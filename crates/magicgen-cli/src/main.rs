mod config;
mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use magicgen_core::{Schema, SchemaError, load_and_validate};
use magicgen_generate::{
    FileNaming, FilePrefix, GenerateOptions, GenerationEngine, GenerationError, clear_directory,
};
use thiserror::Error;
use tracing::{error, info, warn};

use config::{Overrides, Settings, load_config};
use logging::{LogFormat, init_logging};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "magicgen", version, about = "Generate newline-delimited JSON test data")]
struct Cli {
    /// TOML file with default option values.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Format of log lines written to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
    /// Also append JSON log lines to this file.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate data files from a schema.
    Generate(GenerateArgs),
    /// Check a schema without generating anything.
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Directory where files are written.
    #[arg(value_name = "PATH_TO_SAVE_FILES")]
    path: PathBuf,
    /// Schema as a raw JSON object or a path to a JSON file.
    #[arg(long, alias = "data_schema", value_name = "JSON|PATH")]
    data_schema: Option<String>,
    /// Number of files to generate.
    #[arg(long, alias = "file_count")]
    file_count: Option<u64>,
    /// Base name of the generated files.
    #[arg(long, alias = "file_name")]
    file_name: Option<String>,
    /// Naming strategy: count, random or uuid.
    #[arg(long)]
    prefix: Option<FilePrefix>,
    /// Number of records per file.
    #[arg(long, alias = "data_lines")]
    data_lines: Option<u64>,
    /// Remove matching files from the destination before generating.
    #[arg(long, alias = "clear_path", default_value_t = false)]
    clear_path: bool,
    /// Worker count; 0 uses every available CPU.
    #[arg(long)]
    multiprocessing: Option<usize>,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Schema as a raw JSON object or a path to a JSON file.
    #[arg(long, alias = "data_schema", value_name = "JSON|PATH")]
    data_schema: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.log_format, cli.log_file.as_deref()) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Command::Generate(args) => run_generate(args, cli.config.as_deref()),
        Command::Validate(args) => run_validate(args, cli.config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "magicgen failed");
            ExitCode::FAILURE
        }
    }
}

fn run_generate(args: GenerateArgs, config_path: Option<&Path>) -> Result<(), CliError> {
    let started = Instant::now();
    let defaults = load_config(config_path)?;
    let settings = Settings::resolve(
        Overrides {
            file_count: args.file_count,
            file_name: args.file_name,
            prefix: args.prefix,
            data_lines: args.data_lines,
            multiprocessing: args.multiprocessing,
            seed: args.seed,
            schema: args.data_schema,
        },
        defaults,
    );

    let schema = load_schema(settings.schema.as_deref())?;
    info!(fields = schema.len(), "schema validated");

    let naming = FileNaming::new(settings.file_name, settings.prefix);
    naming.validate()?;

    if args.clear_path {
        let removed = clear_directory(&args.path, Some(&naming.base_name))?;
        info!(dir = %args.path.display(), removed, "destination cleared");
    }

    let options = GenerateOptions {
        out_dir: args.path,
        file_count: settings.file_count,
        data_lines: settings.data_lines,
        naming,
        parallelism: settings.multiprocessing,
        seed: settings.seed,
    };

    let result = match GenerationEngine::new(options).run(&schema) {
        Ok(result) => result,
        Err(GenerationError::Failed(report)) => {
            for failure in &report.failures {
                warn!(path = %failure.path.display(), message = %failure.message, "file failed");
            }
            return Err(GenerationError::Failed(report).into());
        }
        Err(err) => return Err(err.into()),
    };

    let report = &result.report;
    info!(
        run_id = %report.run_id,
        seed = report.seed,
        records = report.records_total,
        bytes = report.bytes_written,
        duration_ms = report.duration_ms,
        "run summary"
    );
    println!(
        "Generated {} files in {}.",
        report.files.len(),
        result.out_dir.display()
    );
    println!("Elapsed time: {:.2} seconds.", started.elapsed().as_secs_f64());
    Ok(())
}

fn run_validate(args: ValidateArgs, config_path: Option<&Path>) -> Result<(), CliError> {
    let defaults = load_config(config_path)?;
    let source = args.data_schema.or(defaults.schema);
    let schema = load_schema(source.as_deref())?;

    println!("Schema is valid ({} fields).", schema.len());
    for field in schema.fields() {
        let kind = field
            .spec
            .field_type()
            .map(|kind| kind.as_str())
            .unwrap_or("unresolved");
        println!("  {}: {} ({})", field.name, kind, field.spec);
    }
    Ok(())
}

fn load_schema(source: Option<&str>) -> Result<Schema, CliError> {
    let source = source.ok_or_else(|| {
        CliError::Config("a schema is required: pass --data-schema or set 'schema'".to_string())
    })?;
    Ok(load_and_validate(source)?)
}
