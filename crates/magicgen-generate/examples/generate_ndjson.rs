use std::env;
use std::path::PathBuf;

use magicgen_core::load_and_validate;
use magicgen_generate::{FileNaming, FilePrefix, GenerateOptions, GenerationEngine};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut schema: Option<String> = None;
    let mut out_dir: Option<PathBuf> = None;
    let mut files: u64 = 1;
    let mut lines: u64 = 10;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => out_dir = args.next().map(PathBuf::from),
            "--files" => files = args.next().ok_or("missing --files value")?.parse()?,
            "--lines" => lines = args.next().ok_or("missing --lines value")?.parse()?,
            _ => {
                if schema.is_none() {
                    schema = Some(arg);
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let schema = schema.ok_or("missing schema (inline JSON or path)")?;
    let schema = load_and_validate(&schema)?;

    let mut options = GenerateOptions {
        file_count: files,
        data_lines: lines,
        naming: FileNaming::new("sample", FilePrefix::Count),
        ..GenerateOptions::default()
    };
    if let Some(out_dir) = out_dir {
        options.out_dir = out_dir;
    }

    let result = GenerationEngine::new(options).run(&schema)?;
    println!(
        "wrote {} files to {}",
        result.report.files.len(),
        result.out_dir.display()
    );
    Ok(())
}
