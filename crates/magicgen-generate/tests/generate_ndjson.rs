use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use magicgen_core::{Field, FieldSpec, Schema, load_and_validate};
use magicgen_generate::{
    FileNaming, FilePrefix, FixedClock, GenerateOptions, GenerationEngine, GenerationError,
};

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("magicgen_generate_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}

fn options(out_dir: &Path, file_count: u64, data_lines: u64) -> GenerateOptions {
    GenerateOptions {
        out_dir: out_dir.to_path_buf(),
        file_count,
        data_lines,
        naming: FileNaming::new("test", FilePrefix::None),
        parallelism: 1,
        seed: Some(2024),
    }
}

fn file_names(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .expect("read out dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn generates_requested_files_and_lines() {
    let schema = load_and_validate(r#"{"name":"str:rand","age":"int:rand(1,90)"}"#).unwrap();
    let out_dir = temp_out_dir("end_to_end");

    let result = GenerationEngine::new(options(&out_dir, 2, 5))
        .run(&schema)
        .expect("run generation");

    assert_eq!(
        file_names(&out_dir),
        BTreeSet::from(["test0.json".to_string(), "test1.json".to_string()])
    );
    assert_eq!(result.report.files.len(), 2);
    assert_eq!(result.report.records_total, 10);

    for file in &result.report.files {
        let contents = fs::read_to_string(&file.path).expect("read output");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 5);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).expect("json line");
            let object = value.as_object().expect("json object");
            let keys: Vec<&str> = object.keys().map(String::as_str).collect();
            assert_eq!(keys, vec!["name", "age"]);
            let age = object["age"].as_i64().expect("integer age");
            assert!((1..=90).contains(&age));
            assert_eq!(object["name"].as_str().map(str::len), Some(36));
        }
        assert_eq!(file.bytes_written, contents.len() as u64);
    }
}

#[test]
fn schema_file_source_generates_files() {
    let out_dir = temp_out_dir("schema_file");
    let schema_path = out_dir.join("schema.json");
    fs::write(&schema_path, r#"{"name": "str:rand", "age": "int:rand"}"#).unwrap();
    let schema = load_and_validate(schema_path.to_str().unwrap()).unwrap();

    GenerationEngine::new(options(&out_dir, 2, 5))
        .run(&schema)
        .expect("run generation");

    assert!(out_dir.join("test0.json").exists());
    assert!(out_dir.join("test1.json").exists());
}

#[test]
fn rerun_with_count_prefix_overwrites_the_same_files() {
    let schema = load_and_validate(r#"{"id":"str:rand"}"#).unwrap();
    let out_dir = temp_out_dir("overwrite");
    let mut opts = options(&out_dir, 3, 2);
    opts.naming = FileNaming::new("data", FilePrefix::Count);
    opts.seed = None;

    let engine = GenerationEngine::new(opts);
    engine.run(&schema).expect("first run");
    engine.run(&schema).expect("second run");

    assert_eq!(
        file_names(&out_dir),
        BTreeSet::from([
            "data_0.json".to_string(),
            "data_1.json".to_string(),
            "data_2.json".to_string(),
        ])
    );
}

#[test]
fn creates_missing_output_directory() {
    let schema = load_and_validate(r#"{"level":"int:[1, 2]"}"#).unwrap();
    let out_dir = temp_out_dir("nested").join("a").join("b");

    GenerationEngine::new(options(&out_dir, 1, 1))
        .run(&schema)
        .expect("run generation");

    assert!(out_dir.join("test0.json").exists());
}

#[test]
fn fixed_seed_output_does_not_depend_on_parallelism() {
    let schema = load_and_validate(
        r#"{"date":"timestamp:","id":"str:rand","kind":"str:['a','b']","n":"int:rand"}"#,
    )
    .unwrap();
    let sequential_dir = temp_out_dir("seed_seq");
    let parallel_dir = temp_out_dir("seed_par");
    let clock = Arc::new(FixedClock(1_700_000_000.0));

    GenerationEngine::new(options(&sequential_dir, 4, 20))
        .with_clock(clock.clone())
        .run(&schema)
        .expect("sequential run");

    let mut parallel = options(&parallel_dir, 4, 20);
    parallel.parallelism = 3;
    GenerationEngine::new(parallel)
        .with_clock(clock)
        .run(&schema)
        .expect("parallel run");

    for index in 0..4 {
        let name = format!("test{index}.json");
        assert_eq!(
            fs::read_to_string(sequential_dir.join(&name)).unwrap(),
            fs::read_to_string(parallel_dir.join(&name)).unwrap()
        );
    }
}

#[test]
fn parallel_run_writes_every_file() {
    let schema = load_and_validate(r#"{"id":"str:rand","n":"int:rand(0, 3)"}"#).unwrap();
    let out_dir = temp_out_dir("parallel");
    let mut opts = options(&out_dir, 8, 50);
    opts.parallelism = 0;
    opts.naming = FileNaming::new("part", FilePrefix::Uuid);

    let result = GenerationEngine::new(opts).run(&schema).expect("run");

    assert_eq!(result.report.files.len(), 8);
    assert_eq!(file_names(&out_dir).len(), 8);
    for file in &result.report.files {
        let contents = fs::read_to_string(&file.path).unwrap();
        assert_eq!(contents.lines().count(), 50);
    }
}

#[test]
fn failed_file_is_reported_and_others_survive() {
    let schema = Schema::from_fields([
        Field::new("ok", FieldSpec::IntChoice(vec![1])),
        Field::new("bad", FieldSpec::IntRange { min: 9, max: 1 }),
    ]);
    let out_dir = temp_out_dir("failed");

    let err = GenerationEngine::new(options(&out_dir, 2, 3))
        .run(&schema)
        .unwrap_err();

    let GenerationError::Failed(report) = err else {
        panic!("expected aggregated failure");
    };
    assert_eq!(report.files_requested, 2);
    assert_eq!(report.failures.len(), 2);
    assert!(report.failures[0].message.contains("'bad'"));
}

#[test]
fn invalid_base_name_fails_before_writing() {
    let schema = load_and_validate(r#"{"id":"str:rand"}"#).unwrap();
    let out_dir = temp_out_dir("bad_name");
    let mut opts = options(&out_dir, 1, 1);
    opts.naming = FileNaming::new("../escape", FilePrefix::None);

    let err = GenerationEngine::new(opts).run(&schema).unwrap_err();

    assert!(matches!(err, GenerationError::InvalidOptions(_)));
    assert!(file_names(&out_dir).is_empty());
}
