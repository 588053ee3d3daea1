use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::RngCore;

use crate::errors::GenerationError;
use crate::record::RecordGenerator;

/// Counters for a written file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub records: u64,
    pub bytes_written: u64,
    pub unresolved_values: u64,
}

/// Write `count` records as newline-delimited JSON, one object per line.
///
/// Records are serialized as soon as they are generated and never buffered
/// beyond the writer. Line order is generation order.
pub fn write_records(
    path: &Path,
    generator: &RecordGenerator<'_>,
    count: u64,
    rng: &mut dyn RngCore,
) -> Result<WriteStats, GenerationError> {
    let file = File::create(path)?;
    let mut writer = CountingWriter::new(BufWriter::new(file));
    let mut stats = WriteStats::default();

    for _ in 0..count {
        let record = generator.generate(rng)?;
        serde_json::to_writer(&mut writer, &record)?;
        writer.write_all(b"\n")?;
        stats.records += 1;
        stats.unresolved_values += record.null_count() as u64;
    }

    writer.flush()?;
    stats.bytes_written = writer.bytes_written();
    Ok(stats)
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use magicgen_core::{Field, FieldSpec, Schema};

    use super::*;
    use crate::generators::FixedClock;

    fn temp_path(label: &str) -> std::path::PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("magicgen_ndjson_{label}_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir.join("out.json")
    }

    #[test]
    fn writes_one_object_per_line_in_schema_order() {
        let schema = Schema::from_fields([
            Field::new("date", FieldSpec::Timestamp),
            Field::new("kind", FieldSpec::StrChoice(vec!["a".to_string()])),
            Field::new("level", FieldSpec::IntChoice(vec![3])),
        ]);
        let clock = FixedClock(1.5);
        let generator = RecordGenerator::with_clock(&schema, &clock);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let path = temp_path("lines");

        let stats = write_records(&path, &generator, 3, &mut rng).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();

        assert_eq!(stats.records, 3);
        assert_eq!(stats.bytes_written, contents.len() as u64);
        assert_eq!(stats.unresolved_values, 0);
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            assert_eq!(line, r#"{"date":1.5,"kind":"a","level":3}"#);
        }
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn zero_records_creates_empty_file() {
        let schema = Schema::from_fields([Field::new("id", FieldSpec::Uuid)]);
        let generator = RecordGenerator::new(&schema);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let path = temp_path("empty");

        let stats = write_records(&path, &generator, 0, &mut rng).unwrap();
        assert_eq!(stats, WriteStats::default());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn unresolved_fields_are_written_as_null() {
        let schema = Schema::from_fields([
            Field::new("ok", FieldSpec::IntChoice(vec![1])),
            Field::new("broken", FieldSpec::Unresolved("int:hello".to_string())),
        ]);
        let generator = RecordGenerator::new(&schema);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let path = temp_path("nulls");

        let stats = write_records(&path, &generator, 2, &mut rng).unwrap();
        assert_eq!(stats.unresolved_values, 2);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "{\"ok\":1,\"broken\":null}\n{\"ok\":1,\"broken\":null}\n");
    }
}
