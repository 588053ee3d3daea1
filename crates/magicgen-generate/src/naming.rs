use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

const FILE_EXTENSION: &str = "json";

/// Strategy used to make output file names unique.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilePrefix {
    /// `{base}{index}.json`
    #[default]
    None,
    /// `{base}_{index}.json`
    Count,
    /// `{base}_{8 hex chars}_{index}.json`
    Random,
    /// `{base}_{uuid}.json`
    Uuid,
}

impl FilePrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilePrefix::None => "none",
            FilePrefix::Count => "count",
            FilePrefix::Random => "random",
            FilePrefix::Uuid => "uuid",
        }
    }

    /// Whether re-running with the same options reuses the same names.
    pub fn is_deterministic(&self) -> bool {
        matches!(self, FilePrefix::None | FilePrefix::Count)
    }
}

impl fmt::Display for FilePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilePrefix {
    type Err = GenerationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" => Ok(FilePrefix::None),
            "count" => Ok(FilePrefix::Count),
            "random" => Ok(FilePrefix::Random),
            "uuid" => Ok(FilePrefix::Uuid),
            other => Err(GenerationError::InvalidOptions(format!(
                "unknown file prefix '{other}' (expected none, count, random or uuid)"
            ))),
        }
    }
}

/// Naming policy for output files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNaming {
    pub base_name: String,
    pub prefix: FilePrefix,
}

impl Default for FileNaming {
    fn default() -> Self {
        Self {
            base_name: "data".to_string(),
            prefix: FilePrefix::None,
        }
    }
}

impl FileNaming {
    pub fn new(base_name: impl Into<String>, prefix: FilePrefix) -> Self {
        Self {
            base_name: base_name.into(),
            prefix,
        }
    }

    /// Reject base names that would escape the output directory.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let base = self.base_name.as_str();
        if base.is_empty() {
            return Err(GenerationError::InvalidOptions(
                "file name must not be empty".to_string(),
            ));
        }
        if base.contains(['/', '\\']) || base == "." || base == ".." {
            return Err(GenerationError::InvalidOptions(format!(
                "file name '{base}' must not contain path separators"
            )));
        }
        Ok(())
    }

    /// File name for the file at `index`. `rng` is only drawn from by the
    /// random and uuid strategies.
    pub fn file_name(&self, index: u64, rng: &mut dyn RngCore) -> String {
        let base = &self.base_name;
        match self.prefix {
            FilePrefix::None => format!("{base}{index}.{FILE_EXTENSION}"),
            FilePrefix::Count => format!("{base}_{index}.{FILE_EXTENSION}"),
            FilePrefix::Random => {
                format!("{base}_{:08x}_{index}.{FILE_EXTENSION}", rng.next_u32())
            }
            FilePrefix::Uuid => {
                let mut bytes = [0_u8; 16];
                rng.fill_bytes(&mut bytes);
                let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
                format!("{base}_{uuid}.{FILE_EXTENSION}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn deterministic_strategies_ignore_rng() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let none = FileNaming::new("data", FilePrefix::None);
        let count = FileNaming::new("data", FilePrefix::Count);
        assert_eq!(none.file_name(0, &mut rng), "data0.json");
        assert_eq!(count.file_name(2, &mut rng), "data_2.json");
        assert!(FilePrefix::Count.is_deterministic());
        assert!(!FilePrefix::Random.is_deterministic());
    }

    #[test]
    fn random_strategy_embeds_token_and_index() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let naming = FileNaming::new("events", FilePrefix::Random);
        let name = naming.file_name(3, &mut rng);
        let token = name
            .strip_prefix("events_")
            .and_then(|rest| rest.strip_suffix("_3.json"))
            .expect("random name shape");
        assert_eq!(token.len(), 8);
        assert!(token.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[test]
    fn uuid_strategy_embeds_uuid() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let naming = FileNaming::new("events", FilePrefix::Uuid);
        let name = naming.file_name(0, &mut rng);
        let uuid = name
            .strip_prefix("events_")
            .and_then(|rest| rest.strip_suffix(".json"))
            .expect("uuid name shape");
        assert!(uuid::Uuid::parse_str(uuid).is_ok());
    }

    #[test]
    fn parses_prefix_names() {
        assert_eq!("count".parse::<FilePrefix>().unwrap(), FilePrefix::Count);
        assert!("sequential".parse::<FilePrefix>().is_err());
    }

    #[test]
    fn rejects_path_like_base_names() {
        assert!(FileNaming::new("", FilePrefix::None).validate().is_err());
        assert!(FileNaming::new("../x", FilePrefix::None).validate().is_err());
        assert!(FileNaming::new("data", FilePrefix::None).validate().is_ok());
    }
}
