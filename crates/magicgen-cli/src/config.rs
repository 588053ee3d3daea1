use std::path::{Path, PathBuf};

use serde::Deserialize;

use magicgen_generate::FilePrefix;

use crate::CliError;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "magicgen.toml";

pub const DEFAULT_FILE_COUNT: u64 = 1;
pub const DEFAULT_FILE_NAME: &str = "data";
pub const DEFAULT_DATA_LINES: u64 = 1000;
pub const DEFAULT_MULTIPROCESSING: usize = 1;

/// Defaults read from a TOML file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    pub file_count: Option<u64>,
    pub file_name: Option<String>,
    pub prefix: Option<FilePrefix>,
    pub data_lines: Option<u64>,
    pub multiprocessing: Option<usize>,
    pub seed: Option<u64>,
    pub schema: Option<String>,
}

/// Load the defaults file.
///
/// An explicit path must exist. Without one, `magicgen.toml` in the working
/// directory is used when present and empty defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<Defaults, CliError> {
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(CliError::Config(format!(
                    "config file '{}' does not exist",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.is_file() {
                return Ok(Defaults::default());
            }
            path
        }
    };
    read_config(&path)
}

fn read_config(path: &Path) -> Result<Defaults, CliError> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|err| CliError::Config(format!("{}: {err}", path.display())))
}

/// Values given on the command line, before defaults are applied.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub file_count: Option<u64>,
    pub file_name: Option<String>,
    pub prefix: Option<FilePrefix>,
    pub data_lines: Option<u64>,
    pub multiprocessing: Option<usize>,
    pub seed: Option<u64>,
    pub schema: Option<String>,
}

/// Fully resolved settings for one `generate` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub file_count: u64,
    pub file_name: String,
    pub prefix: FilePrefix,
    pub data_lines: u64,
    pub multiprocessing: usize,
    pub seed: Option<u64>,
    pub schema: Option<String>,
}

impl Settings {
    /// Command line wins over the config file, which wins over built-ins.
    pub fn resolve(overrides: Overrides, defaults: Defaults) -> Self {
        Self {
            file_count: overrides
                .file_count
                .or(defaults.file_count)
                .unwrap_or(DEFAULT_FILE_COUNT),
            file_name: overrides
                .file_name
                .or(defaults.file_name)
                .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
            prefix: overrides.prefix.or(defaults.prefix).unwrap_or_default(),
            data_lines: overrides
                .data_lines
                .or(defaults.data_lines)
                .unwrap_or(DEFAULT_DATA_LINES),
            multiprocessing: overrides
                .multiprocessing
                .or(defaults.multiprocessing)
                .unwrap_or(DEFAULT_MULTIPROCESSING),
            seed: overrides.seed.or(defaults.seed),
            schema: overrides.schema.or(defaults.schema),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("magicgen_cfg_{}_{name}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn parses_every_key() {
        let defaults: Defaults = toml::from_str(
            r#"
file_count = 4
file_name = "users"
prefix = "uuid"
data_lines = 50
multiprocessing = 2
seed = 7
schema = '{"id": "str:rand"}'
"#,
        )
        .unwrap();
        assert_eq!(defaults.file_count, Some(4));
        assert_eq!(defaults.file_name.as_deref(), Some("users"));
        assert_eq!(defaults.prefix, Some(FilePrefix::Uuid));
        assert_eq!(defaults.data_lines, Some(50));
        assert_eq!(defaults.multiprocessing, Some(2));
        assert_eq!(defaults.seed, Some(7));
        assert_eq!(defaults.schema.as_deref(), Some(r#"{"id": "str:rand"}"#));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(toml::from_str::<Defaults>("file_cnt = 3").is_err());
    }

    #[test]
    fn command_line_wins_over_config() {
        let defaults = Defaults {
            file_count: Some(4),
            file_name: Some("users".to_string()),
            data_lines: Some(50),
            ..Defaults::default()
        };
        let overrides = Overrides {
            file_count: Some(9),
            ..Overrides::default()
        };
        let settings = Settings::resolve(overrides, defaults);
        assert_eq!(settings.file_count, 9);
        assert_eq!(settings.file_name, "users");
        assert_eq!(settings.data_lines, 50);
        assert_eq!(settings.multiprocessing, DEFAULT_MULTIPROCESSING);
        assert_eq!(settings.prefix, FilePrefix::None);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn built_in_defaults_apply_last() {
        let settings = Settings::resolve(Overrides::default(), Defaults::default());
        assert_eq!(settings.file_count, 1);
        assert_eq!(settings.file_name, "data");
        assert_eq!(settings.data_lines, 1000);
        assert_eq!(settings.multiprocessing, 1);
        assert!(settings.schema.is_none());
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let path = temp_path("missing.toml");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn loads_explicit_config_file() {
        let path = temp_path("magicgen.toml");
        std::fs::write(&path, "file_count = 3\nprefix = \"count\"\n").unwrap();
        let defaults = load_config(Some(&path)).unwrap();
        assert_eq!(defaults.file_count, Some(3));
        assert_eq!(defaults.prefix, Some(FilePrefix::Count));
        std::fs::remove_file(&path).ok();
    }
}
