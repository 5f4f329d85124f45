use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::skills::Selection;

pub const DEFAULT_DATA_PATH: &str = "data/relative_skill_penetration_by_country.csv";
pub const DEFAULT_CONFIG_PATH: &str = "skill-penetration.json";

pub const DEFAULT_SKILLS: [&str; 4] = [
    "Artificial Intelligence (AI)",
    "Digital Literacy",
    "Human Computer Interaction",
    "Scientific Computing",
];

pub const DEFAULT_COUNTRIES: [&str; 8] = [
    "Botswana",
    "Germany",
    "Kenya",
    "Mauritius",
    "Namibia",
    "Nigeria",
    "Poland",
    "South Africa",
];

/// Optional settings read from a JSON file.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub data_path: Option<PathBuf>,
    pub skills: Option<Vec<String>>,
    pub countries: Option<Vec<String>>,
}

/// Values given on the command line; empty lists mean "not given".
#[derive(Clone, Debug, Default)]
pub struct CliOverrides {
    pub data_path: Option<PathBuf>,
    pub skills: Vec<String>,
    pub countries: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub initial_selection: Selection,
}

impl DashboardConfig {
    /// Command line beats the config file, which beats built-in defaults.
    pub fn resolve(file: FileConfig, cli: CliOverrides) -> Self {
        let data_path = cli
            .data_path
            .or(file.data_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let skills = non_empty(cli.skills)
            .or(file.skills)
            .unwrap_or_else(|| DEFAULT_SKILLS.map(str::to_owned).to_vec());
        let countries = non_empty(cli.countries)
            .or(file.countries)
            .unwrap_or_else(|| DEFAULT_COUNTRIES.map(str::to_owned).to_vec());

        Self {
            data_path,
            initial_selection: Selection::new(skills, countries),
        }
    }
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() { None } else { Some(values) }
}

pub fn read_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid config file {}", path.display()))
}

/// Loads an explicitly requested config file, or the default one when it
/// exists. A broken default file is skipped with a warning.
pub fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig> {
    if let Some(path) = explicit {
        let config = read_file_config(path)?;
        info!(path = %path.display(), "loaded config file");
        return Ok(config);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if !default_path.is_file() {
        return Ok(FileConfig::default());
    }

    match read_file_config(default_path) {
        Ok(config) => {
            info!(path = %default_path.display(), "loaded config file");
            Ok(config)
        }
        Err(error) => {
            warn!(path = %default_path.display(), "ignoring config file: {error:#}");
            Ok(FileConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_apply_without_overrides() {
        let config = DashboardConfig::resolve(FileConfig::default(), CliOverrides::default());

        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.initial_selection.skills().len(), 4);
        assert_eq!(config.initial_selection.countries().len(), 8);
        assert_eq!(config.initial_selection.countries()[0], "Botswana");
    }

    #[test]
    fn cli_wins_over_file() {
        let file = FileConfig {
            data_path: Some(PathBuf::from("from-file.csv")),
            skills: Some(vec!["Robotics".into()]),
            countries: Some(vec!["Chile".into(), "Peru".into()]),
        };
        let cli = CliOverrides {
            data_path: Some(PathBuf::from("from-cli.csv")),
            skills: Vec::new(),
            countries: vec!["Kenya".into()],
        };

        let config = DashboardConfig::resolve(file, cli);
        assert_eq!(config.data_path, PathBuf::from("from-cli.csv"));
        assert_eq!(config.initial_selection.skills(), &["Robotics"]);
        assert_eq!(config.initial_selection.countries(), &["Kenya"]);
    }

    #[test]
    fn file_config_parses_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "countries": ["Poland", "Germany"] }}"#).unwrap();

        let config = read_file_config(file.path()).unwrap();
        assert_eq!(
            config,
            FileConfig {
                data_path: None,
                skills: None,
                countries: Some(vec!["Poland".into(), "Germany".into()]),
            }
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "colour": "blue" }}"#).unwrap();

        let error = load_file_config(Some(file.path())).unwrap_err();
        assert!(format!("{error:#}").contains("invalid config file"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert!(load_file_config(Some(&path)).is_err());
    }
}
