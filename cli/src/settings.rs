use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use minado_core::Difficulty;
use serde::Deserialize;

const SETTINGS_FILE: &str = "settings.toml";
const SCORES_FILE: &str = "scores.json";

/// Optional TOML settings, command-line flags take precedence over them.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub scores_path: Option<PathBuf>,
}

impl Settings {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "minado")
    }

    /// Reads `path` when given, otherwise the platform config file if there is one.
    ///
    /// An explicit path must exist, the platform file is optional.
    pub fn resolve(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match Self::project_dirs().map(|dirs| dirs.config_dir().join(SETTINGS_FILE)) {
                Some(path) if path.is_file() => Self::load(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Could not read settings from {}", path.display()))?;
        let settings = Self::parse(&data)
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        log::debug!("Loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }

    pub fn parse(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(data)
    }

    /// Where scores go when neither the settings nor the command line say otherwise.
    pub fn default_scores_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join(SCORES_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_use_defaults() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
        assert_eq!(Settings::default().difficulty, Difficulty::Easy);
    }

    #[test]
    fn full_settings() {
        let settings = Settings::parse(
            r#"
            difficulty = "hard"
            scores_path = "/tmp/minado/scores.json"
            "#,
        )
        .unwrap();

        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(
            settings.scores_path,
            Some(PathBuf::from("/tmp/minado/scores.json"))
        );
    }

    #[test]
    fn rejects_unknown_difficulty() {
        assert!(Settings::parse(r#"difficulty = "expert""#).is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(Settings::parse("theme = \"dark\"").is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("minado-settings-does-not-exist.toml");
        assert!(Settings::resolve(Some(&path)).is_err());
    }

    #[test]
    fn loads_file() {
        let path = std::env::temp_dir().join(format!("minado-settings-{}.toml", std::process::id()));
        fs::write(&path, "difficulty = \"medium\"\n").unwrap();

        let settings = Settings::resolve(Some(&path));
        let _ = fs::remove_file(&path);

        assert_eq!(settings.unwrap().difficulty, Difficulty::Medium);
    }
}
