use crate::error::{MatchError, Result};
use crate::matcher::ErrorPolicy;
use resume_match_common::{Catalog, ClassificationMode, TierFilter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog preset used when no --catalog file is given
    pub default_preset: String,
    /// Extension of resume text files
    pub extension: String,
    pub tier_filter: TierFilter,
    pub mode: ClassificationMode,
    pub error_policy: ErrorPolicy,
    pub recursive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_preset: "outreachy-2017-orgs".into(),
            extension: "txt".into(),
            tier_filter: TierFilter::GoldAndSilver,
            mode: ClassificationMode::BestRecord,
            error_policy: ErrorPolicy::SkipAndContinue,
            recursive: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Missing file means defaults; fields absent from the file keep theirs.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// `~/.config/resume-match/config.json`
    pub fn config_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".config").join("resume-match").join("config.json"))
            .ok_or_else(|| MatchError::Config("home directory not found".into()))
    }

    pub fn set_default_preset(&mut self, name: String) -> Result<()> {
        // Reject names that would fail on the next run
        Catalog::from_preset(&name)?;
        self.default_preset = name;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.extension, "txt");
        assert_eq!(config.tier_filter, TierFilter::GoldAndSilver);
        assert_eq!(config.error_policy, ErrorPolicy::SkipAndContinue);
        assert!(Catalog::from_preset(&config.default_preset).is_ok());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"tier_filter": "gold-only", "recursive": true}"#).unwrap();
        assert_eq!(config.tier_filter, TierFilter::GoldOnly);
        assert!(config.recursive);
        assert_eq!(config.mode, ClassificationMode::BestRecord);
        assert_eq!(config.extension, "txt");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.default_preset, "outreachy-2017-orgs");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.default_preset = "outreachy-2017-projects".into();
        config.mode = ClassificationMode::AllRequired;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.default_preset, "outreachy-2017-projects");
        assert_eq!(loaded.mode, ClassificationMode::AllRequired);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load_from(&path), Err(MatchError::JsonParse(_))));
    }
}
