use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub output: Option<OutputConfig>,
    pub submission: Option<SubmissionConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub data_dir: Option<String>,
    pub list_file: Option<String>,
    pub on_collision: Option<CollisionPolicy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionConfig {
    pub title_marker: Option<String>,
}

/// What to do when a new record's slug is already taken by a different title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Replace the existing file (historical behavior).
    #[default]
    Overwrite,
    /// Use `<slug>-<issue number>` instead.
    AppendIssueNumber,
}

impl ConfigFile {
    pub fn data_dir(&self) -> Option<&str> {
        self.output.as_ref()?.data_dir.as_deref()
    }

    pub fn list_file(&self) -> Option<&str> {
        self.output.as_ref()?.list_file.as_deref()
    }

    pub fn on_collision(&self) -> CollisionPolicy {
        self.output
            .as_ref()
            .and_then(|o| o.on_collision)
            .unwrap_or_default()
    }

    pub fn title_marker(&self) -> Option<&str> {
        self.submission.as_ref()?.title_marker.as_deref()
    }
}

/// Platform config directory path: `<config_dir>/survey-intake/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("survey-intake").join("config.toml"))
}

/// Load config by cascading CWD `.survey-intake.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".survey-intake.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        output: Some(OutputConfig {
            data_dir: overlay
                .output
                .as_ref()
                .and_then(|o| o.data_dir.clone())
                .or_else(|| base.output.as_ref().and_then(|o| o.data_dir.clone())),
            list_file: overlay
                .output
                .as_ref()
                .and_then(|o| o.list_file.clone())
                .or_else(|| base.output.as_ref().and_then(|o| o.list_file.clone())),
            on_collision: overlay
                .output
                .as_ref()
                .and_then(|o| o.on_collision)
                .or_else(|| base.output.as_ref().and_then(|o| o.on_collision)),
        }),
        submission: Some(SubmissionConfig {
            title_marker: overlay
                .submission
                .as_ref()
                .and_then(|s| s.title_marker.clone())
                .or_else(|| {
                    base.submission
                        .as_ref()
                        .and_then(|s| s.title_marker.clone())
                }),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: ConfigFile = toml::from_str(
            r#"
            [output]
            data_dir = "papers"
            list_file = "index.json"
            on_collision = "append-issue-number"

            [submission]
            title_marker = "[PAPER]"
            "#,
        )
        .unwrap();
        assert_eq!(config.data_dir(), Some("papers"));
        assert_eq!(config.list_file(), Some("index.json"));
        assert_eq!(config.on_collision(), CollisionPolicy::AppendIssueNumber);
        assert_eq!(config.title_marker(), Some("[PAPER]"));
    }

    #[test]
    fn test_empty_config_defaults() {
        let config: ConfigFile = toml::from_str("").unwrap();
        assert_eq!(config.data_dir(), None);
        assert_eq!(config.on_collision(), CollisionPolicy::Overwrite);
        assert_eq!(config.title_marker(), None);
    }

    #[test]
    fn test_merge_overlay_wins() {
        let base: ConfigFile = toml::from_str(
            "[output]\ndata_dir = \"base\"\nlist_file = \"base.json\"\n[submission]\ntitle_marker = \"[B]\"",
        )
        .unwrap();
        let overlay: ConfigFile = toml::from_str("[output]\ndata_dir = \"cwd\"").unwrap();
        let merged = merge(base, overlay);
        assert_eq!(merged.data_dir(), Some("cwd"));
        assert_eq!(merged.list_file(), Some("base.json"));
        assert_eq!(merged.title_marker(), Some("[B]"));
    }

    #[test]
    fn test_load_from_path_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output\n").unwrap();
        assert!(load_from_path(&path).is_none());
        assert!(load_from_path(&dir.path().join("absent.toml")).is_none());
    }

    #[test]
    fn test_unknown_collision_policy_rejected() {
        let parsed: Result<ConfigFile, _> = toml::from_str("[output]\non_collision = \"rename\"");
        assert!(parsed.is_err());
    }
}
