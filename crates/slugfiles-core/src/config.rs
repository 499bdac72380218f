use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::PathBuf;

/// Defaults read from `Slugfiles.toml` and `SLUGFILES_*` environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default)]
    pub dry_run: bool,
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Slugfiles").required(false))
        .add_source(
            Environment::with_prefix("SLUGFILES")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("ignore_patterns"),
        )
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

/// Everything one run needs, passed explicitly into the planner and executor.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub source_root: PathBuf,
    pub output_root: Option<PathBuf>,
    pub recursive: bool,
    pub case_sensitive: bool,
    pub dry_run: bool,
    pub ignore_patterns: Vec<String>,
}

impl RunOptions {
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: None,
            recursive: false,
            case_sensitive: false,
            dry_run: false,
            ignore_patterns: Vec::new(),
        }
    }

    /// Seed the options with configured defaults. Flags applied afterwards can
    /// only switch behavior on.
    pub fn from_config(source_root: impl Into<PathBuf>, config: &AppConfig) -> Self {
        Self {
            case_sensitive: config.case_sensitive,
            dry_run: config.dry_run,
            ignore_patterns: config.ignore_patterns.clone(),
            ..Self::new(source_root)
        }
    }

    pub fn with_output(mut self, output_root: Option<PathBuf>) -> Self {
        if output_root.is_some() {
            self.output_root = output_root;
        }
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive |= recursive;
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive |= case_sensitive;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run |= dry_run;
        self
    }

    /// Directory restructuring only happens for recursive in-place runs.
    pub fn restructures_directories(&self) -> bool {
        self.recursive && self.output_root.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config_defaults() {
        let config = AppConfig {
            ignore_patterns: vec![".DS_Store".to_string()],
            case_sensitive: false,
            dry_run: true,
        };
        let options = RunOptions::from_config("/tmp/src", &config)
            .recursive(true)
            .case_sensitive(true)
            .dry_run(false);

        assert!(options.recursive);
        assert!(options.case_sensitive);
        // config turned dry run on, the absent flag cannot turn it off
        assert!(options.dry_run);
        assert_eq!(options.ignore_patterns, vec![".DS_Store".to_string()]);
    }

    #[test]
    fn test_restructures_only_in_place_recursive() {
        let in_place = RunOptions::new("/tmp/src").recursive(true);
        assert!(in_place.restructures_directories());

        let copying = RunOptions::new("/tmp/src")
            .recursive(true)
            .with_output(Some(PathBuf::from("/tmp/out")));
        assert!(!copying.restructures_directories());

        let flat = RunOptions::new("/tmp/src");
        assert!(!flat.restructures_directories());
    }
}
