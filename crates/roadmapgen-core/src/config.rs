//! Configuration loading.
//!
//! Month tables and schedule parameters come from `roadmapgen.toml` and are
//! passed explicitly into the mapper and scheduler.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::extract::FilenameConvention;
use crate::months::MonthMapper;
use crate::schedule::{Scheduler, DAYS_PER_MONTH, PROBLEMS_PER_DAY};
use crate::slug::{SlugGenerator, DEFAULT_URL_BASE};

/// One roadmap built from one input directory into one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackConfig {
    /// Track identifier (e.g. "advanced").
    pub name: String,
    /// Directory holding the exported documents.
    pub input_dir: PathBuf,
    /// Artifact file name, relative to `output_dir`.
    pub output: PathBuf,
    /// How document file names identify their month.
    #[serde(default)]
    pub convention: FilenameConvention,
    /// Source month labels in roadmap order.
    #[serde(default)]
    pub month_order: Vec<String>,
    /// Display labels, parallel to `month_order`. Defaults to "Month N".
    #[serde(default)]
    pub display_labels: Option<Vec<String>>,
}

impl TrackConfig {
    pub fn month_mapper(&self) -> Result<MonthMapper, ConfigError> {
        if self.month_order.is_empty() {
            return Err(ConfigError::EmptyMonthOrder(self.name.clone()));
        }
        MonthMapper::new(self.month_order.clone(), self.display_labels.clone())
    }
}

/// Top-level roadmapgen configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapConfig {
    /// Directory artifacts are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Base path problem slugs are appended to.
    #[serde(default = "default_url_base")]
    pub url_base: String,
    /// Days per scheduled month, including the bonus day.
    #[serde(default = "default_days_per_month")]
    pub days_per_month: u32,
    /// Capacity of each regular day.
    #[serde(default = "default_problems_per_day")]
    pub problems_per_day: usize,
    /// Max documents extracted concurrently.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    #[serde(default = "default_tracks")]
    pub tracks: Vec<TrackConfig>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_url_base() -> String {
    DEFAULT_URL_BASE.to_string()
}
fn default_days_per_month() -> u32 {
    DAYS_PER_MONTH
}
fn default_problems_per_day() -> usize {
    PROBLEMS_PER_DAY
}
fn default_parallelism() -> usize {
    4
}

fn default_tracks() -> Vec<TrackConfig> {
    let months = |labels: &[&str]| labels.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    vec![
        TrackConfig {
            name: "advanced".into(),
            input_dir: PathBuf::from("."),
            output: PathBuf::from("roadmap_data.json"),
            convention: FilenameConvention::Calendar,
            month_order: months(&["April", "May", "June", "July", "August"]),
            display_labels: None,
        },
        TrackConfig {
            name: "intermediate".into(),
            input_dir: PathBuf::from("intermediate_roadmap_pdfs"),
            output: PathBuf::from("intermediate_roadmap_data.json"),
            convention: FilenameConvention::Numbered,
            month_order: months(&["Month 1", "Month 2", "Month 3"]),
            display_labels: Some(months(&["Month 1", "Month 2", "Month 3"])),
        },
    ]
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            url_base: default_url_base(),
            days_per_month: default_days_per_month(),
            problems_per_day: default_problems_per_day(),
            parallelism: default_parallelism(),
            tracks: default_tracks(),
        }
    }
}

impl RoadmapConfig {
    pub fn scheduler(&self) -> Result<Scheduler, ConfigError> {
        Scheduler::new(self.days_per_month, self.problems_per_day)
    }

    pub fn slug_generator(&self) -> SlugGenerator {
        SlugGenerator::new(self.url_base.clone())
    }

    pub fn track(&self, name: &str) -> Result<&TrackConfig, ConfigError> {
        self.tracks
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| ConfigError::UnknownTrack(name.to_string()))
    }

    /// Where the artifact of `track` is written.
    pub fn artifact_path(&self, track: &TrackConfig) -> PathBuf {
        self.output_dir.join(&track.output)
    }

    /// Check every track's month table and the schedule parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scheduler()?;
        if self.parallelism == 0 {
            return Err(ConfigError::InvalidSchedule(
                "parallelism must be at least 1".into(),
            ));
        }
        let mut names = HashSet::new();
        for track in &self.tracks {
            if track.name.trim().is_empty() {
                return Err(ConfigError::EmptyTrackName);
            }
            if !names.insert(track.name.as_str()) {
                return Err(ConfigError::DuplicateTrack(track.name.clone()));
            }
            track.month_mapper()?;
        }
        Ok(())
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `roadmapgen.toml` in the current directory
/// 2. `~/.config/roadmapgen/config.toml`
///
/// `ROADMAPGEN_OUTPUT_DIR` overrides `output_dir`.
pub fn load_config() -> Result<RoadmapConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<RoadmapConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("roadmapgen.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => RoadmapConfig::default(),
    };

    if let Ok(dir) = std::env::var("ROADMAPGEN_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    config.output_dir = resolve_path(&config.output_dir);
    for track in &mut config.tracks {
        track.input_dir = resolve_path(&track.input_dir);
    }

    config.validate()?;
    Ok(config)
}

/// Parse a TOML string into a config (useful for testing).
pub fn parse_config_str(content: &str) -> Result<RoadmapConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("roadmapgen"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_ROADMAPGEN_TEST_VAR", "exports");
        assert_eq!(resolve_env_vars("${_ROADMAPGEN_TEST_VAR}"), "exports");
        assert_eq!(
            resolve_env_vars("data/${_ROADMAPGEN_TEST_VAR}/2024"),
            "data/exports/2024"
        );
        assert_eq!(resolve_env_vars("no vars"), "no vars");
        std::env::remove_var("_ROADMAPGEN_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_values() {
        std::env::set_var("_ROADMAPGEN_SELF_REF", "a/${_ROADMAPGEN_SELF_REF}");
        assert_eq!(
            resolve_env_vars("${_ROADMAPGEN_SELF_REF}/out"),
            "a/${_ROADMAPGEN_SELF_REF}/out"
        );
        assert_eq!(resolve_env_vars("x/${UNCLOSED"), "x/${UNCLOSED");
        std::env::remove_var("_ROADMAPGEN_SELF_REF");
    }

    #[test]
    fn default_config() {
        let config = RoadmapConfig::default();
        assert_eq!(config.days_per_month, 30);
        assert_eq!(config.problems_per_day, 3);
        assert_eq!(config.tracks.len(), 2);
        assert!(config.validate().is_ok());

        let advanced = config.track("advanced").unwrap();
        let mapper = advanced.month_mapper().unwrap();
        assert_eq!(mapper.map(&"April".into()).unwrap(), "Month 1");
        assert_eq!(mapper.map(&"August".into()).unwrap(), "Month 5");
        assert_eq!(
            config.artifact_path(advanced),
            PathBuf::from("./roadmap_data.json")
        );
    }

    #[test]
    fn parse_tracks() {
        let toml_str = r#"
output_dir = "out"
url_base = "https://example.test/problems/"

[[tracks]]
name = "summer"
input_dir = "exports"
output = "summer.json"
convention = "calendar"
month_order = ["June", "July"]
display_labels = ["Week A", "Week B"]

[[tracks]]
name = "numbered"
input_dir = "numbered"
output = "numbered.json"
convention = "numbered"
month_order = ["Month 1"]
"#;
        let config = parse_config_str(toml_str).unwrap();
        assert_eq!(config.tracks.len(), 2);
        assert_eq!(config.days_per_month, 30);
        assert_eq!(config.tracks[1].convention, FilenameConvention::Numbered);
        assert_eq!(
            config.slug_generator().url("Two Sum"),
            "https://example.test/problems/two-sum"
        );

        let mapper = config.track("summer").unwrap().month_mapper().unwrap();
        assert_eq!(mapper.map(&"July".into()).unwrap(), "Week B");
    }

    #[test]
    fn validate_rejects_bad_tables() {
        let mut config = RoadmapConfig::default();
        config.tracks[0].month_order.clear();
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::EmptyMonthOrder("advanced".into())
        );

        let mut config = RoadmapConfig::default();
        config.tracks[1].name = "advanced".into();
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::DuplicateTrack("advanced".into())
        );

        let config = RoadmapConfig {
            problems_per_day: 0,
            ..RoadmapConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_track() {
        let config = RoadmapConfig::default();
        assert_eq!(
            config.track("beginner").unwrap_err(),
            ConfigError::UnknownTrack("beginner".into())
        );
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/no/such/roadmapgen.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roadmapgen.toml");
        std::fs::write(
            &path,
            r#"
problems_per_day = 2

[[tracks]]
name = "only"
input_dir = "in"
output = "only.json"
month_order = ["May"]
"#,
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.problems_per_day, 2);
        assert_eq!(config.tracks.len(), 1);
        assert_eq!(config.tracks[0].convention, FilenameConvention::Calendar);
    }
}
