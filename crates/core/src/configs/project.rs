use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::{TidyError, TidyResult};

/// Name of the project configuration file looked up in the project root
pub const DEFAULT_CONFIG_FILE: &str = "tidy.yml";

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ProjectConfig {
    /// Dependency manifest, relative to the project root.
    pub manifest: String,
    /// Table path holding the named dependency groups.
    pub groups_path: Vec<String>,
    /// Key under each group holding its package mapping. Empty means the group
    /// table itself is the mapping.
    pub group_dependencies_key: String,
    /// Groups installed alongside the type checker and the linter.
    pub analysis_groups: Vec<String>,
    /// Group installed for the test runner.
    pub test_group: String,
    /// Every task runs once per version listed here.
    pub python_versions: Vec<String>,
    pub source_dir: String,
    pub tests_dir: String,
    /// Python-side task definition file, checked along with the source and test trees.
    pub task_file: String,
    /// Directory holding the per-task environments.
    pub env_dir: String,
    pub reuse_environments: bool,
    /// Optional pip constraints file pinning installed versions.
    pub constraints: Option<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            manifest: "pyproject.toml".to_string(),
            groups_path: vec![
                "tool".to_string(),
                "poetry".to_string(),
                "group".to_string(),
            ],
            group_dependencies_key: "dependencies".to_string(),
            analysis_groups: vec!["nox".to_string(), "tests".to_string()],
            test_group: "tests".to_string(),
            python_versions: vec!["3.12".to_string()],
            source_dir: "src".to_string(),
            tests_dir: "tests".to_string(),
            task_file: "noxfile.py".to_string(),
            env_dir: ".tidy".to_string(),
            reuse_environments: false,
            constraints: None,
        }
    }
}

impl ProjectConfig {
    fn validate(self) -> TidyResult<Self> {
        if self.python_versions.is_empty() {
            return Err(TidyError::Config(
                "pythonVersions must list at least one version".to_string(),
            ));
        }
        if self.groups_path.is_empty() {
            return Err(TidyError::Config(
                "groupsPath must name at least one table".to_string(),
            ));
        }
        Ok(self)
    }
}

pub fn parse_project_config(yaml_str: &str) -> TidyResult<ProjectConfig> {
    // An empty document deserializes to unit, not to a map
    if yaml_str.trim().is_empty() {
        return Ok(ProjectConfig::default());
    }
    let config: ProjectConfig = serde_yaml::from_str(yaml_str)?;
    config.validate()
}

/// Load the project configuration.
///
/// With no explicit path the default file in `project_root` is used when it
/// exists and defaults apply otherwise. An explicit path must exist.
pub fn load_project_config(
    project_root: &Path,
    explicit_path: Option<&Path>,
) -> TidyResult<ProjectConfig> {
    let config_path = match explicit_path {
        Some(path) if path.is_relative() => project_root.join(path),
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = project_root.join(DEFAULT_CONFIG_FILE);
            if !default_path.exists() {
                tracing::debug!(
                    "No {} in {}, using defaults",
                    DEFAULT_CONFIG_FILE,
                    project_root.display()
                );
                return Ok(ProjectConfig::default());
            }
            default_path
        }
    };

    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        TidyError::Config(format!(
            "Failed to read project config {}: {}",
            config_path.display(),
            e
        ))
    })?;

    parse_project_config(&content).map_err(|e| {
        TidyError::Config(format!(
            "Failed to parse project config {}: {}",
            config_path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_project_config("").unwrap();
        assert_eq!(config, ProjectConfig::default());
        assert_eq!(config.groups_path, vec!["tool", "poetry", "group"]);
        assert_eq!(config.python_versions, vec!["3.12"]);
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let config = parse_project_config(
            "pythonVersions: [\"3.11\", \"3.12\"]\nsourceDir: lib\nconstraints: constraints.txt\n",
        )
        .unwrap();
        assert_eq!(config.python_versions, vec!["3.11", "3.12"]);
        assert_eq!(config.source_dir, "lib");
        assert_eq!(config.constraints.as_deref(), Some("constraints.txt"));
        assert_eq!(config.tests_dir, "tests");
        assert_eq!(config.manifest, "pyproject.toml");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_project_config("sessions: []\n").unwrap_err();
        assert!(matches!(err, TidyError::Yaml(_)));
    }

    #[test]
    fn empty_python_versions_are_rejected() {
        let err = parse_project_config("pythonVersions: []\n").unwrap_err();
        assert!(matches!(err, TidyError::Config(_)));
    }

    #[test]
    fn missing_default_file_falls_back_to_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = load_project_config(temp_dir.path(), None).unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn default_file_is_loaded_from_project_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILE), "testGroup: ci\n").unwrap();

        let config = load_project_config(temp_dir.path(), None).unwrap();
        assert_eq!(config.test_group, "ci");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = load_project_config(temp_dir.path(), Some(Path::new("custom.yml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read project config"));
    }
}
