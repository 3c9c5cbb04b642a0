//! Dependency group resolution
//!
//! Reads named dependency groups out of the project's TOML manifest. The
//! manifest is read from disk on every call so edits made between task runs are
//! always picked up; nothing here writes to it.

use std::path::Path;

use toml::Value;
use tracing::debug;

use crate::configs::project::ProjectConfig;
use crate::types::{TidyError, TidyResult};

/// Where dependency groups live inside the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupLayout {
    /// Table path holding one table per group, e.g. `tool.poetry.group`
    pub groups_path: Vec<String>,
    /// Key under each group holding the package mapping. `None` when the group
    /// table is the mapping itself.
    pub dependencies_key: Option<String>,
}

impl Default for GroupLayout {
    fn default() -> Self {
        Self::from_config(&ProjectConfig::default())
    }
}

impl GroupLayout {
    pub fn from_config(config: &ProjectConfig) -> Self {
        let dependencies_key = if config.group_dependencies_key.is_empty() {
            None
        } else {
            Some(config.group_dependencies_key.clone())
        };

        Self {
            groups_path: config.groups_path.clone(),
            dependencies_key,
        }
    }
}

/// Return the package names declared in `group`, in manifest order.
pub fn resolve_dependency_group(
    manifest_path: &Path,
    layout: &GroupLayout,
    group: &str,
) -> TidyResult<Vec<String>> {
    let contents =
        std::fs::read_to_string(manifest_path).map_err(|source| TidyError::ManifestRead {
            path: manifest_path.to_path_buf(),
            source,
        })?;

    let manifest: Value =
        toml::from_str(&contents).map_err(|source| TidyError::ManifestParse {
            path: manifest_path.to_path_buf(),
            source,
        })?;

    let not_found = || TidyError::GroupNotFound {
        group: group.to_string(),
        manifest: manifest_path.to_path_buf(),
    };

    let mut node = &manifest;
    for key in &layout.groups_path {
        node = node.get(key.as_str()).ok_or_else(not_found)?;
    }
    node = node.get(group).ok_or_else(not_found)?;
    if let Some(key) = &layout.dependencies_key {
        node = node.get(key.as_str()).ok_or_else(not_found)?;
    }

    let packages: Vec<String> = node
        .as_table()
        .ok_or_else(not_found)?
        .keys()
        .cloned()
        .collect();

    debug!(
        "Resolved group '{}' from {}: {:?}",
        group,
        manifest_path.display(),
        packages
    );

    Ok(packages)
}

/// Resolve several groups and concatenate them in the order given.
pub fn resolve_dependency_groups(
    manifest_path: &Path,
    layout: &GroupLayout,
    groups: &[String],
) -> TidyResult<Vec<String>> {
    let mut packages = Vec::new();
    for group in groups {
        packages.extend(resolve_dependency_group(manifest_path, layout, group)?);
    }
    Ok(packages)
}
