use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ops_logging::ops_info;
use serde::Deserialize;
use siteops_core::OperationEntry;
use siteops_engine::ClientSettings;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OperationConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteOpsConfig {
    pub script_root: String,
    pub sites: Vec<String>,
    pub operations: Vec<OperationConfig>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for SiteOpsConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            script_root: client.script_root,
            sites: Vec::new(),
            operations: default_operations(),
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
        }
    }
}

impl SiteOpsConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            script_root: self.script_root.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ClientSettings::default()
        }
    }

    pub fn operation_entries(&self) -> Vec<OperationEntry> {
        self.operations
            .iter()
            .map(|op| OperationEntry::new(op.name.clone(), op.description.clone()))
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("config {path:?}: {field} must be at least one second")]
    ZeroTimeout { path: PathBuf, field: &'static str },
}

/// Loads the config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<SiteOpsConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            ops_info!("No config at {:?}; using defaults", path);
            return Ok(SiteOpsConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config: SiteOpsConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    for (field, secs) in [
        ("connect_timeout_secs", config.connect_timeout_secs),
        ("request_timeout_secs", config.request_timeout_secs),
    ] {
        if secs == 0 {
            return Err(ConfigError::ZeroTimeout {
                path: path.to_path_buf(),
                field,
            });
        }
    }
    ops_info!("Loaded config from {:?}", path);
    Ok(config)
}

fn default_operations() -> Vec<OperationConfig> {
    [
        ("local_fix_perms", "Fix local files file permissions"),
        ("local_restore", "Restore db from snapshot in manual backup directory"),
        ("local_update_db", "Local drush updatedb"),
        ("local_update_status", "Pull from master, check for updates"),
        (
            "local_updates",
            "Pull from master, update modules & db, commit and push to master",
        ),
        (
            "remote_backup",
            "Snapshot remote (snapshot.mysql.gz in manual directory)",
        ),
        ("remote_cc", "Remote clear cache"),
        ("remote_cert", "Remote tls cert check"),
        ("remote_pull", "Do git pull on remote system"),
        (
            "remote_to_local_bam_files",
            "Sync remote backup files to local system",
        ),
        (
            "remote_to_local_restore",
            "Snapshot remote, sync backupfiles to local, restore snapshot on local",
        ),
        (
            "remote_to_local_rsync",
            "Sync remote default/files to local system",
        ),
        ("remote_update_db", "Remote drush updatedb"),
        (
            "remote_updates",
            "Backup remote, remote git pull, remote drush updatedb",
        ),
    ]
    .into_iter()
    .map(|(name, description)| OperationConfig {
        name: name.to_string(),
        description: description.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, SiteOpsConfig::default());
        assert!(config.operations.iter().any(|op| op.name == "remote_backup"));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("siteops.ron");
        fs::write(
            &path,
            r#"(
                script_root: "http://ops.example.com/manage",
                sites: ["lnba", "unrba"],
                request_timeout_secs: 5,
            )"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.sites, vec!["lnba", "unrba"]);
        assert_eq!(config.operations, default_operations());

        let settings = config.client_settings();
        assert_eq!(settings.script_root, "http://ops.example.com/manage");
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("siteops.ron");
        fs::write(&path, "(request_timeout_secs: 0)").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ZeroTimeout {
                field: "request_timeout_secs",
                ..
            }
        ));

        fs::write(&path, "(connect_timeout_secs: 0)").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ZeroTimeout {
                field: "connect_timeout_secs",
                ..
            }
        ));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("siteops.ron");
        fs::write(&path, "(sites: [").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
