// Centralized configuration for NILFS GUI

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::DEFAULT_FS_TYPE;

/// NILFS GUI configuration with support for a config file and environment overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NilfsConfig {
    /// Filesystem type passed to `mount -t` (default: nilfs2)
    pub fs_type: String,

    /// Command used to list mounts (default: mount)
    pub mount_cmd: String,

    /// Command used to unmount (default: umount)
    pub umount_cmd: String,

    /// Checkpoint listing tool (default: lscp)
    pub lscp_cmd: String,

    /// Checkpoint/snapshot conversion tool (default: chcp)
    pub chcp_cmd: String,

    /// Graphical privilege elevation wrapper (default: pkexec)
    pub elevate_cmd: String,

    /// Maximum number of visible rows in checkpoint and snapshot lists
    pub max_visible_rows: usize,

    /// Default window width
    pub ui_window_width: i32,

    /// Default window height
    pub ui_window_height: i32,
}

impl Default for NilfsConfig {
    fn default() -> Self {
        Self {
            fs_type: DEFAULT_FS_TYPE.to_string(),
            mount_cmd: "mount".to_string(),
            umount_cmd: "umount".to_string(),
            lscp_cmd: "lscp".to_string(),
            chcp_cmd: "chcp".to_string(),
            elevate_cmd: "pkexec".to_string(),
            max_visible_rows: 12,
            ui_window_width: 720,
            ui_window_height: 640,
        }
    }
}

/// On-disk form of the config; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    fs_type: Option<String>,
    mount_cmd: Option<String>,
    umount_cmd: Option<String>,
    lscp_cmd: Option<String>,
    chcp_cmd: Option<String>,
    elevate_cmd: Option<String>,
    max_visible_rows: Option<usize>,
    window_width: Option<i32>,
    window_height: Option<i32>,
}

impl NilfsConfig {
    /// Create a configuration from defaults, the user's config file and the environment
    ///
    /// Supported environment variables:
    /// - NILFS_GUI_CONFIG: Alternate config file path
    /// - NILFS_GUI_FS_TYPE: Override filesystem type
    /// - NILFS_GUI_ELEVATE: Override the privilege elevation wrapper
    /// - NILFS_GUI_LSCP / NILFS_GUI_CHCP: Override the NILFS tools
    /// - NILFS_GUI_MOUNT / NILFS_GUI_UMOUNT: Override mount and umount
    /// - NILFS_GUI_MAX_ROWS: Override the visible row cap
    pub fn new() -> Self {
        let mut config = Self::default();
        let env = |key: &str| std::env::var(key).ok();

        let path = env("NILFS_GUI_CONFIG")
            .map(PathBuf::from)
            .or_else(Self::default_path);

        if let Some(path) = path {
            if path.exists() {
                if let Err(e) = config.merge_file(&path) {
                    log::warn!("Ignoring config file {}: {e:#}", path.display());
                }
            }
        }

        config.apply_env(env);
        config
    }

    /// Default config file location (`~/.config/nilfs-gui/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nilfs-gui").join("config.toml"))
    }

    /// Merge values from a TOML config file over the current ones
    pub fn merge_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        self.merge_toml(&content)
    }

    fn merge_toml(&mut self, content: &str) -> Result<()> {
        let file: ConfigFile = toml::from_str(content).context("Failed to parse config file")?;

        if let Some(v) = file.fs_type {
            self.fs_type = v;
        }
        if let Some(v) = file.mount_cmd {
            self.mount_cmd = v;
        }
        if let Some(v) = file.umount_cmd {
            self.umount_cmd = v;
        }
        if let Some(v) = file.lscp_cmd {
            self.lscp_cmd = v;
        }
        if let Some(v) = file.chcp_cmd {
            self.chcp_cmd = v;
        }
        if let Some(v) = file.elevate_cmd {
            self.elevate_cmd = v;
        }
        if let Some(v) = file.max_visible_rows {
            self.max_visible_rows = v.max(1);
        }
        if let Some(v) = file.window_width {
            self.ui_window_width = v;
        }
        if let Some(v) = file.window_height {
            self.ui_window_height = v;
        }

        Ok(())
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty("NILFS_GUI_FS_TYPE") {
            self.fs_type = v;
        }
        if let Some(v) = non_empty("NILFS_GUI_ELEVATE") {
            self.elevate_cmd = v;
        }
        if let Some(v) = non_empty("NILFS_GUI_LSCP") {
            self.lscp_cmd = v;
        }
        if let Some(v) = non_empty("NILFS_GUI_CHCP") {
            self.chcp_cmd = v;
        }
        if let Some(v) = non_empty("NILFS_GUI_MOUNT") {
            self.mount_cmd = v;
        }
        if let Some(v) = non_empty("NILFS_GUI_UMOUNT") {
            self.umount_cmd = v;
        }
        if let Some(rows) = non_empty("NILFS_GUI_MAX_ROWS") {
            match rows.trim().parse::<usize>() {
                Ok(n) if n > 0 => self.max_visible_rows = n,
                _ => log::warn!("Ignoring invalid NILFS_GUI_MAX_ROWS value '{rows}'"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = NilfsConfig::default();
        assert_eq!(config.fs_type, "nilfs2");
        assert_eq!(config.lscp_cmd, "lscp");
        assert_eq!(config.chcp_cmd, "chcp");
        assert_eq!(config.max_visible_rows, 12);
    }

    #[test]
    fn test_merge_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "elevate_cmd = \"gksu\"\nmax_visible_rows = 8").unwrap();

        let mut config = NilfsConfig::default();
        config.merge_file(file.path()).unwrap();
        assert_eq!(config.elevate_cmd, "gksu");
        assert_eq!(config.max_visible_rows, 8);
        assert_eq!(config.mount_cmd, "mount");
    }

    #[test]
    fn test_merge_rejects_unknown_keys() {
        let mut config = NilfsConfig::default();
        assert!(config.merge_toml("colour = \"grey\"").is_err());
        assert_eq!(config, NilfsConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("NILFS_GUI_ELEVATE", "gksu"),
            ("NILFS_GUI_MAX_ROWS", "oops"),
            ("NILFS_GUI_LSCP", "  "),
        ]
        .into_iter()
        .collect();

        let mut config = NilfsConfig::default();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.elevate_cmd, "gksu");
        assert_eq!(config.max_visible_rows, 12);
        assert_eq!(config.lscp_cmd, "lscp");
    }
}
