use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use reaper_extension_authoring::Host;
use serde::{Deserialize, Serialize};

/// Looked up in the host's resource directory.
pub const CONFIG_FILE_NAME: &str = "onprojectload.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Ext-state section every key lives under.
    pub section: String,
    pub action_key: String,
    pub frontmost_key: String,
    /// Whether ext-state writes survive a host restart.
    pub persist: bool,
    pub dialog_title: String,
    /// Stop retrying the stored identifier after this many ticks. Unbounded when unset.
    pub resolve_attempt_limit: Option<u32>,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            section: "sockmonkey72".to_string(),
            action_key: "onprojectload".to_string(),
            frontmost_key: "onprojectload_frontmost".to_string(),
            persist: true,
            dialog_title: "onProjectLoad".to_string(),
            resolve_attempt_limit: None,
        }
    }
}

impl ExtensionConfig {
    pub fn with_section<S: Into<String>>(mut self, section: S) -> Self {
        self.section = section.into();
        self
    }

    pub fn with_resolve_attempt_limit(mut self, limit: u32) -> Self {
        self.resolve_attempt_limit = Some(limit);
        self
    }

    pub fn path_in(resource_dir: &Path) -> PathBuf {
        resource_dir.join(CONFIG_FILE_NAME)
    }

    /// Reads the config next to the host's other resources, or defaults when
    /// the host cannot tell where that is.
    pub fn load(host: &dyn Host) -> Self {
        match host.resource_path() {
            Some(dir) => Self::load_from(&Self::path_in(&dir)),
            None => Self::default(),
        }
    }

    /// Returns defaults if the file is missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(err) => {
                tracing::warn!(?err, path = %path.display(), "failed to read config");
                return Self::default();
            }
        };
        serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(%err, path = %path.display(), "ignoring malformed config");
            Self::default()
        })
    }
}
