//! Preference persisted in the host's extension-state store.

use reaper_extension_authoring::Host;

use crate::config::ExtensionConfig;

const FLAG_ON: &str = "1";
const FLAG_OFF: &str = "0";

pub fn encode_flag(enabled: bool) -> &'static str {
    if enabled {
        FLAG_ON
    } else {
        FLAG_OFF
    }
}

/// Anything but `"1"` reads as off.
pub fn decode_flag(value: Option<&str>) -> bool {
    value.map(str::trim) == Some(FLAG_ON)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredPreference {
    /// Action identifier string, never empty.
    pub action: Option<String>,
    pub run_on_frontmost_change: bool,
}

pub struct PreferenceStore<'a> {
    host: &'a dyn Host,
    config: &'a ExtensionConfig,
}

impl<'a> PreferenceStore<'a> {
    pub fn new(host: &'a dyn Host, config: &'a ExtensionConfig) -> Self {
        Self { host, config }
    }

    pub fn load(&self) -> StoredPreference {
        let action = self
            .host
            .ext_state(&self.config.section, &self.config.action_key)
            .map(|identifier| identifier.trim().to_string())
            .filter(|identifier| !identifier.is_empty());
        let frontmost = self
            .host
            .ext_state(&self.config.section, &self.config.frontmost_key);

        StoredPreference {
            action,
            run_on_frontmost_change: decode_flag(frontmost.as_deref()),
        }
    }

    pub fn store_action(&self, identifier: &str) {
        self.host.set_ext_state(
            &self.config.section,
            &self.config.action_key,
            identifier,
            self.config.persist,
        );
    }

    pub fn clear_action(&self) {
        self.host.delete_ext_state(
            &self.config.section,
            &self.config.action_key,
            self.config.persist,
        );
    }

    pub fn store_frontmost(&self, enabled: bool) {
        self.host.set_ext_state(
            &self.config.section,
            &self.config.frontmost_key,
            encode_flag(enabled),
            self.config.persist,
        );
    }
}
