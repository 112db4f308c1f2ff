//! The extension's own actions, as the user triggers them from the action list.

use once_cell::sync::Lazy;
use reaper_extension_authoring::{Host, MessageBoxKind};

use crate::action::ConfiguredAction;
use crate::extension::OnProjectLoad;
use crate::settings::PreferenceStore;

pub const PROMPT_CAPTION: &str = "Enter Action Identifier String (not Cmd ID)";
pub const BAD_IDENTIFIER: &str = "Bad Action Identifier String";
pub const NOTHING_CONFIGURED: &str = "No action is set to run on project load.";

pub static INFO: Lazy<String> = Lazy::new(|| {
    format!(
        "onprojectload // sockmonkey72\nRun an action on any project load\n\nVersion {}\n\n\n\
         Copyright (c) 2022 Jeremy Bernstein\njeremy.d.bernstein@googlemail.com\n",
        env!("CARGO_PKG_VERSION")
    )
});

impl OnProjectLoad {
    fn store<'a>(&'a self, host: &'a dyn Host) -> PreferenceStore<'a> {
        PreferenceStore::new(host, &self.config)
    }

    /// Identifier the user last chose, resolved or not.
    fn current_identifier(&self) -> Option<&str> {
        self.action
            .as_ref()
            .map(ConfiguredAction::identifier)
            .or_else(|| self.scheduler.pending_resolution())
    }

    fn notify(&self, host: &dyn Host, message: &str) {
        host.message_box(message, &self.config.dialog_title, MessageBoxKind::Ok);
    }

    fn confirm(&self, host: &dyn Host, message: &str) -> bool {
        host.message_box(message, &self.config.dialog_title, MessageBoxKind::YesNo)
            .is_confirmed()
    }

    pub(crate) fn show_info(&self, host: &dyn Host) {
        host.show_console_msg(&INFO);
    }

    pub(crate) fn set_action(&mut self, host: &dyn Host) {
        let initial = self.current_identifier().unwrap_or_default().to_string();
        let Some(entered) = host.prompt(&self.config.dialog_title, PROMPT_CAPTION, &initial) else {
            tracing::debug!("set action cancelled");
            return;
        };

        let action = match ConfiguredAction::resolve(host, &entered) {
            Ok(action) => action,
            Err(err) => {
                tracing::info!(%err, "rejected action identifier");
                self.action = None;
                self.scheduler.cancel_resolution();
                self.notify(host, BAD_IDENTIFIER);
                return;
            }
        };

        let replacing = match &self.action {
            Some(current) => current.command() != action.command(),
            None => self.scheduler.pending_resolution().is_some(),
        };
        if replacing {
            let previous = match &self.action {
                Some(current) => current.describe(host).summary(),
                None => initial,
            };
            let question = format!(
                "Replace {previous} with {}?",
                action.describe(host).summary()
            );
            if !self.confirm(host, &question) {
                tracing::debug!("kept previous action");
                return;
            }
        }

        self.scheduler.cancel_resolution();
        self.store(host).store_action(action.identifier());
        tracing::info!(
            identifier = action.identifier(),
            command = %action.command(),
            "action set"
        );
        self.action = Some(action);
    }

    pub(crate) fn show_action(&self, host: &dyn Host) {
        if let Some(action) = &self.action {
            self.notify(host, &action.describe(host).details());
        } else if let Some(identifier) = self.scheduler.pending_resolution() {
            let message = format!("Action id string: {identifier}\n(not resolved yet)");
            self.notify(host, &message);
        } else {
            self.notify(host, NOTHING_CONFIGURED);
        }
    }

    pub(crate) fn clear_action(&mut self, host: &dyn Host) {
        let subject = match (&self.action, self.scheduler.pending_resolution()) {
            (Some(action), _) => action.describe(host).summary(),
            (None, Some(identifier)) => identifier.to_string(),
            (None, None) => {
                self.notify(host, NOTHING_CONFIGURED);
                return;
            }
        };
        if !self.confirm(host, &format!("Clear Action: {subject}?")) {
            return;
        }

        self.action = None;
        self.scheduler.cancel_resolution();
        self.store(host).clear_action();
        tracing::info!(%subject, "action cleared");
    }

    pub(crate) fn toggle_frontmost(&mut self, host: &dyn Host) {
        let enabled = !self.scheduler.is_watching();
        if enabled {
            self.scheduler.start_watching(host.current_project());
        } else {
            self.scheduler.stop_watching();
        }
        self.store(host).store_frontmost(enabled);
        tracing::info!(enabled, "run on frontmost project change");
    }
}
