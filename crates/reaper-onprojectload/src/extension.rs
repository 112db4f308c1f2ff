use reaper_extension_authoring::{
    ActionDescriptor, CommandId, Extension, Host, HostEvent, RegisteredAction,
};

use crate::action::ConfiguredAction;
use crate::commands::{CommandTable, ExtensionCommand, ACTIONS};
use crate::config::ExtensionConfig;
use crate::logging;
use crate::scheduler::{ResolutionOutcome, Scheduler};
use crate::settings::PreferenceStore;

/// All state the extension keeps between host callbacks.
#[derive(Debug)]
pub struct OnProjectLoad {
    pub(crate) config: ExtensionConfig,
    pub(crate) commands: CommandTable,
    pub(crate) action: Option<ConfiguredAction>,
    pub(crate) scheduler: Scheduler,
}

impl OnProjectLoad {
    /// Reads the stored preference. The action identifier is only queued
    /// here: command lookups are not answered yet while the host is still
    /// loading extensions.
    pub fn new(host: &dyn Host, config: ExtensionConfig, actions: &[RegisteredAction]) -> Self {
        let stored = PreferenceStore::new(host, &config).load();
        let mut scheduler = Scheduler::new();
        if let Some(identifier) = stored.action {
            tracing::debug!(%identifier, "deferring action lookup");
            scheduler.request_resolution(identifier);
        }
        if stored.run_on_frontmost_change {
            scheduler.start_watching(host.current_project());
        }

        Self {
            config,
            commands: CommandTable::new(actions),
            action: None,
            scheduler,
        }
    }

    pub fn configured_action(&self) -> Option<&ConfiguredAction> {
        self.action.as_ref()
    }

    pub fn runs_on_frontmost_change(&self) -> bool {
        self.scheduler.is_watching()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    fn on_tick(&mut self, host: &dyn Host) {
        if let Some(identifier) = self.scheduler.pending_resolution().map(str::to_owned) {
            let resolved = ConfiguredAction::resolve(host, &identifier).ok();
            let outcome = self
                .scheduler
                .record_resolution(resolved.is_some(), self.config.resolve_attempt_limit);
            match outcome {
                ResolutionOutcome::Resolved => {
                    self.action = resolved;
                    tracing::info!(%identifier, "resolved stored action");
                }
                ResolutionOutcome::Retry => {
                    tracing::trace!(%identifier, "stored action not resolvable yet");
                }
                ResolutionOutcome::GaveUp => {
                    tracing::warn!(%identifier, "stored action never resolved; nothing will run");
                }
            }
        }

        // A load that also switches the frontmost project runs the action once.
        if self.scheduler.take_post_load() {
            self.run_configured(host, "project load");
            self.scheduler.rebaseline(host.current_project());
        } else if self.scheduler.is_watching()
            && self.scheduler.observe_frontmost(host.current_project())
        {
            self.run_configured(host, "frontmost project change");
        }
    }

    fn on_project_load(&mut self, is_undo: bool) {
        if self.action.is_none() && self.scheduler.pending_resolution().is_none() {
            return;
        }
        tracing::debug!(is_undo, "project load started; action runs next tick");
        self.scheduler.arm_post_load();
    }

    fn run_configured(&self, host: &dyn Host, reason: &str) {
        match &self.action {
            Some(action) => {
                tracing::debug!(
                    identifier = action.identifier(),
                    command = %action.command(),
                    reason,
                    "running action"
                );
                action.run(host);
            }
            None => tracing::debug!(reason, "no action configured"),
        }
    }

    fn on_command(&mut self, host: &dyn Host, command: ExtensionCommand) {
        match command {
            ExtensionCommand::ShowInfo => self.show_info(host),
            ExtensionCommand::SetAction => self.set_action(host),
            ExtensionCommand::ShowAction => self.show_action(host),
            ExtensionCommand::ClearAction => self.clear_action(host),
            ExtensionCommand::ToggleFrontmost => self.toggle_frontmost(host),
        }
    }
}

impl Extension for OnProjectLoad {
    const NAME: &'static str = "reaper_onprojectload";

    fn actions() -> &'static [ActionDescriptor] {
        &ACTIONS
    }

    fn before_load() {
        logging::init();
    }

    fn create(host: &dyn Host, actions: &[RegisteredAction]) -> anyhow::Result<Self> {
        let config = ExtensionConfig::load(host);
        tracing::debug!(?config, "loaded configuration");
        Ok(Self::new(host, config, actions))
    }

    fn handle(&mut self, host: &dyn Host, event: HostEvent) -> bool {
        match event {
            HostEvent::Tick => {
                self.on_tick(host);
                true
            }
            HostEvent::ProjectLoadBegin { is_undo } => {
                self.on_project_load(is_undo);
                true
            }
            HostEvent::Command(command) => match self.commands.lookup(command) {
                Some(ours) => {
                    self.on_command(host, ours);
                    true
                }
                None => false,
            },
        }
    }

    fn toggle_state(&self, command: CommandId) -> Option<bool> {
        match self.commands.lookup(command)? {
            ExtensionCommand::ToggleFrontmost => Some(self.runs_on_frontmost_change()),
            _ => None,
        }
    }

    fn wants_tick(&self) -> bool {
        self.scheduler.wants_tick()
    }

    fn shutdown(&mut self, _host: &dyn Host) {
        tracing::debug!("shutting down");
    }
}
