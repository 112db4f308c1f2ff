use anyhow::Result;

use crate::host::Host;
use crate::types::CommandId;

/// A custom action the extension registers in the host's main section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDescriptor {
    /// Stable identifier string, e.g. `SM72_OPLINFO`.
    pub id: &'static str,
    /// Text shown in the host's action list.
    pub description: &'static str,
    /// Whether the action reports an on/off state. The host is only asked for
    /// toggle states when at least one registered action sets this.
    pub toggle: bool,
}

/// An action the host accepted, with the command id assigned for this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisteredAction {
    pub descriptor: &'static ActionDescriptor,
    pub command: CommandId,
}

/// Everything the host can call an extension back for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// An action was triggered. All actions share one hook, so the command
    /// may belong to someone else.
    Command(CommandId),
    /// Timer callback, fired once per host UI frame while registered.
    Tick,
    /// The host started loading project state.
    ProjectLoadBegin { is_undo: bool },
}

pub trait Extension: Send + Sized + 'static {
    /// Short name used to prefix diagnostics.
    const NAME: &'static str;

    fn actions() -> &'static [ActionDescriptor];

    /// Runs before any host function is imported.
    fn before_load() {}

    fn create(host: &dyn Host, actions: &[RegisteredAction]) -> Result<Self>;

    /// Returns `true` when the event was consumed.
    fn handle(&mut self, host: &dyn Host, event: HostEvent) -> bool;

    /// State reported for a toggle action, `None` when the command is not ours.
    fn toggle_state(&self, _command: CommandId) -> Option<bool> {
        None
    }

    /// Whether the timer callback should stay registered.
    fn wants_tick(&self) -> bool {
        false
    }

    fn shutdown(&mut self, _host: &dyn Host) {}
}
