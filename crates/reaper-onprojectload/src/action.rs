use reaper_extension_authoring::{CommandId, Host};

use crate::error::ActionError;

/// The host action run on project load, kept both as the identifier string
/// the user entered and as the command id it resolved to.
///
/// Only the identifier is persisted: command ids of scripts and extension
/// actions change between host sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguredAction {
    identifier: String,
    command: CommandId,
}

impl ConfiguredAction {
    pub fn resolve(host: &dyn Host, identifier: &str) -> Result<Self, ActionError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ActionError::Empty);
        }
        let command = host
            .named_command_lookup(identifier)
            .ok_or_else(|| ActionError::Unresolved(identifier.to_string()))?;
        Ok(Self {
            identifier: identifier.to_string(),
            command,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn command(&self) -> CommandId {
        self.command
    }

    pub fn run(&self, host: &dyn Host) {
        host.run_command(self.command);
    }

    pub fn describe(&self, host: &dyn Host) -> ActionDescription {
        // Native actions have no named identifier; their numeric string is the identifier.
        let identifier = match host.reverse_named_command_lookup(self.command) {
            Some(named) if named.starts_with('_') => named,
            Some(named) => format!("_{named}"),
            None => self.identifier.clone(),
        };
        ActionDescription {
            name: host.command_text(self.command),
            identifier,
            command: self.command,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescription {
    pub name: Option<String>,
    pub identifier: String,
    pub command: CommandId,
}

impl ActionDescription {
    /// `name (identifier)`, or just the identifier for unnamed actions.
    pub fn summary(&self) -> String {
        match &self.name {
            Some(name) => format!("{name} ({})", self.identifier),
            None => self.identifier.clone(),
        }
    }

    pub fn details(&self) -> String {
        format!(
            "Action name: {}\nAction id string: {}\nAction cmd id: {}",
            self.name.as_deref().unwrap_or("<unnamed>"),
            self.identifier,
            self.command
        )
    }
}
