use std::collections::HashMap;

use reaper_extension_authoring::{ActionDescriptor, CommandId, RegisteredAction};

/// Actions the extension adds to the host's action list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionCommand {
    ShowInfo,
    SetAction,
    ShowAction,
    ClearAction,
    ToggleFrontmost,
}

/// Indexed by `ExtensionCommand as usize`.
pub static ACTIONS: [ActionDescriptor; 5] = [
    ActionDescriptor {
        id: "SM72_OPLINFO",
        description: "reaper_onprojectload: Run an action on any project load",
        toggle: false,
    },
    ActionDescriptor {
        id: "SM72_OPLSETACTION",
        description: "reaper_onprojectload: Set action to run on project load",
        toggle: false,
    },
    ActionDescriptor {
        id: "SM72_OPLSHOWACTION",
        description: "reaper_onprojectload: Display action being run on project load",
        toggle: false,
    },
    ActionDescriptor {
        id: "SM72_OPLCLEARACTION",
        description: "reaper_onprojectload: Clear action on project load",
        toggle: false,
    },
    ActionDescriptor {
        id: "SM72_OPLFRONTMOST",
        description:
            "reaper_onprojectload: Toggle running action when frontmost project changes",
        toggle: true,
    },
];

impl ExtensionCommand {
    pub const ALL: [ExtensionCommand; 5] = [
        ExtensionCommand::ShowInfo,
        ExtensionCommand::SetAction,
        ExtensionCommand::ShowAction,
        ExtensionCommand::ClearAction,
        ExtensionCommand::ToggleFrontmost,
    ];

    pub fn descriptor(self) -> &'static ActionDescriptor {
        &ACTIONS[self as usize]
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|command| command.descriptor().id == id)
    }
}

/// Maps the command ids the host assigned this session back to our actions.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    by_command: HashMap<CommandId, ExtensionCommand>,
}

impl CommandTable {
    pub fn new(registered: &[RegisteredAction]) -> Self {
        let by_command = registered
            .iter()
            .filter_map(|action| {
                let command = ExtensionCommand::from_id(action.descriptor.id);
                if command.is_none() {
                    tracing::warn!(id = action.descriptor.id, "unknown action registration");
                }
                command.map(|command| (action.command, command))
            })
            .collect();
        Self { by_command }
    }

    pub fn lookup(&self, command: CommandId) -> Option<ExtensionCommand> {
        self.by_command.get(&command).copied()
    }

    pub fn command_for(&self, wanted: ExtensionCommand) -> Option<CommandId> {
        self.by_command
            .iter()
            .find(|(_, command)| **command == wanted)
            .map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.by_command.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_command.is_empty()
    }
}
