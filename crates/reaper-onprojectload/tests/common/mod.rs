//! In-memory [`Host`] recording every call the extension makes.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;

use reaper_extension_authoring::{
    CommandId, Host, MessageBoxKind, MessageBoxResult, ProjectHandle, RegisteredAction,
};
use reaper_onprojectload::{ExtensionCommand, OnProjectLoad};

pub const FIRST_ACTION_COMMAND: i32 = 50_001;
pub const PROJECT_A: ProjectHandle = ProjectHandle::from_raw(0xA000);
pub const PROJECT_B: ProjectHandle = ProjectHandle::from_raw(0xB000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBox {
    pub message: String,
    pub title: String,
    pub kind: MessageBoxKind,
}

#[derive(Debug)]
pub struct HostState {
    pub ext_state: HashMap<(String, String), String>,
    pub persisted: Vec<bool>,
    pub prompt_replies: VecDeque<Option<String>>,
    pub prompt_initials: Vec<String>,
    pub answers: VecDeque<MessageBoxResult>,
    pub message_boxes: Vec<MessageBox>,
    pub ran: Vec<CommandId>,
    pub console: String,
    pub current_project: Option<ProjectHandle>,
    /// Named commands only resolve once the host has finished starting up.
    pub registry_ready: bool,
    pub named: HashMap<String, i32>,
    pub reverse: HashMap<i32, String>,
    pub names: HashMap<i32, String>,
}

impl Default for HostState {
    fn default() -> Self {
        let named = [("1007", 1007), ("_SWS_ABOUT", 55_000), ("_SWS_SAVEVIEW", 55_001)];
        let reverse = [(55_000, "SWS_ABOUT"), (55_001, "SWS_SAVEVIEW")];
        let names = [
            (1007, "Transport: Play"),
            (55_000, "SWS: About"),
            (55_001, "SWS: Save current arrange view"),
        ];
        Self {
            ext_state: HashMap::new(),
            persisted: Vec::new(),
            prompt_replies: VecDeque::new(),
            prompt_initials: Vec::new(),
            answers: VecDeque::new(),
            message_boxes: Vec::new(),
            ran: Vec::new(),
            console: String::new(),
            current_project: Some(PROJECT_A),
            registry_ready: true,
            named: named
                .into_iter()
                .map(|(id, command)| (id.to_string(), command))
                .collect(),
            reverse: reverse
                .into_iter()
                .map(|(command, id)| (command, id.to_string()))
                .collect(),
            names: names
                .into_iter()
                .map(|(command, name)| (command, name.to_string()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockHost {
    state: Arc<Mutex<HostState>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host still starting up: command lookups fail until [`MockHost::finish_startup`].
    pub fn starting() -> Self {
        let host = Self::new();
        host.state.lock().registry_ready = false;
        host
    }

    pub fn finish_startup(&self) {
        self.state.lock().registry_ready = true;
    }

    pub fn state(&self) -> parking_lot::MutexGuard<'_, HostState> {
        self.state.lock()
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        self.state
            .lock()
            .ext_state
            .get(&("sockmonkey72".to_string(), key.to_string()))
            .cloned()
    }

    pub fn store(&self, key: &str, value: &str) {
        self.state.lock().ext_state.insert(
            ("sockmonkey72".to_string(), key.to_string()),
            value.to_string(),
        );
    }

    pub fn reply_to_prompt(&self, reply: Option<&str>) {
        self.state
            .lock()
            .prompt_replies
            .push_back(reply.map(str::to_string));
    }

    pub fn answer(&self, answer: MessageBoxResult) {
        self.state.lock().answers.push_back(answer);
    }

    pub fn switch_to(&self, project: Option<ProjectHandle>) {
        self.state.lock().current_project = project;
    }

    pub fn ran(&self) -> Vec<i32> {
        self.state.lock().ran.iter().map(|command| command.get()).collect()
    }

    pub fn message_boxes(&self) -> Vec<MessageBox> {
        self.state.lock().message_boxes.clone()
    }

    pub fn last_message(&self) -> Option<String> {
        self.state
            .lock()
            .message_boxes
            .last()
            .map(|message_box| message_box.message.clone())
    }
}

impl Host for MockHost {
    fn show_console_msg(&self, message: &str) {
        self.state.lock().console.push_str(message);
    }

    fn prompt(&self, _title: &str, _caption: &str, initial: &str) -> Option<String> {
        let mut state = self.state.lock();
        state.prompt_initials.push(initial.to_string());
        state.prompt_replies.pop_front().flatten()
    }

    fn named_command_lookup(&self, identifier: &str) -> Option<CommandId> {
        let state = self.state.lock();
        if !state.registry_ready {
            return None;
        }
        state
            .named
            .get(identifier)
            .copied()
            .and_then(CommandId::new)
    }

    fn reverse_named_command_lookup(&self, command: CommandId) -> Option<String> {
        self.state.lock().reverse.get(&command.get()).cloned()
    }

    fn command_text(&self, command: CommandId) -> Option<String> {
        self.state.lock().names.get(&command.get()).cloned()
    }

    fn run_command(&self, command: CommandId) {
        self.state.lock().ran.push(command);
    }

    fn ext_state(&self, section: &str, key: &str) -> Option<String> {
        self.state
            .lock()
            .ext_state
            .get(&(section.to_string(), key.to_string()))
            .filter(|value| !value.is_empty())
            .cloned()
    }

    fn set_ext_state(&self, section: &str, key: &str, value: &str, persist: bool) {
        let mut state = self.state.lock();
        state
            .ext_state
            .insert((section.to_string(), key.to_string()), value.to_string());
        state.persisted.push(persist);
    }

    fn delete_ext_state(&self, section: &str, key: &str, persist: bool) {
        let mut state = self.state.lock();
        state
            .ext_state
            .remove(&(section.to_string(), key.to_string()));
        state.persisted.push(persist);
    }

    fn current_project(&self) -> Option<ProjectHandle> {
        self.state.lock().current_project
    }

    fn message_box(&self, message: &str, title: &str, kind: MessageBoxKind) -> MessageBoxResult {
        let mut state = self.state.lock();
        state.message_boxes.push(MessageBox {
            message: message.to_string(),
            title: title.to_string(),
            kind,
        });
        match kind {
            MessageBoxKind::Ok => MessageBoxResult::Ok,
            _ => state.answers.pop_front().unwrap_or(MessageBoxResult::Yes),
        }
    }
}

/// Command ids as a host would assign them, in registration order.
pub fn registered() -> Vec<RegisteredAction> {
    ExtensionCommand::ALL
        .into_iter()
        .zip(FIRST_ACTION_COMMAND..)
        .map(|(command, raw)| RegisteredAction {
            descriptor: command.descriptor(),
            command: CommandId::new(raw).unwrap(),
        })
        .collect()
}

pub fn command(which: ExtensionCommand) -> CommandId {
    let offset = ExtensionCommand::ALL
        .iter()
        .position(|candidate| *candidate == which)
        .unwrap();
    CommandId::new(FIRST_ACTION_COMMAND + offset as i32).unwrap()
}

pub fn start(host: &MockHost) -> OnProjectLoad {
    OnProjectLoad::new(host, Default::default(), &registered())
}
