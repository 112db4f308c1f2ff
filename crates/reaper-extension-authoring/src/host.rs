use std::ffi::{c_char, CStr, CString};
use std::path::PathBuf;
use std::ptr;

use reaper_sys as sys;

use crate::api::HostApi;
use crate::types::{CommandId, MessageBoxKind, MessageBoxResult, ProjectHandle};

const PROMPT_BUFFER_LEN: usize = 512;

/// Safe view of the host operations an extension may call.
///
/// Every method is expected to run on the host's main thread.
pub trait Host {
    fn show_console_msg(&self, message: &str);

    /// Single-field text prompt. `None` when the user cancels.
    fn prompt(&self, title: &str, caption: &str, initial: &str) -> Option<String>;

    fn named_command_lookup(&self, identifier: &str) -> Option<CommandId>;

    /// Identifier string for a named command, without the leading `_`.
    /// Native actions have none.
    fn reverse_named_command_lookup(&self, command: CommandId) -> Option<String>;

    /// Display name of a main-section action.
    fn command_text(&self, command: CommandId) -> Option<String>;

    fn run_command(&self, command: CommandId);

    /// Stored value, `None` when absent or empty.
    fn ext_state(&self, section: &str, key: &str) -> Option<String>;

    fn set_ext_state(&self, section: &str, key: &str, value: &str, persist: bool);

    fn delete_ext_state(&self, section: &str, key: &str, persist: bool);

    fn current_project(&self) -> Option<ProjectHandle>;

    fn message_box(&self, message: &str, title: &str, kind: MessageBoxKind) -> MessageBoxResult;

    fn resource_path(&self) -> Option<PathBuf> {
        None
    }
}

/// [`Host`] backed by the functions imported from the running host.
#[derive(Debug, Clone, Copy)]
pub struct ReaperHost {
    api: HostApi,
}

impl ReaperHost {
    pub fn new(api: HostApi) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &HostApi {
        &self.api
    }
}

fn c_string(value: &str) -> Option<CString> {
    match CString::new(value) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!(
                "not passing string with interior NUL (byte {}) to the host",
                err.nul_position()
            );
            None
        }
    }
}

unsafe fn owned_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
}

impl Host for ReaperHost {
    fn show_console_msg(&self, message: &str) {
        if let Some(message) = c_string(message) {
            unsafe { (self.api.show_console_msg)(message.as_ptr()) }
        }
    }

    fn prompt(&self, title: &str, caption: &str, initial: &str) -> Option<String> {
        let title = c_string(title)?;
        let caption = c_string(caption)?;

        // The host reads initial values from and writes results into the same buffer.
        let mut buffer = vec![0u8; PROMPT_BUFFER_LEN];
        let initial = initial.as_bytes();
        let prefill = initial
            .iter()
            .take_while(|&&byte| byte != 0)
            .take(PROMPT_BUFFER_LEN - 1)
            .count();
        buffer[..prefill].copy_from_slice(&initial[..prefill]);

        let accepted = unsafe {
            (self.api.get_user_inputs)(
                title.as_ptr(),
                1,
                caption.as_ptr(),
                buffer.as_mut_ptr() as *mut c_char,
                PROMPT_BUFFER_LEN as i32,
            )
        };
        if !accepted {
            return None;
        }

        let value = CStr::from_bytes_until_nul(&buffer).ok()?;
        Some(value.to_string_lossy().into_owned())
    }

    fn named_command_lookup(&self, identifier: &str) -> Option<CommandId> {
        let identifier = c_string(identifier)?;
        CommandId::new(unsafe { (self.api.named_command_lookup)(identifier.as_ptr()) })
    }

    fn reverse_named_command_lookup(&self, command: CommandId) -> Option<String> {
        unsafe { owned_string((self.api.reverse_named_command_lookup)(command.get())) }
            .filter(|identifier| !identifier.is_empty())
    }

    fn command_text(&self, command: CommandId) -> Option<String> {
        unsafe {
            owned_string((self.api.kbd_get_text_from_cmd)(
                command.get() as sys::DWORD,
                ptr::null_mut(),
            ))
        }
        .filter(|text| !text.is_empty())
    }

    fn run_command(&self, command: CommandId) {
        unsafe { (self.api.main_on_command)(command.get(), 0) }
    }

    fn ext_state(&self, section: &str, key: &str) -> Option<String> {
        let section = c_string(section)?;
        let key = c_string(key)?;
        unsafe { owned_string((self.api.get_ext_state)(section.as_ptr(), key.as_ptr())) }
            .filter(|value| !value.is_empty())
    }

    fn set_ext_state(&self, section: &str, key: &str, value: &str, persist: bool) {
        let (Some(section), Some(key), Some(value)) =
            (c_string(section), c_string(key), c_string(value))
        else {
            return;
        };
        unsafe {
            (self.api.set_ext_state)(section.as_ptr(), key.as_ptr(), value.as_ptr(), persist)
        }
    }

    fn delete_ext_state(&self, section: &str, key: &str, persist: bool) {
        let (Some(section), Some(key)) = (c_string(section), c_string(key)) else {
            return;
        };
        // A null value removes the key.
        unsafe { (self.api.set_ext_state)(section.as_ptr(), key.as_ptr(), ptr::null(), persist) }
    }

    fn current_project(&self) -> Option<ProjectHandle> {
        let project =
            unsafe { (self.api.enum_projects)(sys::CURRENT_PROJECT, ptr::null_mut(), 0) };
        ProjectHandle::from_ptr(project)
    }

    fn message_box(&self, message: &str, title: &str, kind: MessageBoxKind) -> MessageBoxResult {
        let (Some(message), Some(title)) = (c_string(message), c_string(title)) else {
            return MessageBoxResult::Cancel;
        };
        let raw =
            unsafe { (self.api.show_message_box)(message.as_ptr(), title.as_ptr(), kind.to_raw()) };
        MessageBoxResult::from_raw(raw)
    }

    fn resource_path(&self) -> Option<PathBuf> {
        let get_resource_path = self.api.get_resource_path?;
        unsafe { owned_string(get_resource_path()) }
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }
}
