use std::ffi::{c_char, c_void};
use std::mem;

use reaper_sys as sys;
use thiserror::Error;

/// Failure to resolve the host functions an extension depends on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("host did not provide a function resolver")]
    MissingResolver,
    #[error("Unable to import the following API function: {0}")]
    MissingFunction(&'static str),
}

/// Host functions resolved through `GetFunc` at load time.
#[derive(Debug, Clone, Copy)]
pub struct HostApi {
    pub show_console_msg: sys::ShowConsoleMsg,
    pub plugin_register: sys::plugin_register,
    pub get_user_inputs: sys::GetUserInputs,
    pub named_command_lookup: sys::NamedCommandLookup,
    pub reverse_named_command_lookup: sys::ReverseNamedCommandLookup,
    pub kbd_get_text_from_cmd: sys::kbd_getTextFromCmd,
    pub main_on_command: sys::Main_OnCommand,
    pub get_ext_state: sys::GetExtState,
    pub set_ext_state: sys::SetExtState,
    pub enum_projects: sys::EnumProjects,
    pub show_message_box: sys::ShowMessageBox,
    pub get_resource_path: Option<sys::GetResourcePath>,
}

impl HostApi {
    /// Resolves every required function, stopping at the first one missing.
    ///
    /// # Safety
    /// `get_func` must be the resolver handed over by the host, and every
    /// non-null pointer it returns must have the signature documented by the
    /// host for that name.
    pub unsafe fn load(get_func: Option<sys::GetFunc>) -> Result<Self, ImportError> {
        let get_func = get_func.ok_or(ImportError::MissingResolver)?;

        Ok(Self {
            show_console_msg: required(get_func, b"ShowConsoleMsg\0")?,
            plugin_register: required(get_func, b"plugin_register\0")?,
            get_user_inputs: required(get_func, b"GetUserInputs\0")?,
            named_command_lookup: required(get_func, b"NamedCommandLookup\0")?,
            reverse_named_command_lookup: required(get_func, b"ReverseNamedCommandLookup\0")?,
            kbd_get_text_from_cmd: required(get_func, b"kbd_getTextFromCmd\0")?,
            main_on_command: required(get_func, b"Main_OnCommand\0")?,
            get_ext_state: required(get_func, b"GetExtState\0")?,
            set_ext_state: required(get_func, b"SetExtState\0")?,
            enum_projects: required(get_func, b"EnumProjects\0")?,
            show_message_box: required(get_func, b"ShowMessageBox\0")?,
            get_resource_path: optional(get_func, b"GetResourcePath\0"),
        })
    }
}

unsafe fn required<F: Copy>(get_func: sys::GetFunc, name: &'static [u8]) -> Result<F, ImportError> {
    optional(get_func, name).ok_or_else(|| ImportError::MissingFunction(display_name(name)))
}

unsafe fn optional<F: Copy>(get_func: sys::GetFunc, name: &'static [u8]) -> Option<F> {
    debug_assert_eq!(name.last(), Some(&0));
    debug_assert_eq!(mem::size_of::<F>(), mem::size_of::<*mut c_void>());

    let ptr = get_func(name.as_ptr() as *const c_char);
    if ptr.is_null() {
        log::debug!("host does not export {}", display_name(name));
        None
    } else {
        Some(mem::transmute_copy::<*mut c_void, F>(&ptr))
    }
}

fn display_name(name: &'static [u8]) -> &'static str {
    let trimmed = name.strip_suffix(&[0]).unwrap_or(name);
    std::str::from_utf8(trimmed).unwrap_or("<invalid>")
}
