#![no_std]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]

//! Raw ABI of the REAPER extension plug-in interface.
//!
//! Only the slice of `reaper_plugin.h` / `reaper_plugin_functions.h` that the
//! extension crates in this workspace touch is mirrored here. Layouts follow
//! the C headers exactly; nothing in this crate is safe to call directly.

use cty::{c_char, c_int, c_void};

/// Plug-in API version compiled into these definitions.
pub const REAPER_PLUGIN_VERSION: c_int = 0x20E;

/// Opaque project handle (`ReaProject*`).
#[repr(C)]
pub struct ReaProject {
    _private: [u8; 0],
}

/// Opaque keyboard section descriptor (`KbdSectionInfo*`).
#[repr(C)]
pub struct KbdSectionInfo {
    _private: [u8; 0],
}

/// Opaque project state serialisation context.
#[repr(C)]
pub struct ProjectStateContext {
    _private: [u8; 0],
}

#[repr(C)]
pub struct HWND__ {
    _private: [u8; 0],
}

pub type HWND = *mut HWND__;
pub type HINSTANCE = *mut c_void;
pub type DWORD = u32;

/// Structure handed to `ReaperPluginEntry`. A null pointer signals unload.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct reaper_plugin_info_t {
    pub caller_version: c_int,
    pub hwnd_main: HWND,
    pub Register:
        Option<unsafe extern "C" fn(name: *const c_char, infostruct: *mut c_void) -> c_int>,
    pub GetFunc: Option<unsafe extern "C" fn(name: *const c_char) -> *mut c_void>,
}

/// Payload for `plugin_register("custom_action", ...)`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct custom_action_register_t {
    pub uniqueSectionId: c_int,
    pub idStr: *const c_char,
    pub name: *const c_char,
    pub extra: *mut c_void,
}

/// Payload for `plugin_register("projectconfig", ...)`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct project_config_extension_t {
    pub ProcessExtensionLine: Option<
        unsafe extern "C" fn(
            line: *const c_char,
            ctx: *mut ProjectStateContext,
            isUndo: bool,
            reg: *mut project_config_extension_t,
        ) -> bool,
    >,
    pub SaveExtensionConfig: Option<
        unsafe extern "C" fn(
            ctx: *mut ProjectStateContext,
            isUndo: bool,
            reg: *mut project_config_extension_t,
        ),
    >,
    pub BeginLoadProjectState:
        Option<unsafe extern "C" fn(isUndo: bool, reg: *mut project_config_extension_t)>,
    pub userData: *mut c_void,
}

/// `void *GetFunc(const char *name)`
pub type GetFunc = unsafe extern "C" fn(name: *const c_char) -> *mut c_void;

// Callback shapes accepted by `plugin_register`.
pub type timer_callback = unsafe extern "C" fn();
pub type hookcommand2_callback = unsafe extern "C" fn(
    sec: *mut KbdSectionInfo,
    command: c_int,
    val: c_int,
    val2: c_int,
    relmode: c_int,
    hwnd: HWND,
) -> bool;
pub type toggleaction_callback = unsafe extern "C" fn(command_id: c_int) -> c_int;

// Imported API functions.
pub type ShowConsoleMsg = unsafe extern "C" fn(msg: *const c_char);
pub type plugin_register =
    unsafe extern "C" fn(name: *const c_char, infostruct: *mut c_void) -> c_int;
pub type GetUserInputs = unsafe extern "C" fn(
    title: *const c_char,
    num_inputs: c_int,
    captions_csv: *const c_char,
    retvals_csv: *mut c_char,
    retvals_csv_sz: c_int,
) -> bool;
pub type NamedCommandLookup = unsafe extern "C" fn(command_name: *const c_char) -> c_int;
pub type ReverseNamedCommandLookup = unsafe extern "C" fn(command_id: c_int) -> *const c_char;
pub type kbd_getTextFromCmd =
    unsafe extern "C" fn(cmd: DWORD, section: *mut KbdSectionInfo) -> *const c_char;
pub type Main_OnCommand = unsafe extern "C" fn(command: c_int, flag: c_int);
pub type GetExtState =
    unsafe extern "C" fn(section: *const c_char, key: *const c_char) -> *const c_char;
pub type SetExtState = unsafe extern "C" fn(
    section: *const c_char,
    key: *const c_char,
    value: *const c_char,
    persist: bool,
);
pub type EnumProjects = unsafe extern "C" fn(
    idx: c_int,
    projfnOutOptional: *mut c_char,
    projfnOutOptional_sz: c_int,
) -> *mut ReaProject;
pub type ShowMessageBox =
    unsafe extern "C" fn(msg: *const c_char, title: *const c_char, type_: c_int) -> c_int;
pub type GetResourcePath = unsafe extern "C" fn() -> *const c_char;

// `plugin_register` keys. Prefixing a key with `-` unregisters.
pub const REG_CUSTOM_ACTION: &[u8] = b"custom_action\0";
pub const UNREG_CUSTOM_ACTION: &[u8] = b"-custom_action\0";
pub const REG_HOOKCOMMAND2: &[u8] = b"hookcommand2\0";
pub const UNREG_HOOKCOMMAND2: &[u8] = b"-hookcommand2\0";
pub const REG_TOGGLEACTION: &[u8] = b"toggleaction\0";
pub const UNREG_TOGGLEACTION: &[u8] = b"-toggleaction\0";
pub const REG_TIMER: &[u8] = b"timer\0";
pub const UNREG_TIMER: &[u8] = b"-timer\0";
pub const REG_PROJECTCONFIG: &[u8] = b"projectconfig\0";
pub const UNREG_PROJECTCONFIG: &[u8] = b"-projectconfig\0";

/// Main action section.
pub const MAIN_SECTION: c_int = 0;

/// `EnumProjects` index selecting the current (frontmost) project.
pub const CURRENT_PROJECT: c_int = -1;

// `ShowMessageBox` types and return codes (Win32 values).
pub const MB_OK: c_int = 0;
pub const MB_OKCANCEL: c_int = 1;
pub const MB_YESNOCANCEL: c_int = 3;
pub const MB_YESNO: c_int = 4;
pub const IDOK: c_int = 1;
pub const IDCANCEL: c_int = 2;
pub const IDYES: c_int = 6;
pub const IDNO: c_int = 7;
