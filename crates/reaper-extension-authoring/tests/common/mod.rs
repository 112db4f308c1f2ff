//! `extern "C"` stand-ins for the host API, backed by thread-local state.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::{c_char, c_int, c_void, CStr, CString};
use std::ptr;

use reaper_extension_authoring::sys;

pub const CURRENT_PROJECT_ADDR: usize = 0x1000;
pub const FIRST_CUSTOM_COMMAND: c_int = 40_000;

#[derive(Default)]
pub struct HostState {
    pub console: String,
    pub registrations: Vec<String>,
    pub custom_actions: Vec<String>,
    pub prompt_initial: Option<String>,
    pub prompt_reply: Option<String>,
    pub ran: Vec<c_int>,
    pub ext_state: HashMap<(String, String), CString>,
    pub persisted: Vec<bool>,
    pub message_boxes: Vec<(String, String, c_int)>,
    pub message_box_reply: c_int,
    pub missing_import: Option<&'static str>,
}

thread_local! {
    pub static HOST: RefCell<HostState> = RefCell::new(HostState {
        message_box_reply: sys::IDYES,
        ..HostState::default()
    });
}

pub fn with_host<R>(f: impl FnOnce(&mut HostState) -> R) -> R {
    HOST.with(|host| f(&mut host.borrow_mut()))
}

pub fn reset_host() {
    with_host(|host| {
        *host = HostState {
            message_box_reply: sys::IDYES,
            ..HostState::default()
        }
    });
}

unsafe fn read(ptr: *const c_char) -> String {
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

unsafe extern "C" fn show_console_msg(msg: *const c_char) {
    let msg = read(msg);
    with_host(|host| host.console.push_str(&msg));
}

unsafe extern "C" fn plugin_register(name: *const c_char, info: *mut c_void) -> c_int {
    let name = read(name);
    with_host(|host| {
        host.registrations.push(name.clone());
        if name == "custom_action" {
            let action = &*(info as *const sys::custom_action_register_t);
            host.custom_actions.push(read(action.idStr));
            FIRST_CUSTOM_COMMAND + host.custom_actions.len() as c_int - 1
        } else {
            1
        }
    })
}

unsafe extern "C" fn get_user_inputs(
    _title: *const c_char,
    _num_inputs: c_int,
    _captions: *const c_char,
    values: *mut c_char,
    values_sz: c_int,
) -> bool {
    let initial = read(values);
    with_host(|host| {
        host.prompt_initial = Some(initial);
        match host.prompt_reply.clone() {
            Some(reply) => {
                let reply = CString::new(reply).unwrap();
                let bytes = reply.as_bytes_with_nul();
                assert!(bytes.len() <= values_sz as usize);
                ptr::copy_nonoverlapping(bytes.as_ptr() as *const c_char, values, bytes.len());
                true
            }
            None => false,
        }
    })
}

unsafe extern "C" fn named_command_lookup(name: *const c_char) -> c_int {
    match read(name).as_str() {
        "1007" => 1007,
        "_SWS_ABOUT" => 55_000,
        _ => 0,
    }
}

unsafe extern "C" fn reverse_named_command_lookup(command: c_int) -> *const c_char {
    match command {
        55_000 => b"SWS_ABOUT\0".as_ptr() as *const c_char,
        _ => ptr::null(),
    }
}

unsafe extern "C" fn kbd_get_text_from_cmd(
    command: sys::DWORD,
    _section: *mut sys::KbdSectionInfo,
) -> *const c_char {
    match command {
        1007 => b"Transport: Play\0".as_ptr() as *const c_char,
        55_000 => b"SWS: About\0".as_ptr() as *const c_char,
        _ => ptr::null(),
    }
}

unsafe extern "C" fn main_on_command(command: c_int, _flag: c_int) {
    with_host(|host| host.ran.push(command));
}

unsafe extern "C" fn get_ext_state(section: *const c_char, key: *const c_char) -> *const c_char {
    let key = (read(section), read(key));
    with_host(|host| match host.ext_state.get(&key) {
        Some(value) => value.as_ptr(),
        None => b"\0".as_ptr() as *const c_char,
    })
}

unsafe extern "C" fn set_ext_state(
    section: *const c_char,
    key: *const c_char,
    value: *const c_char,
    persist: bool,
) {
    let key = (read(section), read(key));
    let value = (!value.is_null()).then(|| CStr::from_ptr(value).to_owned());
    with_host(|host| {
        host.persisted.push(persist);
        match value {
            Some(value) => {
                host.ext_state.insert(key, value);
            }
            None => {
                host.ext_state.remove(&key);
            }
        }
    });
}

unsafe extern "C" fn enum_projects(
    idx: c_int,
    _out: *mut c_char,
    _out_sz: c_int,
) -> *mut sys::ReaProject {
    if idx == sys::CURRENT_PROJECT {
        CURRENT_PROJECT_ADDR as *mut sys::ReaProject
    } else {
        ptr::null_mut()
    }
}

unsafe extern "C" fn show_message_box(
    msg: *const c_char,
    title: *const c_char,
    kind: c_int,
) -> c_int {
    let (msg, title) = (read(msg), read(title));
    with_host(|host| {
        host.message_boxes.push((msg, title, kind));
        host.message_box_reply
    })
}

pub unsafe extern "C" fn get_func(name: *const c_char) -> *mut c_void {
    let name = read(name);
    if with_host(|host| host.missing_import == Some(name.as_str())) {
        return ptr::null_mut();
    }
    match name.as_str() {
        "ShowConsoleMsg" => show_console_msg as *mut c_void,
        "plugin_register" => plugin_register as *mut c_void,
        "GetUserInputs" => get_user_inputs as *mut c_void,
        "NamedCommandLookup" => named_command_lookup as *mut c_void,
        "ReverseNamedCommandLookup" => reverse_named_command_lookup as *mut c_void,
        "kbd_getTextFromCmd" => kbd_get_text_from_cmd as *mut c_void,
        "Main_OnCommand" => main_on_command as *mut c_void,
        "GetExtState" => get_ext_state as *mut c_void,
        "SetExtState" => set_ext_state as *mut c_void,
        "EnumProjects" => enum_projects as *mut c_void,
        "ShowMessageBox" => show_message_box as *mut c_void,
        _ => ptr::null_mut(),
    }
}

pub fn plugin_info() -> sys::reaper_plugin_info_t {
    sys::reaper_plugin_info_t {
        caller_version: sys::REAPER_PLUGIN_VERSION,
        hwnd_main: ptr::null_mut(),
        Register: Some(plugin_register),
        GetFunc: Some(get_func),
    }
}
