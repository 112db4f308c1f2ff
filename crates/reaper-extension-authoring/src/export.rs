use std::ffi::{c_char, c_int, c_void, CString};
use std::panic::{self, AssertUnwindSafe};
use std::ptr;

use parking_lot::{const_mutex, Mutex};
use reaper_sys as sys;
use thiserror::Error;

use crate::api::{HostApi, ImportError};
use crate::author::{ActionDescriptor, Extension, HostEvent, RegisteredAction};
use crate::host::ReaperHost;
use crate::types::CommandId;

/// Reasons `ReaperPluginEntry` refuses to load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("host plug-in API version {found:#x} does not match {expected:#x}")]
    VersionMismatch { expected: i32, found: i32 },
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Extension(#[from] anyhow::Error),
}

/// `extern "C"` callbacks generated by [`reaper_extension_export!`].
#[doc(hidden)]
#[derive(Clone, Copy)]
pub struct Trampolines {
    pub timer: sys::timer_callback,
    pub hook_command: sys::hookcommand2_callback,
    pub toggle_action: sys::toggleaction_callback,
    pub begin_load_project_state:
        unsafe extern "C" fn(is_undo: bool, reg: *mut sys::project_config_extension_t),
}

struct ActionRegistration {
    raw: Box<sys::custom_action_register_t>,
    _id: CString,
    _description: CString,
}

/// Everything handed to `plugin_register`, removed again on drop.
struct Registrations {
    register: sys::plugin_register,
    trampolines: Trampolines,
    project_config: Option<Box<sys::project_config_extension_t>>,
    actions: Vec<ActionRegistration>,
    command_hook: bool,
    toggle_hook: bool,
    timer: bool,
}

// The host only dereferences these pointers on its main thread, and the
// boxes they point into live exactly as long as the registration.
unsafe impl Send for Registrations {}

impl Registrations {
    fn new(register: sys::plugin_register, trampolines: Trampolines) -> Self {
        Self {
            register,
            trampolines,
            project_config: None,
            actions: Vec::new(),
            command_hook: false,
            toggle_hook: false,
            timer: false,
        }
    }

    fn call(&self, key: &'static [u8], info: *mut c_void) -> c_int {
        unsafe { (self.register)(key.as_ptr() as *const c_char, info) }
    }

    fn register_project_config(&mut self) {
        let mut config = Box::new(sys::project_config_extension_t {
            ProcessExtensionLine: None,
            SaveExtensionConfig: None,
            BeginLoadProjectState: Some(self.trampolines.begin_load_project_state),
            userData: ptr::null_mut(),
        });
        let raw = &mut *config as *mut sys::project_config_extension_t as *mut c_void;
        if self.call(sys::REG_PROJECTCONFIG, raw) == 0 {
            log::warn!("host rejected project load hook");
        }
        self.project_config = Some(config);
    }

    fn register_actions(
        &mut self,
        descriptors: &'static [ActionDescriptor],
    ) -> Vec<RegisteredAction> {
        let mut registered = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let (Ok(id), Ok(description)) = (
                CString::new(descriptor.id),
                CString::new(descriptor.description),
            ) else {
                log::error!("action {} has an interior NUL byte; skipped", descriptor.id);
                continue;
            };
            let mut raw = Box::new(sys::custom_action_register_t {
                uniqueSectionId: sys::MAIN_SECTION,
                idStr: id.as_ptr(),
                name: description.as_ptr(),
                extra: ptr::null_mut(),
            });
            let info = &mut *raw as *mut sys::custom_action_register_t as *mut c_void;
            match CommandId::new(self.call(sys::REG_CUSTOM_ACTION, info)) {
                Some(command) => {
                    log::debug!("registered {} as command {command}", descriptor.id);
                    registered.push(RegisteredAction {
                        descriptor,
                        command,
                    });
                    self.actions.push(ActionRegistration {
                        raw,
                        _id: id,
                        _description: description,
                    });
                }
                None => log::warn!("host refused to register action {}", descriptor.id),
            }
        }
        registered
    }

    /// The toggle-state hook is only installed when some action reports a state.
    fn register_hooks(&mut self, actions: &[RegisteredAction]) {
        self.call(sys::REG_HOOKCOMMAND2, self.trampolines.hook_command as *mut c_void);
        self.command_hook = true;
        if actions.iter().any(|action| action.descriptor.toggle) {
            self.call(sys::REG_TOGGLEACTION, self.trampolines.toggle_action as *mut c_void);
            self.toggle_hook = true;
        }
    }

    fn set_timer(&mut self, active: bool) {
        if active == self.timer {
            return;
        }
        let key = if active { sys::REG_TIMER } else { sys::UNREG_TIMER };
        self.call(key, self.trampolines.timer as *mut c_void);
        self.timer = active;
        log::trace!("timer {}", if active { "registered" } else { "removed" });
    }
}

impl Drop for Registrations {
    fn drop(&mut self) {
        self.set_timer(false);
        if std::mem::take(&mut self.toggle_hook) {
            self.call(sys::UNREG_TOGGLEACTION, self.trampolines.toggle_action as *mut c_void);
        }
        if std::mem::take(&mut self.command_hook) {
            self.call(sys::UNREG_HOOKCOMMAND2, self.trampolines.hook_command as *mut c_void);
        }
        for mut action in std::mem::take(&mut self.actions) {
            let info = &mut *action.raw as *mut sys::custom_action_register_t as *mut c_void;
            self.call(sys::UNREG_CUSTOM_ACTION, info);
        }
        if let Some(mut config) = self.project_config.take() {
            let raw = &mut *config as *mut sys::project_config_extension_t as *mut c_void;
            self.call(sys::UNREG_PROJECTCONFIG, raw);
        }
    }
}

struct Session<E: Extension> {
    host: ReaperHost,
    extension: E,
    registrations: Registrations,
}

impl<E: Extension> Session<E> {
    fn sync_timer(&mut self) {
        let wanted = self.extension.wants_tick();
        self.registrations.set_timer(wanted);
    }
}

/// Process-wide owner of a loaded extension.
///
/// Host callbacks arrive on the main thread one at a time, but may nest: a
/// modal dialog or an action run from inside a callback can re-enter the
/// hooks. Nested callbacks find the session locked and are ignored.
#[doc(hidden)]
pub struct Runtime<E: Extension> {
    session: Mutex<Option<Session<E>>>,
}

impl<E: Extension> Runtime<E> {
    pub const fn new() -> Self {
        Self {
            session: const_mutex(None),
        }
    }

    /// Body of `ReaperPluginEntry`.
    ///
    /// # Safety
    /// `info` must be null or point to the structure the host passed to the
    /// entry point.
    pub unsafe fn entry(
        &self,
        info: *mut sys::reaper_plugin_info_t,
        trampolines: Trampolines,
    ) -> c_int {
        let Some(info) = info.as_ref() else {
            self.unload();
            return 0;
        };

        E::before_load();
        match self.load(info, trampolines) {
            Ok(()) => 1,
            Err(err) => {
                if let LoadError::Import(import) = &err {
                    eprintln!("[{}] {import}", E::NAME);
                }
                log::error!("{} failed to load: {err}", E::NAME);
                0
            }
        }
    }

    unsafe fn load(
        &self,
        info: &sys::reaper_plugin_info_t,
        trampolines: Trampolines,
    ) -> Result<(), LoadError> {
        if info.caller_version != sys::REAPER_PLUGIN_VERSION {
            return Err(LoadError::VersionMismatch {
                expected: sys::REAPER_PLUGIN_VERSION,
                found: info.caller_version,
            });
        }

        let api = HostApi::load(info.GetFunc)?;
        let host = ReaperHost::new(api);

        // Replace a previous instance rather than registering everything twice.
        self.unload();

        let mut registrations = Registrations::new(api.plugin_register, trampolines);
        registrations.register_project_config();
        let actions = registrations.register_actions(E::actions());
        registrations.register_hooks(&actions);

        let extension = E::create(&host, &actions)?;
        let mut session = Session {
            host,
            extension,
            registrations,
        };
        session.sync_timer();
        *self.session.lock() = Some(session);
        log::info!("{} loaded with {} actions", E::NAME, actions.len());
        Ok(())
    }

    pub fn unload(&self) {
        let Some(mut session) = self.session.lock().take() else {
            return;
        };
        let host = &session.host;
        let extension = &mut session.extension;
        if panic::catch_unwind(AssertUnwindSafe(|| extension.shutdown(host))).is_err() {
            log::error!("{} panicked during shutdown", E::NAME);
        }
        drop(session);
        log::info!("{} unloaded", E::NAME);
    }

    pub fn dispatch(&self, event: HostEvent) -> bool {
        let Some(mut guard) = self.session.try_lock() else {
            log::debug!("ignoring re-entrant {event:?}");
            return false;
        };
        let Some(session) = guard.as_mut() else {
            return false;
        };

        let host = &session.host;
        let extension = &mut session.extension;
        let handled = panic::catch_unwind(AssertUnwindSafe(|| extension.handle(host, event)))
            .unwrap_or_else(|_| {
                log::error!("{} panicked while handling {event:?}", E::NAME);
                false
            });
        session.sync_timer();
        handled
    }

    pub fn command(&self, raw: c_int) -> bool {
        match CommandId::new(raw) {
            Some(command) => self.dispatch(HostEvent::Command(command)),
            None => false,
        }
    }

    pub fn toggle_state(&self, raw: c_int) -> c_int {
        let Some(command) = CommandId::new(raw) else {
            return -1;
        };
        let Some(guard) = self.session.try_lock() else {
            return -1;
        };
        match guard
            .as_ref()
            .and_then(|session| session.extension.toggle_state(command))
        {
            Some(on) => c_int::from(on),
            None => -1,
        }
    }
}

/// Exports `ReaperPluginEntry` and the host callbacks for an [`Extension`].
///
/// [`Extension`]: crate::Extension
#[macro_export]
macro_rules! reaper_extension_export {
    ($extension:ty) => {
        static __REAPER_EXTENSION: $crate::export::Runtime<$extension> =
            $crate::export::Runtime::new();

        unsafe extern "C" fn __reaper_extension_timer() {
            __REAPER_EXTENSION.dispatch($crate::HostEvent::Tick);
        }

        unsafe extern "C" fn __reaper_extension_hook_command(
            _section: *mut $crate::sys::KbdSectionInfo,
            command: ::core::ffi::c_int,
            _val: ::core::ffi::c_int,
            _val2: ::core::ffi::c_int,
            _relmode: ::core::ffi::c_int,
            _hwnd: $crate::sys::HWND,
        ) -> bool {
            __REAPER_EXTENSION.command(command)
        }

        unsafe extern "C" fn __reaper_extension_toggle_action(
            command: ::core::ffi::c_int,
        ) -> ::core::ffi::c_int {
            __REAPER_EXTENSION.toggle_state(command)
        }

        unsafe extern "C" fn __reaper_extension_begin_load(
            is_undo: bool,
            _reg: *mut $crate::sys::project_config_extension_t,
        ) {
            __REAPER_EXTENSION.dispatch($crate::HostEvent::ProjectLoadBegin { is_undo });
        }

        #[allow(non_snake_case)]
        #[no_mangle]
        pub unsafe extern "C" fn ReaperPluginEntry(
            _instance: $crate::sys::HINSTANCE,
            info: *mut $crate::sys::reaper_plugin_info_t,
        ) -> ::core::ffi::c_int {
            __REAPER_EXTENSION.entry(
                info,
                $crate::export::Trampolines {
                    timer: __reaper_extension_timer,
                    hook_command: __reaper_extension_hook_command,
                    toggle_action: __reaper_extension_toggle_action,
                    begin_load_project_state: __reaper_extension_begin_load,
                },
            )
        }
    };
}
