use std::fmt;
use std::num::NonZeroU32;

use reaper_sys as sys;

/// Host-assigned command id of an invocable action.
///
/// Ids are only valid for the running host session. The host reports "no
/// such command" as zero or a negative value, which never becomes a
/// `CommandId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(NonZeroU32);

impl CommandId {
    pub fn new(raw: i32) -> Option<Self> {
        u32::try_from(raw).ok().and_then(NonZeroU32::new).map(Self)
    }

    pub fn get(self) -> i32 {
        self.0.get() as i32
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an open project. Only meaningful for equality checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectHandle(usize);

impl ProjectHandle {
    pub fn from_ptr(project: *mut sys::ReaProject) -> Option<Self> {
        if project.is_null() {
            None
        } else {
            Some(Self(project as usize))
        }
    }

    pub const fn from_raw(address: usize) -> Self {
        Self(address)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageBoxKind {
    Ok,
    OkCancel,
    YesNo,
    YesNoCancel,
}

impl MessageBoxKind {
    pub fn to_raw(self) -> i32 {
        match self {
            MessageBoxKind::Ok => sys::MB_OK,
            MessageBoxKind::OkCancel => sys::MB_OKCANCEL,
            MessageBoxKind::YesNo => sys::MB_YESNO,
            MessageBoxKind::YesNoCancel => sys::MB_YESNOCANCEL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageBoxResult {
    Ok,
    Cancel,
    Yes,
    No,
    Other(i32),
}

impl MessageBoxResult {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            sys::IDOK => MessageBoxResult::Ok,
            sys::IDCANCEL => MessageBoxResult::Cancel,
            sys::IDYES => MessageBoxResult::Yes,
            sys::IDNO => MessageBoxResult::No,
            other => MessageBoxResult::Other(other),
        }
    }

    /// `Ok` or `Yes`.
    pub fn is_confirmed(self) -> bool {
        matches!(self, MessageBoxResult::Ok | MessageBoxResult::Yes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_command_ids_are_rejected() {
        assert_eq!(CommandId::new(0), None);
        assert_eq!(CommandId::new(-5), None);
        assert_eq!(CommandId::new(1007).map(CommandId::get), Some(1007));
    }

    #[test]
    fn null_project_has_no_handle() {
        assert_eq!(ProjectHandle::from_ptr(std::ptr::null_mut()), None);
    }

    #[test]
    fn message_box_codes_follow_win32() {
        assert_eq!(MessageBoxKind::YesNo.to_raw(), 4);
        assert_eq!(MessageBoxResult::from_raw(6), MessageBoxResult::Yes);
        assert_eq!(MessageBoxResult::from_raw(7), MessageBoxResult::No);
        assert!(!MessageBoxResult::from_raw(7).is_confirmed());
        assert_eq!(MessageBoxResult::from_raw(42), MessageBoxResult::Other(42));
    }
}
