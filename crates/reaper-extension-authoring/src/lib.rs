//! Helpers for exporting REAPER extension plug-ins with safe Rust wrappers.

mod api;
mod author;
pub mod export;
mod host;
mod types;

pub use reaper_sys as sys;

pub use api::{HostApi, ImportError};
pub use author::{ActionDescriptor, Extension, HostEvent, RegisteredAction};
pub use export::LoadError;
pub use host::{Host, ReaperHost};
pub use types::{CommandId, MessageBoxKind, MessageBoxResult, ProjectHandle};
