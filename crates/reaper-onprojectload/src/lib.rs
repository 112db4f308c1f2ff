//! REAPER extension that runs a user-chosen action whenever a project is
//! loaded, and optionally whenever the frontmost project tab changes.
//!
//! The action is stored by identifier string in the host's extension state
//! and looked up again on every start, since command ids of scripts and
//! third-party actions are assigned per session.

pub mod action;
pub mod commands;
pub mod config;
pub mod error;
pub mod extension;
mod handlers;
pub mod logging;
pub mod scheduler;
pub mod settings;

pub use action::{ActionDescription, ConfiguredAction};
pub use commands::{CommandTable, ExtensionCommand, ACTIONS};
pub use config::ExtensionConfig;
pub use error::ActionError;
pub use extension::OnProjectLoad;
pub use handlers::{BAD_IDENTIFIER, INFO, NOTHING_CONFIGURED, PROMPT_CAPTION};
pub use scheduler::{ResolutionOutcome, Scheduler, WatchState};
pub use settings::{PreferenceStore, StoredPreference};

reaper_extension_authoring::reaper_extension_export!(OnProjectLoad);
