//! Tick-driven work: deferred identifier resolution, the post-load one-shot
//! and frontmost-project watching.
//!
//! The host offers no notification for any of these, so each is a piece of
//! state inspected once per timer tick. The timer stays registered only while
//! [`Scheduler::wants_tick`] is true.

use reaper_extension_authoring::ProjectHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingResolution {
    identifier: String,
    attempts: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WatchState {
    #[default]
    Disabled,
    Watching {
        last_seen: Option<ProjectHandle>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Resolved,
    Retry,
    GaveUp,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    resolution: Option<PendingResolution>,
    post_load_pending: bool,
    watch: WatchState,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any identifier already waiting.
    pub fn request_resolution<S: Into<String>>(&mut self, identifier: S) {
        self.resolution = Some(PendingResolution {
            identifier: identifier.into(),
            attempts: 0,
        });
    }

    pub fn cancel_resolution(&mut self) -> Option<String> {
        self.resolution.take().map(|pending| pending.identifier)
    }

    pub fn pending_resolution(&self) -> Option<&str> {
        self.resolution
            .as_ref()
            .map(|pending| pending.identifier.as_str())
    }

    /// Records one lookup attempt for the pending identifier.
    pub fn record_resolution(&mut self, resolved: bool, limit: Option<u32>) -> ResolutionOutcome {
        let Some(pending) = self.resolution.as_mut() else {
            return ResolutionOutcome::GaveUp;
        };
        if resolved {
            self.resolution = None;
            return ResolutionOutcome::Resolved;
        }
        pending.attempts = pending.attempts.saturating_add(1);
        match limit {
            Some(limit) if pending.attempts >= limit => {
                self.resolution = None;
                ResolutionOutcome::GaveUp
            }
            _ => ResolutionOutcome::Retry,
        }
    }

    /// Several loads before the next tick still run the action once.
    pub fn arm_post_load(&mut self) {
        self.post_load_pending = true;
    }

    pub fn take_post_load(&mut self) -> bool {
        std::mem::take(&mut self.post_load_pending)
    }

    pub fn post_load_pending(&self) -> bool {
        self.post_load_pending
    }

    /// `current` becomes the baseline, so enabling never fires by itself.
    pub fn start_watching(&mut self, current: Option<ProjectHandle>) {
        self.watch = WatchState::Watching { last_seen: current };
    }

    pub fn stop_watching(&mut self) {
        self.watch = WatchState::Disabled;
    }

    /// Makes `current` the new baseline without reporting a change. No-op
    /// when not watching.
    pub fn rebaseline(&mut self, current: Option<ProjectHandle>) {
        if let WatchState::Watching { last_seen } = &mut self.watch {
            *last_seen = current;
        }
    }

    pub fn is_watching(&self) -> bool {
        matches!(self.watch, WatchState::Watching { .. })
    }

    pub fn watch_state(&self) -> WatchState {
        self.watch
    }

    /// Returns `true` when watching and `current` differs from the last handle seen.
    pub fn observe_frontmost(&mut self, current: Option<ProjectHandle>) -> bool {
        match &mut self.watch {
            WatchState::Watching { last_seen } if *last_seen != current => {
                *last_seen = current;
                true
            }
            _ => false,
        }
    }

    pub fn wants_tick(&self) -> bool {
        self.resolution.is_some() || self.post_load_pending || self.is_watching()
    }
}
