//! Two-phase room change: unload the current room, then load the next one.

use tracing::debug;

use crate::ports::{LoadHandle, SceneLoader};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    None,
    Unloading,
    Loading,
}

/// At most one room change in flight.
#[derive(Debug, Default)]
pub struct SceneTransition {
    state: LoadState,
    pending: Option<String>,
    handle: Option<LoadHandle>,
}

impl SceneTransition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// The room being moved to, if a change is in flight.
    pub fn pending_room(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Start moving to `room`. Returns `false` and does nothing while another
    /// change is in flight.
    pub fn request(
        &mut self,
        room: &str,
        current: Option<&str>,
        loader: &mut dyn SceneLoader,
    ) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(room.to_string());

        match current {
            Some(current) => {
                debug!(room = current, "unloading room");
                self.handle = Some(loader.unload(current));
                self.state = LoadState::Unloading;
            }
            None => self.begin_load(loader),
        }
        true
    }

    /// Check the in-flight operation. Returns the room once it has finished
    /// loading; every completion is acted on exactly once.
    pub fn poll(&mut self, loader: &mut dyn SceneLoader) -> Option<String> {
        let handle = self.handle?;
        if !loader.is_done(handle) {
            return None;
        }
        self.handle = None;

        match self.state {
            LoadState::Unloading => {
                self.begin_load(loader);
                None
            }
            LoadState::Loading => {
                self.state = LoadState::None;
                self.pending.take()
            }
            LoadState::None => None,
        }
    }

    fn begin_load(&mut self, loader: &mut dyn SceneLoader) {
        let Some(room) = self.pending.as_deref() else {
            return;
        };
        debug!(room, "loading room");
        self.handle = Some(loader.load_additive(room));
        self.state = LoadState::Loading;
    }
}
