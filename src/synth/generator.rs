use std::sync::Arc;
use std::thread::JoinHandle;

use tracing::warn;

use super::control::ControlChannel;

/// Per-peripheral generator state: the control channel and at most one
/// synthesis worker.
///
/// A `Generator` belongs to exactly one peripheral instance. It is
/// deliberately not `Clone`: a duplicated peripheral builds a new
/// `Generator` with its own channel and its own worker.
///
/// Dropping a `Generator` clears `enabled`, so a worker whose owner went
/// away winds down instead of playing forever.
#[derive(Debug, Default)]
pub struct Generator {
    control: Arc<ControlChannel>,
    worker: Option<JoinHandle<()>>,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn control(&self) -> &Arc<ControlChannel> {
        &self.control
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.control.set_enabled(enabled);
    }

    pub fn set_frequency(&self, hz: i32) {
        self.control.set_frequency(hz);
    }

    pub fn set_volume(&self, volume: f32) {
        self.control.set_volume(volume);
    }

    pub fn is_enabled(&self) -> bool {
        self.control.is_enabled()
    }

    /// True while the worker thread has not finished.
    ///
    /// A handle alone is not enough: a stopped worker leaves its handle
    /// behind until the next start replaces it.
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Ask the worker to exit. Returns immediately without joining.
    pub fn stop(&self) {
        self.control.set_enabled(false);
    }

    /// Collect a finished worker's handle so a new one can take its place
    pub(crate) fn reap(&mut self) {
        if !self.worker.as_ref().is_some_and(|h| h.is_finished()) {
            return;
        }
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                warn!("tone generator thread panicked");
            }
        }
    }

    pub(crate) fn attach(&mut self, handle: JoinHandle<()>) {
        self.worker = Some(handle);
    }
}

impl Drop for Generator {
    fn drop(&mut self) {
        self.control.set_enabled(false);
    }
}
