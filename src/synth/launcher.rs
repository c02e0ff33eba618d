//! Starting and stopping synthesis workers.

use std::sync::Arc;
use std::thread;

use tracing::{debug, error, warn};

use crate::config::{GeneratorConfig, THREAD_NAME};
use crate::io::SinkOpener;

use super::budget::ThreadBudget;
use super::control::ControlChannel;
use super::engine;
use super::generator::Generator;

/// Spawns one synthesis thread per active `Generator`.
///
/// Cheap to clone; clones share the sink opener and the thread budget.
#[derive(Clone)]
pub struct Launcher {
    opener: Arc<dyn SinkOpener>,
    budget: ThreadBudget,
    config: GeneratorConfig,
}

impl Launcher {
    /// Launcher drawing from the process-wide thread budget
    pub fn new(opener: impl SinkOpener + 'static) -> Self {
        Self {
            opener: Arc::new(opener),
            budget: ThreadBudget::global(),
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_budget(mut self, budget: ThreadBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn budget(&self) -> &ThreadBudget {
        &self.budget
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Start a worker for `generator` unless one is already alive.
    ///
    /// Returns whether a thread was spawned. Reaching the thread cap is not
    /// an error: the generator simply stays silent until a later `start`
    /// finds room.
    pub fn start(&self, generator: &mut Generator) -> bool {
        if generator.is_running() {
            return false;
        }

        let Some(slot) = self.budget.try_acquire() else {
            debug!(
                live = self.budget.live(),
                cap = self.budget.cap(),
                "tone thread cap reached, generator stays silent"
            );
            return false;
        };

        generator.reap();

        let control = generator.control().clone();
        let opener = self.opener.clone();
        let config = self.config;
        let spawned = thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn(move || {
                let _slot = slot;
                run_worker(&control, opener.as_ref(), &config);
            });

        match spawned {
            Ok(handle) => {
                generator.attach(handle);
                true
            }
            Err(err) => {
                warn!("failed to spawn tone thread: {}", err);
                false
            }
        }
    }

    /// Ask the generator's worker to exit; does not wait for it
    pub fn stop(&self, generator: &Generator) {
        generator.stop();
    }
}

/// Body of a synthesis thread: open the sink, synthesize until disabled,
/// then release the sink.
///
/// While the sink drains the worker still counts as running, so a step that
/// re-enables the generator in that window spawns nothing. The worker picks
/// the tone back up itself on the same sink instead of closing it.
fn run_worker(control: &ControlChannel, opener: &dyn SinkOpener, config: &GeneratorConfig) {
    let format = config.sink_format();
    let mut sink = match opener.open(&format) {
        Ok(sink) => sink,
        Err(err) => {
            error!("Could not initialise audio: {}", err);
            return;
        }
    };
    debug!(sample_rate = format.sample_rate, "tone generator started");

    let outcome = loop {
        let outcome = engine::run(control, sink.as_mut(), format.sample_rate);
        sink.stop();
        sink.drain();
        match outcome {
            Ok(written) if control.is_enabled() => {
                debug!(written, "tone generator re-enabled while draining");
                sink.resume();
            }
            other => break other,
        }
    };

    match outcome {
        Ok(written) => debug!(written, "tone generator stopped"),
        Err(err) => warn!("tone generator lost its audio sink: {}", err),
    }
    sink.close();
}
