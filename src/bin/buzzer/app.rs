//! Console state, key handling and the per-frame simulation step

use std::thread;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use tracing::info;

use buzzer_tone::{
    dsp::{resample::i8_to_f32, tone::ToneCursor},
    io::{converter::frequency_from_signal, DeviceOpener, Signal},
    peripheral::{BuzzerInputs, FrequencyUnit, FREQ_WIDTH},
    synth::Launcher,
    DEFAULT_FREQUENCY_HZ, SAMPLE_RATE,
};

use crate::bench::{Bench, Slot};
use crate::ui::{self, spectrum::SpectrumAnalyzer, Snapshot};

/// Samples fed to the spectrum analyzer
pub const PREVIEW_LEN: usize = 4096;
/// Samples shown by the waveform panel
pub const WAVEFORM_LEN: usize = 1024;

const FREQ_MAX: u32 = (1 << FREQ_WIDTH) - 1;
const VOL_MAX: u32 = 127;
/// How long quitting waits for workers to close their devices
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// The values currently driven onto the buzzer ports
#[derive(Debug, Clone, Copy, PartialEq)]
struct Ports {
    freq: u32,
    enable: bool,
    vol: u32,
    unit: FrequencyUnit,
    harmony: bool,
}

pub struct BuzzerApp {
    launcher: Launcher,
    bench: Bench,
    ports: Ports,
    /// Ports the preview was last rendered for
    previewed: Option<Ports>,
    preview: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    status: String,
    should_quit: bool,
}

impl BuzzerApp {
    pub fn new() -> Self {
        Self {
            launcher: Launcher::new(DeviceOpener::new()),
            bench: Bench::new(),
            ports: Ports {
                freq: DEFAULT_FREQUENCY_HZ as u32,
                enable: false,
                vol: VOL_MAX,
                unit: FrequencyUnit::Hertz,
                harmony: false,
            },
            previewed: None,
            preview: vec![0.0; PREVIEW_LEN],
            spectrum: SpectrumAnalyzer::new(PREVIEW_LEN, SAMPLE_RATE as f32),
            status: String::from("ready"),
            should_quit: false,
        }
    }

    /// Run the console until the user quits
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        info!("buzzer console started");

        while !self.should_quit {
            self.step();
            self.refresh_preview();

            let snapshot = self.snapshot();
            terminal.draw(|frame| ui::render(frame, &snapshot))?;

            // ~60 simulation steps per second
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        self.shutdown();
        Ok(())
    }

    /// Drive the current port values into both buzzers
    fn step(&mut self) {
        let Ports {
            freq,
            enable,
            vol,
            harmony,
            ..
        } = self.ports;

        let lead = BuzzerInputs {
            freq: Signal::Defined(freq),
            enable: Signal::from(enable),
            vol: Signal::Defined(vol),
        };
        // a fifth above the lead
        let fifth = BuzzerInputs {
            freq: Signal::Defined((freq * 3 / 2).min(FREQ_MAX)),
            enable: Signal::from(enable && harmony),
            vol: Signal::Defined(vol / 2),
        };

        self.bench.step(Slot::Lead, &lead, &self.launcher);
        self.bench.step(Slot::Harmony, &fifth, &self.launcher);
    }

    fn handle_key(&mut self, key: KeyCode) {
        let ports = &mut self.ports;
        let freq_step = match ports.unit {
            FrequencyUnit::Hertz => 10,
            FrequencyUnit::DeciHertz => 100,
        };

        match key {
            KeyCode::Char(' ') => ports.enable = !ports.enable,
            KeyCode::Up => ports.freq = (ports.freq + freq_step).min(FREQ_MAX),
            KeyCode::Down => ports.freq = ports.freq.saturating_sub(freq_step),
            KeyCode::Right => ports.vol = (ports.vol + 8).min(VOL_MAX),
            KeyCode::Left => ports.vol = ports.vol.saturating_sub(8),
            KeyCode::Char('u') => self.toggle_unit(),
            KeyCode::Char('h') => ports.harmony = !ports.harmony,
            KeyCode::Char('s') => {
                let stopped = self.bench.stop_all();
                // stop_all clears ENABLE inside the generators; mirror it on
                // the port so the next step does not restart them
                self.ports.enable = false;
                self.status = format!("stopped {stopped} generator(s)");
                info!(stopped, "bench stopped");
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    /// Switch between Hz and dHz, keeping the pitch where the port allows
    fn toggle_unit(&mut self) {
        let ports = &mut self.ports;
        let (unit, freq) = match ports.unit {
            FrequencyUnit::Hertz => (FrequencyUnit::DeciHertz, (ports.freq * 10).min(FREQ_MAX)),
            FrequencyUnit::DeciHertz => (FrequencyUnit::Hertz, ports.freq / 10),
        };
        ports.unit = unit;
        ports.freq = freq;
        self.bench.set_frequency_unit(unit);
        self.status = format!("FREQ unit: {unit:?}");
    }

    /// Effective lead pitch in hertz
    fn lead_hz(&self) -> i32 {
        frequency_from_signal(Signal::Defined(self.ports.freq), self.ports.unit).unwrap_or(0)
    }

    /// Re-synthesize the preview when the ports changed
    fn refresh_preview(&mut self) {
        if self.previewed == Some(self.ports) {
            return;
        }
        self.previewed = Some(self.ports);

        let mut samples = vec![0i8; PREVIEW_LEN];
        let hz = self.lead_hz();
        if self.ports.enable && hz > 0 {
            let mut tone = ToneCursor::new(SAMPLE_RATE, hz);
            tone.render(&mut samples, self.ports.vol as f32);
        }
        for (out, &sample) in self.preview.iter_mut().zip(samples.iter()) {
            *out = i8_to_f32(sample);
        }
        self.spectrum.update(&self.preview);
    }

    fn snapshot(&self) -> Snapshot<'_> {
        let budget = self.launcher.budget();
        Snapshot {
            enable: self.ports.enable,
            freq: self.ports.freq,
            unit: self.ports.unit,
            hz: self.lead_hz(),
            vol: self.ports.vol,
            harmony: self.ports.harmony,
            lead_sounding: self.bench.is_sounding(Slot::Lead),
            harmony_sounding: self.bench.is_sounding(Slot::Harmony),
            live_threads: budget.live(),
            thread_cap: budget.cap(),
            status: &self.status,
            waveform: &self.preview[..WAVEFORM_LEN],
            spectrum: self.spectrum.data(),
        }
    }

    /// Stop the bench and give workers a moment to release the device
    fn shutdown(&mut self) {
        let stopped = self.bench.stop_all();
        info!(stopped, "buzzer console quitting");

        let deadline = Instant::now() + SHUTDOWN_GRACE;
        while self.launcher.budget().live() > 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
    }
}
