//! Spectrum panel
//!
//! Log-spaced magnitudes of the preview tone over the range the 12-bit FREQ
//! port can reach.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

const POINTS: usize = 64;
const LOW_HZ: f64 = 50.0;
const HIGH_HZ: f64 = 8_000.0;
const FLOOR_DB: f64 = -100.0;

pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    /// Hann window
    window: Vec<f32>,
    /// (frequency, FFT bin) per plotted point
    points: Vec<(f64, usize)>,
    scratch: Vec<Complex<f32>>,
    /// (frequency_hz, magnitude_db)
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(len: usize, sample_rate: f32) -> Self {
        let len = len.max(2);
        let fft = FftPlanner::new().plan_fft_forward(len);

        let denom = (len - 1) as f32;
        let window = (0..len)
            .map(|i| 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos()))
            .collect();

        let nyquist_bin = len / 2 - 1;
        let high = HIGH_HZ.min(sample_rate as f64 / 2.0);
        let points: Vec<(f64, usize)> = (0..POINTS)
            .map(|i| {
                let t = i as f64 / (POINTS - 1) as f64;
                let hz = LOW_HZ * (high / LOW_HZ).powf(t);
                let bin = (hz * len as f64 / sample_rate as f64).round() as usize;
                (hz, bin.min(nyquist_bin))
            })
            .collect();
        let spectrum = points.iter().map(|&(hz, _)| (hz, FLOOR_DB)).collect();

        Self {
            fft,
            window,
            points,
            scratch: vec![Complex::new(0.0, 0.0); len],
            spectrum,
        }
    }

    /// Recompute from `samples`; ignored unless it matches the FFT length
    pub fn update(&mut self, samples: &[f32]) {
        if samples.len() != self.window.len() {
            return;
        }

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(samples).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        // normalize so a full-scale sine peaks near 0 dB
        let scale = 4.0 / self.window.len() as f32;
        for (out, &(hz, bin)) in self.spectrum.iter_mut().zip(&self.points) {
            let magnitude = self.scratch[bin].norm() * scale;
            let db = 20.0 * (magnitude.max(1e-6) as f64).log10();
            *out = (hz, db.max(FLOOR_DB));
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)], hz: i32) {
    let block = Block::default()
        .title(format!(" Spectrum (tone {hz} Hz) "))
        .borders(Borders::ALL);

    // plot against log frequency so the points are evenly spaced
    let points: Vec<(f64, f64)> = spectrum.iter().map(|&(f, db)| (f.log10(), db)).collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([LOW_HZ.log10(), HIGH_HZ.log10()])
                .labels(vec!["50", "630", "8k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 10.0])
                .labels(vec!["-100", "-45", "10"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
