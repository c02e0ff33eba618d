//! Console layout: status, waveform, spectrum and help bar

pub mod spectrum;
mod status;
mod waveform;

use buzzer_tone::peripheral::FrequencyUnit;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use spectrum::render_spectrum;
use status::render_status;
use waveform::render_waveform;

const HELP: &str =
    " [Space] Enable  [↑/↓] Freq  [←/→] Vol  [U] Hz/dHz  [H] Harmony  [S] Stop all  [Q] Quit";

/// Everything one frame draws, borrowed from the app
pub struct Snapshot<'a> {
    pub enable: bool,
    /// Raw FREQ port value
    pub freq: u32,
    pub unit: FrequencyUnit,
    /// FREQ after unit conversion
    pub hz: i32,
    pub vol: u32,
    pub harmony: bool,
    pub lead_sounding: bool,
    pub harmony_sounding: bool,
    pub live_threads: usize,
    pub thread_cap: usize,
    pub status: &'a str,
    pub waveform: &'a [f32],
    pub spectrum: &'a [(f64, f64)],
}

pub fn render(frame: &mut Frame, snapshot: &Snapshot<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Status
            Constraint::Min(8),    // Waveform
            Constraint::Min(8),    // Spectrum
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    render_status(frame, chunks[0], snapshot);
    render_waveform(frame, chunks[1], snapshot.waveform);
    render_spectrum(frame, chunks[2], snapshot.spectrum, snapshot.hz);

    let help = Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}
