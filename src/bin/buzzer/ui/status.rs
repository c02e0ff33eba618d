//! Status panel - port values, worker state and the last action

use buzzer_tone::peripheral::FrequencyUnit;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Snapshot;

fn flag(on: bool) -> Span<'static> {
    if on {
        Span::styled("● on ", Style::default().fg(Color::Green))
    } else {
        Span::styled("○ off", Style::default().fg(Color::DarkGray))
    }
}

pub fn render_status(frame: &mut Frame, area: Rect, s: &Snapshot<'_>) {
    let block = Block::default().title(" buzzer ").borders(Borders::ALL);

    let unit = match s.unit {
        FrequencyUnit::Hertz => "Hz",
        FrequencyUnit::DeciHertz => "dHz",
    };

    let ports = Line::from(vec![
        Span::raw(" ENABLE "),
        flag(s.enable),
        Span::styled(
            format!("  FREQ {} {unit} ({} Hz)", s.freq, s.hz),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("  VOL {}/127", s.vol), Style::default().fg(Color::Magenta)),
        Span::raw("  harmony "),
        flag(s.harmony),
    ]);

    let threads = Line::from(vec![
        Span::raw(" lead "),
        flag(s.lead_sounding),
        Span::raw("  fifth "),
        flag(s.harmony_sounding),
        Span::styled(
            format!("  threads {}/{}", s.live_threads, s.thread_cap),
            Style::default().fg(Color::White),
        ),
        Span::styled(format!("  {}", s.status), Style::default().fg(Color::Yellow)),
    ]);

    frame.render_widget(Paragraph::new(vec![ports, threads]).block(block), area);
}
