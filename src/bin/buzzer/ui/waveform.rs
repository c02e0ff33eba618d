//! Waveform panel - the lead tone as the worker would write it

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use buzzer_tone::SAMPLE_RATE;

pub fn render_waveform(frame: &mut Frame, area: Rect, samples: &[f32]) {
    let span_ms = samples.len() as f64 * 1000.0 / SAMPLE_RATE as f64;
    let block = Block::default()
        .title(format!(" Waveform ({span_ms:.1} ms) "))
        .borders(Borders::ALL);

    let points: Vec<(f64, f64)> = samples
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64, sample as f64))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, samples.len().max(1) as f64])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
