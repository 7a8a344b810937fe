use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::util::format_size;
use crate::viewmodel::ScanViewModel;

pub fn render(frame: &mut Frame, vm: &ScanViewModel, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Counters
            Constraint::Length(3), // Keys
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::raw("Scanning "),
        Span::styled(
            vm.root().display().to_string(),
            Style::default().fg(Color::Yellow),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title("diskpie"));
    frame.render_widget(header, chunks[0]);

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Current: "),
            Span::styled(vm.current_path(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
    ];
    if let Some(progress) = vm.progress() {
        lines.push(Line::from(format!("Folders: {}", progress.dirs_visited)));
        lines.push(Line::from(format!("Files:   {}", progress.files_visited)));
        lines.push(Line::from(format!("Size:    {}", format_size(progress.bytes_seen))));
    }
    lines.push(Line::from(format!(
        "Elapsed: {:.1}s",
        vm.elapsed().as_secs_f64()
    )));
    if !vm.skipped().is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Skipped: {} unreadable", vm.skipped().len()),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vm.status_line()));

    let body = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Progress"));
    frame.render_widget(body, chunks[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Esc/c", Style::default().fg(Color::Yellow)),
        Span::raw(" cancel  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" quit"),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);
}
