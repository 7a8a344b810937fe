use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Blocking error popup centered over the current screen
pub fn render(frame: &mut Frame, message: &str, area: Rect) {
    let popup = centered(area, 60, 7);
    let body = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from("Press any key to continue"),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Error")
            .border_style(Style::default().fg(Color::Red)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(body, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
