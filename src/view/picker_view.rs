use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::viewmodel::{AppViewModel, PickerViewModel};

pub fn render(frame: &mut Frame, app: &AppViewModel, vm: &PickerViewModel, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Folders
            Constraint::Length(4), // Status + keys
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::raw("Folder: "),
        Span::styled(
            vm.current_dir().display().to_string(),
            Style::default().fg(Color::Yellow),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title("diskpie: choose a folder"));
    frame.render_widget(header, chunks[0]);

    render_list(frame, vm, chunks[1]);

    let status = match (vm.error(), app.status()) {
        (Some(error), _) => Line::from(Span::styled(
            format!("Cannot list folder: {}", error),
            Style::default().fg(Color::Red),
        )),
        (None, Some(message)) => Line::from(message.to_string()),
        (None, None) => Line::from(""),
    };
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let footer = Paragraph::new(vec![
        status,
        Line::from(vec![
            key("↑/↓"), Span::raw(" nav  "),
            key("Enter"), Span::raw(" open  "),
            key("←"), Span::raw(" up  "),
            key("s/Space"), Span::raw(" scan this folder  "),
            key("."), Span::raw(" hidden  "),
            key("q"), Span::raw(" quit"),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[2]);
}

fn render_list(frame: &mut Frame, vm: &PickerViewModel, area: Rect) {
    let items: Vec<ListItem> = vm
        .entries()
        .iter()
        .map(|entry| {
            let style = if entry.is_parent {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(format!("{}/", entry.name), style)))
        })
        .collect();

    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(vm.selected_index()));
    }

    let hidden = if vm.show_hidden() { ", hidden shown" } else { "" };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Folders{}", hidden)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, area, &mut list_state);
}
