use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::util::format_size;
use crate::viewmodel::{AppViewModel, SortKey, TreeViewModel};

use super::{pie_view, ui_fmt};

pub fn render(frame: &mut Frame, app: &AppViewModel, vm: &TreeViewModel, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // List + pie
            Constraint::Length(4), // Status + keys
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    render_header(frame, vm, chunks[0]);
    render_list(frame, vm, body[0]);
    pie_view::render(frame, &vm.pie(), body[1]);
    render_footer(frame, app, vm, chunks[2]);
}

fn render_header(frame: &mut Frame, vm: &TreeViewModel, area: Rect) {
    let options = vm.options();
    let level = vm.current_level();
    let scope = if options.apply_to_subfolders {
        "all levels"
    } else {
        "top level"
    };

    let header = Paragraph::new(Line::from(vec![
        Span::raw("Path: "),
        Span::styled(vm.current_path(), Style::default().fg(Color::Yellow)),
        Span::raw(format!(
            " | Total: {} | Min size: {} ({})",
            format_size(level.total),
            format_size(options.min_size),
            scope
        )),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("diskpie: {}", vm.root().path.display())),
    );
    frame.render_widget(header, area);
}

fn render_list(frame: &mut Frame, vm: &TreeViewModel, area: Rect) {
    let total_for_percent = vm.total_for_percent();
    let children = vm.visible_children();
    let num_children = children.len();

    let items: Vec<ListItem> = children
        .iter()
        .map(|row| {
            let percent = ui_fmt::percent(row.size, total_for_percent);
            let bar = ui_fmt::bar(percent, 15);
            let prefix = if row.has_children { "▸ " } else { "  " };
            let name_style = if row.is_other {
                Style::default().add_modifier(Modifier::ITALIC)
            } else if row.is_dir {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::styled("■ ", Style::default().fg(ui_fmt::label_color(&row.name))),
                Span::raw(prefix),
                Span::styled(
                    format!("{:>10}", format_size(row.size)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(" "),
                Span::styled(format!("[{}]", bar), Style::default().fg(Color::Blue)),
                Span::raw(format!(" {:>5.1}% ", percent)),
                Span::styled(row.name.clone(), name_style),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    if num_children > 0 {
        list_state.select(Some(vm.selected_index()));
    }

    let sort = match vm.sort_key() {
        SortKey::Size => "size",
        SortKey::Name => "name",
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Contents ({} items, by {})", num_children, sort)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_footer(frame: &mut Frame, app: &AppViewModel, vm: &TreeViewModel, area: Rect) {
    let level = vm.current_level();
    let skipped = app.last_scan().map_or(0, |l| l.skipped.len());
    let mut status = format!(
        "{} items | Other: {} | {} skipped",
        level.slices.len(),
        format_size(level.other),
        skipped
    );
    if let Some(message) = app.status() {
        status.push_str(" | ");
        status.push_str(message);
    }

    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let footer = Paragraph::new(vec![
        Line::from(status),
        Line::from(vec![
            key("↑/↓"), Span::raw(" nav  "),
            key("Enter"), Span::raw(" open  "),
            key("←"), Span::raw(" back  "),
            key("+/-"), Span::raw(" min size  "),
            key("f"), Span::raw(" subfolders  "),
            key("s"), Span::raw(" sort  "),
            key("r"), Span::raw(" rescan  "),
            key("e"), Span::raw(" export  "),
            key("o"), Span::raw(" open folder  "),
            key("q"), Span::raw(" quit"),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
