use std::f64::consts::TAU;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::chart::PieChart;
use crate::util::format_size;

use super::ui_fmt;

/// Legend rows shown under the pie
const MAX_LEGEND_ROWS: u16 = 8;

pub fn render(frame: &mut Frame, chart: &PieChart, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Usage");
    if chart.is_empty() {
        let empty = Paragraph::new("No items").block(block);
        frame.render_widget(empty, area);
        return;
    }

    let legend_rows = (chart.slices.len() as u16).min(MAX_LEGEND_ROWS);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(legend_rows + 2)])
        .split(area);

    render_pie(frame, chart, block, chunks[0]);
    render_legend(frame, chart, chunks[1], legend_rows as usize);
}

fn render_pie(frame: &mut Frame, chart: &PieChart, block: Block, area: Rect) {
    let inner_cols = area.width.saturating_sub(2).max(1);
    let inner_rows = area.height.saturating_sub(2).max(1);
    let (x_bounds, y_bounds) = bounds(inner_cols, inner_rows);
    // Braille cells hold 2x4 dots
    let groups = rasterize(
        chart,
        x_bounds,
        y_bounds,
        inner_cols as usize * 2,
        inner_rows as usize * 4,
    );
    let colors: Vec<Color> = chart
        .slices
        .iter()
        .map(|s| ui_fmt::palette_color(s.color_index))
        .collect();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            for (coords, color) in groups.iter().zip(&colors) {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
            }
        });
    frame.render_widget(canvas, area);
}

fn render_legend(frame: &mut Frame, chart: &PieChart, area: Rect, rows: usize) {
    let lines: Vec<Line> = chart
        .slices
        .iter()
        .take(rows)
        .map(|slice| {
            Line::from(vec![
                Span::styled(
                    "■ ",
                    Style::default().fg(ui_fmt::palette_color(slice.color_index)),
                ),
                Span::raw(format!(
                    "{:>5.1}% {:>10} ",
                    slice.fraction * 100.0,
                    format_size(slice.size)
                )),
                Span::raw(slice.label.clone()),
            ])
        })
        .collect();

    let legend = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(legend, area);
}

/// Canvas bounds that keep the pie round. Terminal cells are about twice
/// as tall as they are wide.
pub fn bounds(cols: u16, rows: u16) -> ([f64; 2], [f64; 2]) {
    let aspect = cols as f64 / (rows.max(1) as f64 * 2.0);
    if aspect >= 1.0 {
        ([-aspect, aspect], [-1.0, 1.0])
    } else {
        ([-1.0, 1.0], [-1.0 / aspect, 1.0 / aspect])
    }
}

/// Sample the unit disc on a `cols` x `rows` dot grid, grouping dots by slice.
/// Angles run counter-clockwise from 12 o'clock.
pub fn rasterize(
    chart: &PieChart,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    cols: usize,
    rows: usize,
) -> Vec<Vec<(f64, f64)>> {
    let mut groups = vec![Vec::new(); chart.slices.len()];
    if chart.is_empty() || cols == 0 || rows == 0 {
        return groups;
    }

    let dx = (x_bounds[1] - x_bounds[0]) / cols as f64;
    let dy = (y_bounds[1] - y_bounds[0]) / rows as f64;
    for row in 0..rows {
        let y = y_bounds[0] + (row as f64 + 0.5) * dy;
        for col in 0..cols {
            let x = x_bounds[0] + (col as f64 + 0.5) * dx;
            if x * x + y * y > 1.0 {
                continue;
            }
            let angle = (-x).atan2(y).rem_euclid(TAU);
            if let Some(index) = chart.slices.iter().position(|s| s.contains_angle(angle)) {
                groups[index].push((x, y));
            } else if let Some(last) = groups.last_mut() {
                last.push((x, y));
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_keep_circle_round() {
        let (x, y) = bounds(80, 20);
        assert_eq!(x, [-2.0, 2.0]);
        assert_eq!(y, [-1.0, 1.0]);

        let (x, y) = bounds(20, 20);
        assert_eq!(x, [-1.0, 1.0]);
        assert_eq!(y, [-2.0, 2.0]);
    }

    #[test]
    fn test_rasterize_splits_by_angle() {
        let chart = PieChart::from_pairs(&[("left", 1), ("right", 1)], 12);
        let groups = rasterize(&chart, [-1.0, 1.0], [-1.0, 1.0], 40, 40);

        assert_eq!(groups.len(), 2);
        // First half sweeps counter-clockwise from the top, so it covers the left side
        assert!(groups[0].iter().all(|(x, _)| *x <= 0.0));
        assert!(groups[1].iter().all(|(x, _)| *x >= 0.0));
        assert!(!groups[0].is_empty() && !groups[1].is_empty());
    }

    #[test]
    fn test_rasterize_empty_chart() {
        let chart = PieChart::default();
        assert!(rasterize(&chart, [-1.0, 1.0], [-1.0, 1.0], 10, 10).is_empty());
    }
}
