use ratatui::style::Color;

use crate::chart::PALETTE_SIZE;

/// Slice colors, indexed by `chart::color_index`
const PALETTE: [Color; PALETTE_SIZE] = [
    Color::Rgb(31, 119, 180),
    Color::Rgb(255, 127, 14),
    Color::Rgb(44, 160, 44),
    Color::Rgb(214, 39, 40),
    Color::Rgb(148, 103, 189),
    Color::Rgb(140, 86, 75),
    Color::Rgb(227, 119, 194),
    Color::Rgb(127, 127, 127),
    Color::Rgb(188, 189, 34),
    Color::Rgb(23, 190, 207),
    Color::Rgb(174, 199, 232),
    Color::Rgb(255, 187, 120),
    Color::Rgb(152, 223, 138),
    Color::Rgb(255, 152, 150),
    Color::Rgb(197, 176, 213),
    Color::Rgb(196, 156, 148),
    Color::Rgb(247, 182, 210),
    Color::Rgb(199, 199, 199),
    Color::Rgb(219, 219, 141),
    Color::Rgb(158, 218, 229),
];

/// Create a progress bar string with filled and empty blocks
pub fn bar(percent: f64, width: usize) -> String {
    let p = percent.clamp(0.0, 100.0);
    let filled = ((p / 100.0) * width as f64).round() as usize;
    "█".repeat(filled) + &"░".repeat(width.saturating_sub(filled))
}

/// Calculate percentage of a value relative to a total
pub fn percent(value: u64, total: u64) -> f64 {
    if total > 0 {
        value as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

pub fn palette_color(index: usize) -> Color {
    PALETTE[index % PALETTE_SIZE]
}

/// Color for a list row, matching its pie slice
pub fn label_color(label: &str) -> Color {
    palette_color(crate::chart::color_index(label))
}
