use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Rows skipped by PageUp and PageDown
pub const PAGE_SIZE: usize = 10;

/// Check if a KeyCode is the given letter, ignoring case
pub fn key_matches(key: &KeyCode, expected: char) -> bool {
    match key {
        KeyCode::Char(c) => c.eq_ignore_ascii_case(&expected),
        _ => false,
    }
}

/// User intents derived from keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    // Navigation
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Enter,
    Back,

    // Screens
    OpenPicker,
    ShowChart,
    Dismiss,

    // Picker
    ScanHere,
    ToggleHidden,

    // Scanning
    CancelScan,

    // Chart
    RaiseThreshold,
    LowerThreshold,
    ToggleSubfolders,
    ToggleSort,
    Rescan,
    Export,

    Quit,
}

/// Screens for mapping keys to intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Picker,
    Scanning,
    Chart,
    /// A blocking message is shown on top of the screen
    Dialog,
}

fn navigation(code: &KeyCode) -> Option<Intent> {
    match code {
        KeyCode::Up => Some(Intent::MoveUp),
        KeyCode::Down => Some(Intent::MoveDown),
        KeyCode::PageUp => Some(Intent::PageUp),
        KeyCode::PageDown => Some(Intent::PageDown),
        KeyCode::Enter | KeyCode::Right => Some(Intent::Enter),
        KeyCode::Backspace | KeyCode::Left => Some(Intent::Back),
        c if key_matches(c, 'k') => Some(Intent::MoveUp),
        c if key_matches(c, 'j') => Some(Intent::MoveDown),
        c if key_matches(c, 'l') => Some(Intent::Enter),
        c if key_matches(c, 'h') => Some(Intent::Back),
        _ => None,
    }
}

/// Map a key event to a user intent for the current screen
pub fn map_key_to_intent(key: &KeyEvent, mode: ViewMode, is_at_root: bool) -> Option<Intent> {
    let code = &key.code;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key_matches(code, 'c') {
        return Some(Intent::Quit);
    }

    if mode == ViewMode::Dialog {
        return Some(Intent::Dismiss);
    }

    if key_matches(code, 'q') {
        return Some(Intent::Quit);
    }

    match mode {
        ViewMode::Picker => match code {
            KeyCode::Esc => Some(Intent::ShowChart),
            KeyCode::Char(' ') => Some(Intent::ScanHere),
            KeyCode::Char('.') => Some(Intent::ToggleHidden),
            c if key_matches(c, 's') => Some(Intent::ScanHere),
            c => navigation(c),
        },
        ViewMode::Scanning => match code {
            KeyCode::Esc => Some(Intent::CancelScan),
            c if key_matches(c, 'c') => Some(Intent::CancelScan),
            _ => None,
        },
        ViewMode::Chart => match code {
            KeyCode::Esc if is_at_root => Some(Intent::Quit),
            KeyCode::Esc => Some(Intent::Back),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Intent::RaiseThreshold),
            KeyCode::Char('-') => Some(Intent::LowerThreshold),
            c if key_matches(c, 'f') => Some(Intent::ToggleSubfolders),
            c if key_matches(c, 's') => Some(Intent::ToggleSort),
            c if key_matches(c, 'r') => Some(Intent::Rescan),
            c if key_matches(c, 'e') => Some(Intent::Export),
            c if key_matches(c, 'o') => Some(Intent::OpenPicker),
            c => navigation(c),
        },
        ViewMode::Dialog => Some(Intent::Dismiss),
    }
}
