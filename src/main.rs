use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use time::OffsetDateTime;

use diskpie::cli::Cli;
use diskpie::config::Settings;
use diskpie::export::ExportDocument;
use diskpie::filter::apply_threshold;
use diskpie::input::map_key_to_intent;
use diskpie::logging;
use diskpie::scanner::{InteractiveProgress, Scanner};
use diskpie::util::format_size;
use diskpie::view::render_app;
use diskpie::viewmodel::{Action, AppViewModel};

/// How long the UI waits for a key before draining scan progress
const TICK: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli)?;

    if cli.is_headless() {
        logging::init_stderr(cli.verbose)?;
        run_headless(&cli, &settings)
    } else {
        let log_path = logging::init_file(cli.verbose)?;
        tracing::info!(log = %log_path.display(), "starting diskpie");
        run_tui(settings)
    }
}

fn run_headless(cli: &Cli, settings: &Settings) -> Result<()> {
    let root = settings
        .scan_path
        .as_deref()
        .context("A folder is required without the TUI")?;

    let progress = InteractiveProgress::new(io::stderr().is_terminal());
    let report = Scanner::new(settings.scan.clone())
        .scan(root, &progress)
        .with_context(|| format!("Failed to scan {}", root.display()))?;
    let result = apply_threshold(&report.root, &settings.filter);
    let scanned_at = OffsetDateTime::now_utc();
    let document = ExportDocument::new(
        &report.root.path,
        scanned_at,
        &settings.filter,
        &result,
        &report.skipped,
    );

    if let Some(path) = &cli.export {
        document.write_to(path)?;
        eprintln!("Wrote {}", path.display());
    }

    let mut stdout = io::stdout().lock();
    if cli.json {
        writeln!(stdout, "{}", document.to_json()?)?;
    } else if cli.print {
        for (label, size) in result.pairs() {
            let percent = if result.total > 0 {
                size as f64 / result.total as f64 * 100.0
            } else {
                0.0
            };
            writeln!(stdout, "{:>10} {:>6.1}%  {}", format_size(size), percent, label)?;
        }
        writeln!(
            stdout,
            "{:>10} total in {}, {} under the threshold in {}",
            format_size(result.total),
            report.root.path.display(),
            format_size(result.other),
            result.other_label()
        )?;
        if !report.skipped.is_empty() {
            writeln!(stdout, "{} paths could not be read", report.skipped.len())?;
        }
    }

    Ok(())
}

fn run_tui(settings: Settings) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppViewModel::new(settings);
    let result = event_loop(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppViewModel,
) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|f| render_app(f, app))?;
            dirty = false;
        }

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let mode = app.input_view_mode();
                    if let Some(intent) = map_key_to_intent(&key, mode, app.is_at_root()) {
                        match app.handle_intent(intent) {
                            Action::Quit => return Ok(()),
                            Action::Redraw => dirty = true,
                        }
                    }
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }

        // The elapsed counter ticks while scanning
        if app.poll() || app.is_scanning() {
            dirty = true;
        }
    }
}
