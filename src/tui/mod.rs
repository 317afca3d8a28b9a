// SPDX-FileCopyrightText: 2026 Flowsketch Authors
// SPDX-License-Identifier: MIT

//! Terminal UI.
//!
//! Interactive shell (ratatui + crossterm): a drop zone with a file prompt, a
//! process-text editor, the template suggestion banner, generation status, and
//! export shortcuts. All state changes go through the [`AppState`] transition
//! functions; the 250 ms poll loop also drains generation outcomes so the UI
//! thread never blocks on the network.

use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::export::{export_pdf, export_png, export_svg};
use crate::generate::{GenerateClient, GenerateOutcome, GenerateWorker};
use crate::ingest::load_text_file;
use crate::model::AppState;
use crate::render::{MermaidCli, RenderEngine, RenderError, RenderTarget};

mod theme;
#[cfg(test)]
mod tests;

use theme::TuiTheme;

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const TOAST_TTL: Duration = Duration::from_secs(4);

/// Everything `main` resolves before handing control to the TUI.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub endpoint: String,
    pub export_dir: PathBuf,
    pub render_command: String,
}

/// Runs the interactive terminal UI until quit.
///
/// Rendering-engine faults are not caught: a [`RenderError`] propagates out
/// of the loop and ends the run.
pub fn run(options: RunOptions) -> Result<(), Box<dyn Error>> {
    let client = GenerateClient::new(options.endpoint);
    let worker = GenerateWorker::spawn(client)?;
    let engine = MermaidCli::new(options.render_command);
    let target = RenderTarget::new(
        std::env::temp_dir().join(format!("flowsketch-render-{}", std::process::id())),
    );

    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(worker, Box::new(engine), target, options.export_dir);

    while !app.should_quit {
        app.poll_generation()?;
        terminal.draw(|frame| draw(frame, &app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Editor,
    FilePrompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportKind {
    Svg,
    Png,
    Pdf,
}

#[derive(Debug)]
struct Toast {
    message: String,
    created_at: Instant,
}

struct App {
    state: AppState,
    focus: Focus,
    prompt_input: String,
    worker: GenerateWorker,
    engine: Box<dyn RenderEngine>,
    target: RenderTarget,
    export_dir: PathBuf,
    theme: TuiTheme,
    toast: Option<Toast>,
    rendered: bool,
    should_quit: bool,
}

impl App {
    fn new(
        worker: GenerateWorker,
        engine: Box<dyn RenderEngine>,
        target: RenderTarget,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            state: AppState::default(),
            focus: Focus::Editor,
            prompt_input: String::new(),
            worker,
            engine,
            target,
            export_dir,
            theme: TuiTheme,
            toast: None,
            rendered: false,
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('g') => self.trigger_generation(),
                KeyCode::Char('t') => self.apply_suggested_template(),
                KeyCode::Char('o') => self.open_file_prompt(),
                KeyCode::Char('e') => self.export(ExportKind::Svg),
                KeyCode::Char('r') => self.export(ExportKind::Png),
                KeyCode::Char('p') => self.export(ExportKind::Pdf),
                _ => {}
            }
            return;
        }

        match self.focus {
            Focus::Editor => self.handle_editor_key(key.code),
            Focus::FilePrompt => self.handle_prompt_key(key.code),
        }
    }

    fn handle_editor_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.edit_source(|text| text.push(c)),
            KeyCode::Enter => self.edit_source(|text| text.push('\n')),
            KeyCode::Backspace => self.edit_source(|text| {
                text.pop();
            }),
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn edit_source(&mut self, edit: impl FnOnce(&mut String)) {
        let mut text = self.state.source_text().to_owned();
        edit(&mut text);
        self.state.edit_source(text);
    }

    fn handle_prompt_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.prompt_input.push(c),
            KeyCode::Backspace => {
                self.prompt_input.pop();
            }
            KeyCode::Esc => {
                self.prompt_input.clear();
                self.state.close_prompt();
                self.focus = Focus::Editor;
            }
            KeyCode::Enter => self.submit_file_prompt(),
            _ => {}
        }
    }

    fn open_file_prompt(&mut self) {
        self.prompt_input.clear();
        self.state.open_prompt();
        self.focus = Focus::FilePrompt;
    }

    fn submit_file_prompt(&mut self) {
        let raw = std::mem::take(&mut self.prompt_input);
        // The prompt deactivates before the read, whatever its outcome.
        self.state.close_prompt();
        self.focus = Focus::Editor;

        // Terminals wrap dropped paths with spaces in quotes.
        let path = raw.trim().trim_matches('\'').trim_matches('"').to_owned();
        if path.is_empty() {
            return;
        }

        match load_text_file(std::path::Path::new(&path)) {
            Ok(text) => {
                self.state.load_file_text(text);
                self.set_toast(format!("Loaded {path}"));
            }
            Err(err) => self.state.set_input_error(err.to_string()),
        }
    }

    fn trigger_generation(&mut self) {
        // Silent no-op on empty or whitespace-only text.
        if self.state.begin_generation() {
            self.worker.submit(self.state.source_text().to_owned());
        }
    }

    fn apply_suggested_template(&mut self) {
        if !self.state.apply_template() {
            self.set_toast("No template suggestion to apply");
        }
    }

    /// Drains finished generation requests and re-renders on success.
    fn poll_generation(&mut self) -> Result<(), RenderError> {
        while let Some(outcome) = self.worker.try_recv() {
            self.handle_outcome(outcome)?;
        }
        Ok(())
    }

    fn handle_outcome(&mut self, outcome: GenerateOutcome) -> Result<(), RenderError> {
        if outcome.seq != self.worker.latest_seq() {
            // Stale response from an overlapped request; the newest one wins.
            return Ok(());
        }
        let succeeded = outcome.result.is_ok();
        self.state.finish_generation(outcome.result);
        if succeeded {
            // Markup-committed signal: the engine scans the target only after
            // the new markup is on disk.
            self.target.commit(self.state.markup())?;
            self.engine.run(&self.target)?;
            self.rendered = self.target.rendered_svg().is_some();
        }
        Ok(())
    }

    fn export(&mut self, kind: ExportKind) {
        let result = match kind {
            ExportKind::Svg => export_svg(&self.target, &self.export_dir),
            ExportKind::Png => export_png(&self.target, &self.export_dir),
            ExportKind::Pdf => export_pdf(&self.target, &self.export_dir),
        };
        match result {
            Ok(Some(path)) => self.set_toast(format!("Exported {}", path.display())),
            // No rendered diagram region: silently no export artifact.
            Ok(None) => {}
            Err(err) => self.set_toast(format!("Export failed: {err}")),
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast { message: message.into(), created_at: Instant::now() });
    }

    fn active_toast(&self) -> Option<&str> {
        self.toast
            .as_ref()
            .filter(|toast| toast.created_at.elapsed() < TOAST_TTL)
            .map(|toast| toast.message.as_str())
    }
}

fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // drop zone / file prompt
            Constraint::Length(8), // process text editor
            Constraint::Length(2), // suggestion + status
            Constraint::Min(0),    // diagram
            Constraint::Length(1), // footer
        ])
        .split(area);

    draw_drop_zone(frame, app, layout[0]);
    draw_editor(frame, app, layout[1]);
    draw_status(frame, app, layout[2]);
    draw_diagram(frame, app, layout[3]);
    draw_footer(frame, app, layout[4]);
}

fn draw_drop_zone(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let active = app.state.prompt_active();
    let content = if active {
        Line::from(format!("{}_", app.prompt_input))
    } else {
        Line::from("Ctrl-O, then drop or type a .txt file path")
    };
    let zone = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .title(if active { "Drop Zone (active)" } else { "Drop Zone" })
            .border_style(app.theme.drop_zone_style(active)),
    );
    frame.render_widget(zone, area);
}

fn draw_editor(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let focused = app.focus == Focus::Editor;
    let editor = Paragraph::new(app.state.source_text())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Process Text")
                .border_style(app.theme.panel_border_style(focused)),
        );
    frame.render_widget(editor, area);
}

fn draw_status(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let suggestion_line = match app.state.suggestion() {
        Some(key) => Line::from(vec![
            Span::raw("Suggested template: "),
            Span::styled(key.label(), app.theme.suggestion_style()),
            Span::raw("  (Ctrl-T applies)"),
        ]),
        None => Line::from(""),
    };

    let status_line = if app.state.loading() {
        Line::from(Span::styled("Generating...", app.theme.loading_style()))
    } else if !app.state.error().is_empty() {
        Line::from(Span::styled(app.state.error().to_owned(), app.theme.error_style()))
    } else if let Some(toast) = app.active_toast() {
        Line::from(Span::styled(toast.to_owned(), app.theme.toast_style()))
    } else {
        Line::from("")
    };

    frame.render_widget(Paragraph::new(vec![suggestion_line, status_line]), area);
}

fn draw_diagram(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = if app.rendered { "Diagram (rendered)" } else { "Diagram" };
    let body = if app.state.markup().is_empty() {
        "No diagram yet. Ctrl-G generates one from the process text.".to_owned()
    } else if app.rendered {
        format!("{}\n\nSVG: {}", app.state.markup(), app.target.rendered_svg_path().display())
    } else {
        app.state.markup().to_owned()
    };
    let diagram = Paragraph::new(body).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(app.theme.panel_border_style(false)),
    );
    frame.render_widget(diagram, area);
}

fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let hints = [
        ("Ctrl-G", "Generate"),
        ("Ctrl-O", "Open"),
        ("Ctrl-T", "Template"),
        ("Ctrl-E", "SVG"),
        ("Ctrl-R", "PNG"),
        ("Ctrl-P", "PDF"),
        ("Ctrl-Q", "Quit"),
    ];
    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(key, app.theme.footer_key_style()));
        spans.push(Span::styled(format!(" {label}  "), app.theme.footer_label_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}
