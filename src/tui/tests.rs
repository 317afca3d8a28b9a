// SPDX-FileCopyrightText: 2026 Flowsketch Authors
// SPDX-License-Identifier: MIT

use std::fs;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

use super::{draw, App, ExportKind, Focus};
use crate::generate::{GenerateClient, GenerateError, GenerateOutcome, GenerateWorker};
use crate::model::GENERATION_FAILED_MESSAGE;
use crate::render::{RenderEngine, RenderError, RenderTarget};
use crate::template::TemplateKey;
use crate::test_utils::TempDir;

const STUB_SVG: &str = concat!(
    "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\" height=\"10\">",
    "<rect width=\"10\" height=\"10\" fill=\"#ffffff\"/>",
    "</svg>"
);

struct StubEngine;

impl RenderEngine for StubEngine {
    fn run(&self, target: &RenderTarget) -> Result<(), RenderError> {
        if !target.has_committed_markup() {
            return Ok(());
        }
        fs::write(target.rendered_svg_path(), STUB_SVG)
            .map_err(|source| RenderError::Io { path: target.rendered_svg_path(), source })
    }
}

fn test_app(tmp: &TempDir) -> App {
    // The worker needs a spawnable endpoint, not a reachable one; no test
    // here waits on a network outcome.
    let worker = GenerateWorker::spawn(GenerateClient::new("http://127.0.0.1:1/generate-diagram"))
        .expect("spawn worker");
    let target = RenderTarget::new(tmp.path().join("region"));
    let export_dir = tmp.path().join("exports");
    fs::create_dir_all(&export_dir).unwrap();
    App::new(worker, Box::new(StubEngine), target, export_dir)
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn ctrl(app: &mut App, c: char) {
    app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

#[test]
fn typing_edits_source_and_reruns_detection() {
    let tmp = TempDir::new("tui");
    let mut app = test_app(&tmp);

    type_text(&mut app, "logi");
    assert_eq!(app.state.suggestion(), None);
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.state.source_text(), "login");
    assert_eq!(app.state.suggestion(), Some(TemplateKey::Login));
}

#[test]
fn backspace_and_enter_edit_the_source() {
    let tmp = TempDir::new("tui");
    let mut app = test_app(&tmp);

    type_text(&mut app, "ab");
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "c");
    assert_eq!(app.state.source_text(), "ab\nc");
    press(&mut app, KeyCode::Backspace);
    assert_eq!(app.state.source_text(), "ab\n");
}

#[test]
fn ctrl_t_applies_the_suggested_template() {
    let tmp = TempDir::new("tui");
    let mut app = test_app(&tmp);

    type_text(&mut app, "payment issues");
    ctrl(&mut app, 't');
    assert_eq!(app.state.source_text(), TemplateKey::Payment.template());
}

#[test]
fn ctrl_t_without_suggestion_only_toasts() {
    let tmp = TempDir::new("tui");
    let mut app = test_app(&tmp);

    type_text(&mut app, "hello world");
    ctrl(&mut app, 't');
    assert_eq!(app.state.source_text(), "hello world");
    assert!(app.active_toast().is_some());
}

#[test]
fn generation_is_a_no_op_on_whitespace_text() {
    let tmp = TempDir::new("tui");
    let mut app = test_app(&tmp);

    type_text(&mut app, "   ");
    ctrl(&mut app, 'g');
    assert!(!app.state.loading());
    assert_eq!(app.state.error(), "");
    assert_eq!(app.worker.latest_seq(), 0);
}

#[test]
fn generation_flags_loading_until_an_outcome_lands() {
    let tmp = TempDir::new("tui");
    let mut app = test_app(&tmp);

    type_text(&mut app, "User logs in");
    ctrl(&mut app, 'g');
    assert!(app.state.loading());
    assert_eq!(app.worker.latest_seq(), 1);
}

#[test]
fn fresh_outcome_commits_markup_then_renders() {
    let tmp = TempDir::new("tui");
    let mut app = test_app(&tmp);

    type_text(&mut app, "User logs in");
    ctrl(&mut app, 'g');
    app.handle_outcome(GenerateOutcome { seq: 1, result: Ok("graph TD; A-->B".to_owned()) })
        .expect("handle outcome");

    assert_eq!(app.state.markup(), "graph TD; A-->B");
    assert!(!app.state.loading());
    assert!(app.rendered);
    assert_eq!(app.target.rendered_svg().as_deref(), Some(STUB_SVG));
}

#[test]
fn stale_outcome_from_an_overlapped_request_is_dropped() {
    let tmp = TempDir::new("tui");
    let mut app = test_app(&tmp);

    type_text(&mut app, "User logs in");
    ctrl(&mut app, 'g');
    ctrl(&mut app, 'g');
    assert_eq!(app.worker.latest_seq(), 2);

    app.handle_outcome(GenerateOutcome { seq: 1, result: Ok("graph TD; OLD".to_owned()) })
        .expect("handle outcome");

    assert_eq!(app.state.markup(), "");
    assert!(app.state.loading());
    assert!(!app.rendered);
}

#[test]
fn failed_outcome_shows_the_fixed_message() {
    let tmp = TempDir::new("tui");
    let mut app = test_app(&tmp);

    type_text(&mut app, "User logs in");
    ctrl(&mut app, 'g');
    app.handle_outcome(GenerateOutcome {
        seq: 1,
        result: Err(GenerateError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        }),
    })
    .expect("handle outcome");

    assert_eq!(app.state.error(), GENERATION_FAILED_MESSAGE);
    assert_eq!(app.state.markup(), "");
    assert!(!app.state.loading());
    assert!(!app.rendered);
}

#[test]
fn file_prompt_toggles_the_active_state() {
    let tmp = TempDir::new("tui");
    let mut app = test_app(&tmp);

    ctrl(&mut app, 'o');
    assert!(app.state.prompt_active());
    assert_eq!(app.focus, Focus::FilePrompt);

    press(&mut app, KeyCode::Esc);
    assert!(!app.state.prompt_active());
    assert_eq!(app.focus, Focus::Editor);
}

#[test]
fn prompt_rejects_non_txt_files_without_state_change() {
    let tmp = TempDir::new("tui");
    let mut app = test_app(&tmp);
    let path = tmp.path().join("notes.md");
    fs::write(&path, "User logs in").unwrap();

    type_text(&mut app, "keep me");
    ctrl(&mut app, 'o');
    type_text(&mut app, &path.to_string_lossy());
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.state.error(), "Only .txt files are supported");
    assert_eq!(app.state.source_text(), "keep me");
    assert!(!app.state.prompt_active());
}

#[test]
fn prompt_loads_txt_content_and_redetects() {
    let tmp = TempDir::new("tui");
    let mut app = test_app(&tmp);
    let path = tmp.path().join("process.txt");
    fs::write(&path, "Customer adds item to cart").unwrap();

    ctrl(&mut app, 'o');
    type_text(&mut app, &path.to_string_lossy());
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.state.source_text(), "Customer adds item to cart");
    assert_eq!(app.state.suggestion(), Some(TemplateKey::Order));
    assert!(!app.state.prompt_active());
}

#[test]
fn prompt_strips_quotes_around_dropped_paths() {
    let tmp = TempDir::new("tui");
    let mut app = test_app(&tmp);
    let path = tmp.path().join("process.txt");
    fs::write(&path, "user login").unwrap();

    ctrl(&mut app, 'o');
    type_text(&mut app, &format!("'{}' ", path.display()));
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.state.source_text(), "user login");
}

#[test]
fn exports_without_a_rendered_region_produce_nothing() {
    let tmp = TempDir::new("tui");
    let mut app = test_app(&tmp);

    app.export(ExportKind::Svg);
    app.export(ExportKind::Png);
    app.export(ExportKind::Pdf);

    assert!(app.active_toast().is_none());
    assert_eq!(fs::read_dir(&app.export_dir).unwrap().count(), 0);
}

#[test]
fn svg_export_after_a_render_writes_the_artifact() {
    let tmp = TempDir::new("tui");
    let mut app = test_app(&tmp);

    type_text(&mut app, "User logs in");
    ctrl(&mut app, 'g');
    app.handle_outcome(GenerateOutcome { seq: 1, result: Ok("graph TD; A-->B".to_owned()) })
        .expect("handle outcome");

    ctrl(&mut app, 'e');
    let exported = app.export_dir.join("diagram.svg");
    assert_eq!(fs::read_to_string(exported).unwrap(), STUB_SVG);
    assert!(app.active_toast().is_some_and(|toast| toast.starts_with("Exported ")));
}

#[test]
fn ctrl_q_quits() {
    let tmp = TempDir::new("tui");
    let mut app = test_app(&tmp);

    ctrl(&mut app, 'q');
    assert!(app.should_quit);
}

#[test]
fn draw_renders_every_pane() {
    let tmp = TempDir::new("tui");
    let mut app = test_app(&tmp);
    type_text(&mut app, "user login");

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("test terminal");
    terminal.draw(|frame| draw(frame, &app)).expect("draw");

    let buffer = terminal.backend().buffer().clone();
    let mut screen = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            screen.push_str(buffer.get(x, y).symbol());
        }
        screen.push('\n');
    }
    assert!(screen.contains("Drop Zone"));
    assert!(screen.contains("Process Text"));
    assert!(screen.contains("Suggested template: LOGIN"));
    assert!(screen.contains("Diagram"));
    assert!(screen.contains("Ctrl-G"));
}
