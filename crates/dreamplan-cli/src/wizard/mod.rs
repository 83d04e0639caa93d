//! Interactive five-step questionnaire.

pub mod app;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use sqlx::PgPool;

use dreamplan_core::submit::{self, SubmissionOutcome};

use app::{App, Phase};

/// Launch the wizard. Returns the submission outcome when the user completed
/// a plan, `None` when they quit early.
pub async fn run_wizard(pool: PgPool, relay_url: String) -> Result<Option<SubmissionOutcome>> {
    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let http = reqwest::Client::new();

    let result = run_event_loop(&mut terminal, &mut app, &pool, &http, &relay_url).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    Ok(app.outcome)
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    pool: &PgPool,
    http: &reqwest::Client,
    relay_url: &str,
) -> Result<()> {
    loop {
        // Render.
        terminal.draw(|f| ui::render(f, app))?;

        // A requested submission runs to completion before the next input is
        // read -- the three side-effecting steps are strictly sequential and
        // the analyzing frame is already on screen.
        if app.phase == Phase::Submitting {
            match submit::submit_plan(pool, http, relay_url, &app.answers, &app.api_key).await {
                Ok(outcome) => {
                    app.outcome = Some(outcome);
                    app.phase = Phase::Done;
                }
                Err(e) => {
                    // Single error banner; the user may fix and re-submit,
                    // which starts the whole sequence over.
                    app.error = Some(e.to_string());
                    app.phase = Phase::Form;
                }
            }
            continue;
        }

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                handle_key(app, key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Line editor captures everything while open.
    if app.editing {
        match key.code {
            KeyCode::Enter => app.commit_edit(),
            KeyCode::Esc => app.cancel_edit(),
            KeyCode::Backspace => {
                app.input.pop();
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true;
            }
            KeyCode::Char(c) => app.input.push(c),
            _ => {}
        }
        return;
    }

    if app.phase == Phase::Done {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter) {
            app.should_quit = true;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
        }
        KeyCode::Enter => {
            app.activate();
        }
        KeyCode::Right | KeyCode::Char('n') => {
            app.next_step();
        }
        KeyCode::Left | KeyCode::Char('p') => {
            app.prev_step();
        }
        KeyCode::Char('d') => {
            app.delete_entry();
        }
        KeyCode::Char('s') => {
            app.request_submit();
        }
        KeyCode::Char('K') => {
            app.show_api_key_input = true;
        }
        _ => {}
    }
}
