//! Wizard rendering using ratatui.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, Wrap};

use dreamplan_core::wizard::{Step, TOTAL_STEPS};

use super::app::{App, FieldId, FieldKind, Phase};

/// Render the current wizard screen.
pub fn render(f: &mut Frame, app: &App) {
    let has_error = app.error.is_some();
    let mut constraints = vec![
        Constraint::Length(3), // progress
        Constraint::Min(5),    // form body
    ];
    if has_error {
        constraints.push(Constraint::Length(3)); // error banner
    }
    if app.editing {
        constraints.push(Constraint::Length(3)); // line editor
    }
    constraints.push(Constraint::Length(1)); // status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    render_progress(f, app, chunks[0]);

    match app.phase {
        Phase::Form => render_form(f, app, chunks[1]),
        Phase::Submitting => render_message(
            f,
            chunks[1],
            " Analyzing ",
            "Analyzing your plan...\n\nThis sends one request to the model and waits for it.",
        ),
        Phase::Done => render_message(
            f,
            chunks[1],
            " Done ",
            "Your action plan is ready.\n\nPress q to exit -- the full plan prints to the terminal.",
        ),
    }

    let mut next = 2;
    if has_error {
        render_error(f, app, chunks[next]);
        next += 1;
    }
    if app.editing {
        render_editor(f, app, chunks[next]);
        next += 1;
    }
    render_status_bar(f, app, chunks[next]);
}

fn render_progress(f: &mut Frame, app: &App, area: Rect) {
    let step = app.flow.current();
    let percent = (step.number() * 100 / TOTAL_STEPS) as u16;
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Dream Life Planner "),
        )
        .gauge_style(Style::default().fg(Color::Blue))
        .percent(percent)
        .label(format!(
            "Step {} of {} -- {}% Complete",
            step.number(),
            TOTAL_STEPS,
            percent
        ));
    f.render_widget(gauge, area);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let step = app.flow.current();

    // On the dream-life step, keep a line for the financial gap summary.
    let (table_area, summary_area) = if step == Step::DreamLife {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let rows = app.fields().into_iter().enumerate().map(|(i, field)| {
        let style = if i == app.selected_field {
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(field.label()),
            Cell::from(field_value(app, field)),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [Constraint::Length(32), Constraint::Min(20)],
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", step.title())),
    );
    f.render_widget(table, table_area);

    if let Some(summary_area) = summary_area {
        render_gap_summary(f, app, summary_area);
    }
}

fn render_gap_summary(f: &mut Frame, app: &App, area: Rect) {
    let dream = app.answers.dream_expenses.unwrap_or(0.0);
    let current = app.answers.current_expenses.unwrap_or(0.0);
    let gap = app.answers.financial_gap();
    let text = format!(
        "Dream: ${dream:.0}/month   Current: ${current:.0}/month   Gap: ${gap:.0}/month"
    );
    let style = if gap > 0.0 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Green)
    };
    let paragraph = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Financial Gap "),
    );
    f.render_widget(paragraph, area);
}

fn render_error(f: &mut Frame, app: &App, area: Rect) {
    let message = app.error.as_deref().unwrap_or_default();
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Error "));
    f.render_widget(paragraph, area);
}

fn render_editor(f: &mut Frame, app: &App, area: Rect) {
    let field = app.selected();
    let shown = match field.kind() {
        FieldKind::Secret => "\u{2022}".repeat(app.input.chars().count()),
        _ => app.input.clone(),
    };
    let paragraph = Paragraph::new(format!("{shown}\u{258c}")).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", field.label())),
    );
    f.render_widget(paragraph, area);
}

fn render_message(f: &mut Frame, area: Rect, title: &str, text: &str) {
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title.to_owned()));
    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let hints = if app.editing {
        "Enter save | Esc cancel".to_owned()
    } else {
        match app.phase {
            Phase::Form => {
                let mut parts = vec!["j/k select", "Enter edit"];
                if app.flow.can_go_back() {
                    parts.push("\u{2190} previous");
                }
                if app.flow.can_advance(&app.answers) {
                    parts.push("\u{2192} next");
                }
                if matches!(app.selected().kind(), FieldKind::List | FieldKind::CostMap) {
                    parts.push("d remove last");
                }
                if app.flow.can_submit(&app.answers) {
                    parts.push("s generate action plan");
                } else if app.flow.current() == Step::Momentum {
                    parts.push("K enter API key");
                }
                parts.push("q quit");
                parts.join(" | ")
            }
            Phase::Submitting => "waiting for the analysis relay...".to_owned(),
            Phase::Done => "q quit".to_owned(),
        }
    };
    let bar = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

/// One-line summary of a field's current value.
fn field_value(app: &App, field: FieldId) -> String {
    match field.kind() {
        FieldKind::Toggle => if app.answers.has_decided { "yes" } else { "no" }.to_owned(),
        FieldKind::FuelCycle => app
            .answers
            .motivation_fuel
            .map(|fuel| fuel.to_string())
            .unwrap_or_else(|| "(press Enter to choose)".to_owned()),
        FieldKind::Number => app
            .answers
            .current_expenses
            .map(|v| format!("${v:.0}/month"))
            .unwrap_or_else(|| "(not entered)".to_owned()),
        FieldKind::Secret => {
            if app.api_key.is_empty() {
                "(not set)".to_owned()
            } else {
                "\u{2022}".repeat(8)
            }
        }
        FieldKind::List => {
            let items = match field {
                FieldId::DailyFocus => &app.answers.daily_focus,
                FieldId::ThingsToCut => &app.answers.things_to_cut,
                _ => &app.answers.daily_wins,
            };
            if items.is_empty() {
                "(none yet)".to_owned()
            } else {
                truncate(&items.join(", "), 60)
            }
        }
        FieldKind::CostMap => {
            let costs = &app.answers.monthly_costs;
            if costs.is_empty() {
                "(none yet -- add as: name = amount)".to_owned()
            } else {
                let total: f64 = costs.values().sum();
                format!("{} items, ${total:.0}/month", costs.len())
            }
        }
        FieldKind::Text => {
            let value = match field {
                FieldId::HabitsToCut => &app.answers.habits_to_cut,
                FieldId::NewVersionDescription => &app.answers.new_version_description,
                FieldId::FuelDescription => &app.answers.fuel_description,
                FieldId::DailyFuelReminder => &app.answers.daily_fuel_reminder,
                FieldId::DreamDay => &app.answers.dream_day,
                FieldId::DreamWeek => &app.answers.dream_week,
                FieldId::IdealLiving => &app.answers.ideal_living,
                FieldId::EnvironmentChanges => &app.answers.environment_changes,
                FieldId::ProgressTrackingMethod => &app.answers.progress_tracking_method,
                FieldId::DailyPlanningRoutine => &app.answers.daily_planning_routine,
                FieldId::ActionCommitment => &app.answers.action_commitment,
                _ => &app.answers.additional_thoughts,
            };
            if value.is_empty() {
                "(empty)".to_owned()
            } else {
                truncate(value, 60)
            }
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_owned()
    } else {
        let truncated: String = text.chars().take(max).collect();
        format!("{truncated}...")
    }
}
