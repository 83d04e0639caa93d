//! Wizard application state and update logic.
//!
//! Pure state transitions live here so they stay testable without a
//! terminal; `mod.rs` owns the event loop and `ui.rs` the rendering.

use dreamplan_core::answers::AnswerSet;
use dreamplan_core::submit::SubmissionOutcome;
use dreamplan_core::wizard::{MISSING_KEY_PROMPT, Step, WizardFlow};
use dreamplan_db::models::MotivationFuel;

/// One editable entry on a wizard screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    // Step 1
    HasDecided,
    HabitsToCut,
    NewVersionDescription,
    // Step 2
    MotivationFuel,
    FuelDescription,
    DailyFuelReminder,
    // Step 3
    DreamDay,
    DreamWeek,
    IdealLiving,
    MonthlyCosts,
    CurrentExpenses,
    // Step 4
    DailyFocus,
    ThingsToCut,
    EnvironmentChanges,
    // Step 5
    ProgressTrackingMethod,
    DailyWins,
    DailyPlanningRoutine,
    ActionCommitment,
    AdditionalThoughts,
    ApiKey,
}

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Yes/no flag, toggled in place.
    Toggle,
    /// Pain/pleasure/both selector, cycled in place.
    FuelCycle,
    /// Free text line.
    Text,
    /// Optional dollar amount; blank input clears it back to "not entered".
    Number,
    /// String list; committing an entry appends it.
    List,
    /// `name = amount` line items; committing adds or replaces one.
    CostMap,
    /// The API key: free text, rendered masked.
    Secret,
}

impl FieldId {
    pub fn kind(self) -> FieldKind {
        match self {
            Self::HasDecided => FieldKind::Toggle,
            Self::MotivationFuel => FieldKind::FuelCycle,
            Self::MonthlyCosts => FieldKind::CostMap,
            Self::CurrentExpenses => FieldKind::Number,
            Self::DailyFocus | Self::ThingsToCut | Self::DailyWins => FieldKind::List,
            Self::ApiKey => FieldKind::Secret,
            _ => FieldKind::Text,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::HasDecided => "I have truly decided to change",
            Self::HabitsToCut => "Habits to cut off",
            Self::NewVersionDescription => "The new version of me",
            Self::MotivationFuel => "Fuel type",
            Self::FuelDescription => "Fuel description",
            Self::DailyFuelReminder => "Daily reminder method",
            Self::DreamDay => "Dream day",
            Self::DreamWeek => "Dream week",
            Self::IdealLiving => "Ideal living situation",
            Self::MonthlyCosts => "Dream lifestyle monthly costs",
            Self::CurrentExpenses => "Current monthly expenses",
            Self::DailyFocus => "Daily focus areas",
            Self::ThingsToCut => "Things to cut out",
            Self::EnvironmentChanges => "Environment changes",
            Self::ProgressTrackingMethod => "Progress tracking method",
            Self::DailyWins => "Daily wins to celebrate",
            Self::DailyPlanningRoutine => "Daily planning routine",
            Self::ActionCommitment => "Action commitment",
            Self::AdditionalThoughts => "Additional thoughts",
            Self::ApiKey => "Anthropic API key",
        }
    }
}

/// Which screen the wizard is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Form,
    Submitting,
    Done,
}

/// Application state for the wizard TUI.
pub struct App {
    pub answers: AnswerSet,
    pub flow: WizardFlow,
    pub selected_field: usize,
    pub editing: bool,
    pub input: String,
    pub api_key: String,
    pub show_api_key_input: bool,
    pub error: Option<String>,
    pub phase: Phase,
    pub outcome: Option<SubmissionOutcome>,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            answers: AnswerSet::default(),
            flow: WizardFlow::new(),
            selected_field: 0,
            editing: false,
            input: String::new(),
            api_key: String::new(),
            show_api_key_input: false,
            error: None,
            phase: Phase::Form,
            outcome: None,
            should_quit: false,
        }
    }

    /// The fields shown on the current step, in display order.
    pub fn fields(&self) -> Vec<FieldId> {
        let mut fields = match self.flow.current() {
            Step::Decision => vec![
                FieldId::HasDecided,
                FieldId::HabitsToCut,
                FieldId::NewVersionDescription,
            ],
            Step::Fuel => vec![
                FieldId::MotivationFuel,
                FieldId::FuelDescription,
                FieldId::DailyFuelReminder,
            ],
            Step::DreamLife => vec![
                FieldId::DreamDay,
                FieldId::DreamWeek,
                FieldId::IdealLiving,
                FieldId::MonthlyCosts,
                FieldId::CurrentExpenses,
            ],
            Step::Focus => vec![
                FieldId::DailyFocus,
                FieldId::ThingsToCut,
                FieldId::EnvironmentChanges,
            ],
            Step::Momentum => vec![
                FieldId::ProgressTrackingMethod,
                FieldId::DailyWins,
                FieldId::DailyPlanningRoutine,
                FieldId::ActionCommitment,
                FieldId::AdditionalThoughts,
            ],
        };
        if self.flow.current() == Step::Momentum && self.show_api_key_input {
            fields.push(FieldId::ApiKey);
        }
        fields
    }

    pub fn selected(&self) -> FieldId {
        let fields = self.fields();
        fields[self.selected_field.min(fields.len() - 1)]
    }

    // -- Navigation --

    pub fn move_up(&mut self) {
        if self.selected_field > 0 {
            self.selected_field -= 1;
        }
    }

    pub fn move_down(&mut self) {
        let last = self.fields().len() - 1;
        if self.selected_field < last {
            self.selected_field += 1;
        }
    }

    pub fn next_step(&mut self) {
        if self.flow.advance(&self.answers) {
            self.selected_field = 0;
            self.error = None;
        }
    }

    pub fn prev_step(&mut self) {
        if self.flow.back() {
            self.selected_field = 0;
            self.error = None;
        }
    }

    // -- Field editing --

    /// Borrow the text backing a [`FieldKind::Text`] field.
    fn text_field_mut(&mut self, field: FieldId) -> Option<&mut String> {
        let answers = &mut self.answers;
        let target = match field {
            FieldId::HabitsToCut => &mut answers.habits_to_cut,
            FieldId::NewVersionDescription => &mut answers.new_version_description,
            FieldId::FuelDescription => &mut answers.fuel_description,
            FieldId::DailyFuelReminder => &mut answers.daily_fuel_reminder,
            FieldId::DreamDay => &mut answers.dream_day,
            FieldId::DreamWeek => &mut answers.dream_week,
            FieldId::IdealLiving => &mut answers.ideal_living,
            FieldId::EnvironmentChanges => &mut answers.environment_changes,
            FieldId::ProgressTrackingMethod => &mut answers.progress_tracking_method,
            FieldId::DailyPlanningRoutine => &mut answers.daily_planning_routine,
            FieldId::ActionCommitment => &mut answers.action_commitment,
            FieldId::AdditionalThoughts => &mut answers.additional_thoughts,
            _ => return None,
        };
        Some(target)
    }

    /// Borrow the list backing a [`FieldKind::List`] field.
    fn list_field_mut(&mut self, field: FieldId) -> Option<&mut Vec<String>> {
        match field {
            FieldId::DailyFocus => Some(&mut self.answers.daily_focus),
            FieldId::ThingsToCut => Some(&mut self.answers.things_to_cut),
            FieldId::DailyWins => Some(&mut self.answers.daily_wins),
            _ => None,
        }
    }

    /// Enter or act on the selected field. Toggle and cycle fields change in
    /// place; everything else opens the line editor.
    pub fn activate(&mut self) {
        let field = self.selected();
        match field.kind() {
            FieldKind::Toggle => {
                self.answers.has_decided = !self.answers.has_decided;
            }
            FieldKind::FuelCycle => {
                self.answers.motivation_fuel = match self.answers.motivation_fuel {
                    None => Some(MotivationFuel::Pain),
                    Some(MotivationFuel::Pain) => Some(MotivationFuel::Pleasure),
                    Some(MotivationFuel::Pleasure) => Some(MotivationFuel::Both),
                    Some(MotivationFuel::Both) => Some(MotivationFuel::Pain),
                };
            }
            FieldKind::Text => {
                self.input = self
                    .text_field_mut(field)
                    .map(|s| s.clone())
                    .unwrap_or_default();
                self.editing = true;
            }
            FieldKind::Number => {
                self.input = self
                    .answers
                    .current_expenses
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                self.editing = true;
            }
            FieldKind::Secret => {
                self.input = self.api_key.clone();
                self.editing = true;
            }
            FieldKind::List | FieldKind::CostMap => {
                self.input.clear();
                self.editing = true;
            }
        }
    }

    /// Apply the line editor's buffer to the selected field.
    pub fn commit_edit(&mut self) {
        let field = self.selected();
        let input = std::mem::take(&mut self.input);
        self.editing = false;

        match field.kind() {
            FieldKind::Text => {
                if let Some(target) = self.text_field_mut(field) {
                    *target = input.trim().to_owned();
                }
            }
            FieldKind::Number => {
                self.answers.current_expenses = input.trim().parse::<f64>().ok();
            }
            FieldKind::Secret => {
                self.api_key = input.trim().to_owned();
            }
            FieldKind::List => {
                let entry = input.trim();
                if !entry.is_empty() {
                    if let Some(list) = self.list_field_mut(field) {
                        list.push(entry.to_owned());
                    }
                }
            }
            FieldKind::CostMap => match parse_cost_entry(&input) {
                Some((name, amount)) => {
                    self.answers.add_monthly_cost(name, amount);
                    self.error = None;
                }
                None => {
                    if !input.trim().is_empty() {
                        self.error =
                            Some("Cost items use the form: name = amount".to_owned());
                    }
                }
            },
            FieldKind::Toggle | FieldKind::FuelCycle => {}
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = false;
        self.input.clear();
    }

    /// Remove the last entry of the selected list or cost-map field.
    pub fn delete_entry(&mut self) {
        let field = self.selected();
        match field.kind() {
            FieldKind::List => {
                if let Some(list) = self.list_field_mut(field) {
                    list.pop();
                }
            }
            FieldKind::CostMap => {
                if let Some(last) = self.answers.monthly_costs.keys().next_back().cloned() {
                    self.answers.remove_monthly_cost(&last);
                }
            }
            _ => {}
        }
    }

    // -- Submission --

    /// Try to start submission. Without an API key this opens the key entry
    /// field with the fixed prompt message and makes no call.
    pub fn request_submit(&mut self) -> bool {
        if self.phase != Phase::Form || !self.flow.can_submit(&self.answers) {
            return false;
        }
        if self.api_key.trim().is_empty() {
            self.show_api_key_input = true;
            self.error = Some(MISSING_KEY_PROMPT.to_owned());
            return false;
        }
        self.error = None;
        self.phase = Phase::Submitting;
        true
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a `name = amount` cost line item.
fn parse_cost_entry(input: &str) -> Option<(String, f64)> {
    let (name, amount) = input.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let amount: f64 = amount.trim().parse().ok()?;
    Some((name.to_owned(), amount))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_step(app: &mut App) {
        // Populate whatever the current step requires.
        match app.flow.current() {
            Step::Decision => {
                app.answers.has_decided = true;
                app.answers.habits_to_cut = "late nights".into();
                app.answers.new_version_description = "focused".into();
            }
            Step::Fuel => {
                app.answers.motivation_fuel = Some(MotivationFuel::Pain);
                app.answers.fuel_description = "drifting".into();
                app.answers.daily_fuel_reminder = "note".into();
            }
            Step::DreamLife => {
                app.answers.dream_day = "calm".into();
                app.answers.dream_week = "focused".into();
                app.answers.ideal_living = "quiet".into();
            }
            Step::Focus => {
                app.answers.daily_focus = vec!["revenue".into()];
                app.answers.things_to_cut = vec!["news".into()];
                app.answers.environment_changes = "desk".into();
            }
            Step::Momentum => {
                app.answers.progress_tracking_method = "journal".into();
                app.answers.daily_wins = vec!["one call".into()];
                app.answers.daily_planning_routine = "evening".into();
                app.answers.action_commitment = "ship".into();
            }
        }
    }

    fn app_on_final_step() -> App {
        let mut app = App::new();
        for _ in 0..4 {
            fill_step(&mut app);
            app.next_step();
        }
        fill_step(&mut app);
        app
    }

    #[test]
    fn next_step_is_gated_by_validity() {
        let mut app = App::new();
        app.next_step();
        assert_eq!(app.flow.current(), Step::Decision);

        fill_step(&mut app);
        app.next_step();
        assert_eq!(app.flow.current(), Step::Fuel);
        assert_eq!(app.selected_field, 0);
    }

    #[test]
    fn toggle_and_fuel_cycle_change_in_place() {
        let mut app = App::new();
        assert_eq!(app.selected(), FieldId::HasDecided);
        app.activate();
        assert!(app.answers.has_decided);
        assert!(!app.editing);
        app.activate();
        assert!(!app.answers.has_decided);

        fill_step(&mut app);
        app.next_step();
        assert_eq!(app.selected(), FieldId::MotivationFuel);
        app.answers.motivation_fuel = None;
        app.activate();
        assert_eq!(app.answers.motivation_fuel, Some(MotivationFuel::Pain));
        app.activate();
        assert_eq!(app.answers.motivation_fuel, Some(MotivationFuel::Pleasure));
        app.activate();
        assert_eq!(app.answers.motivation_fuel, Some(MotivationFuel::Both));
        app.activate();
        assert_eq!(app.answers.motivation_fuel, Some(MotivationFuel::Pain));
    }

    #[test]
    fn text_edit_roundtrip() {
        let mut app = App::new();
        app.selected_field = 1; // HabitsToCut
        app.activate();
        assert!(app.editing);
        app.input = "doomscrolling".into();
        app.commit_edit();
        assert!(!app.editing);
        assert_eq!(app.answers.habits_to_cut, "doomscrolling");

        // Re-opening seeds the editor with the current value.
        app.activate();
        assert_eq!(app.input, "doomscrolling");
        app.cancel_edit();
        assert_eq!(app.answers.habits_to_cut, "doomscrolling");
    }

    #[test]
    fn cost_entries_update_the_dream_total() {
        let mut app = App::new();
        for _ in 0..2 {
            fill_step(&mut app);
            app.next_step();
        }
        assert_eq!(app.flow.current(), Step::DreamLife);

        app.selected_field = 3; // MonthlyCosts
        app.activate();
        app.input = "Mortgage = 2000".into();
        app.commit_edit();
        assert_eq!(app.answers.dream_expenses, Some(2000.0));

        app.activate();
        app.input = "Travel = 800".into();
        app.commit_edit();
        assert_eq!(app.answers.dream_expenses, Some(2800.0));

        app.delete_entry(); // removes "Travel" (last key in order)
        assert_eq!(app.answers.dream_expenses, Some(2000.0));

        // Malformed entry reports instead of mutating.
        app.activate();
        app.input = "just words".into();
        app.commit_edit();
        assert!(app.error.is_some());
        assert_eq!(app.answers.dream_expenses, Some(2000.0));
    }

    #[test]
    fn blank_expense_input_clears_to_unset() {
        let mut app = App::new();
        for _ in 0..2 {
            fill_step(&mut app);
            app.next_step();
        }
        app.selected_field = 4; // CurrentExpenses
        app.activate();
        app.input = "4500".into();
        app.commit_edit();
        assert_eq!(app.answers.current_expenses, Some(4500.0));

        app.activate();
        app.input.clear();
        app.commit_edit();
        assert_eq!(app.answers.current_expenses, None);
    }

    #[test]
    fn submit_without_key_prompts_and_stays_in_form() {
        let mut app = app_on_final_step();
        assert!(!app.show_api_key_input);

        assert!(!app.request_submit());
        assert_eq!(app.phase, Phase::Form);
        assert!(app.show_api_key_input);
        assert_eq!(app.error.as_deref(), Some(MISSING_KEY_PROMPT));
        assert!(app.fields().contains(&FieldId::ApiKey));
    }

    #[test]
    fn submit_with_key_enters_submitting() {
        let mut app = app_on_final_step();
        app.api_key = "sk-ant-test".into();

        assert!(app.request_submit());
        assert_eq!(app.phase, Phase::Submitting);
        assert!(app.error.is_none());
    }

    #[test]
    fn submit_is_refused_off_the_final_step() {
        let mut app = App::new();
        fill_step(&mut app);
        assert!(!app.request_submit());
        assert_eq!(app.phase, Phase::Form);
        assert!(!app.show_api_key_input);
    }

    #[test]
    fn parse_cost_entry_accepts_name_equals_amount() {
        assert_eq!(
            parse_cost_entry("Mortgage = 2000"),
            Some(("Mortgage".to_owned(), 2000.0))
        );
        assert_eq!(
            parse_cost_entry("Travel=800.50"),
            Some(("Travel".to_owned(), 800.5))
        );
        assert_eq!(parse_cost_entry("no amount"), None);
        assert_eq!(parse_cost_entry("= 100"), None);
        assert_eq!(parse_cost_entry("Travel = lots"), None);
    }
}
