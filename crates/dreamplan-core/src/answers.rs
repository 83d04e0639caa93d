//! The answer set: every field the five-step questionnaire collects, plus
//! the derived financial figures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use dreamplan_db::models::MotivationFuel;

/// The in-progress answer set for one planning session.
///
/// Created empty at session start and mutated field by field by the wizard.
/// The two expense totals are `Option` so "not yet entered" is representable
/// and distinct from an explicit zero; all arithmetic coerces `None` to `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerSet {
    // Step 1: decision making.
    pub has_decided: bool,
    pub habits_to_cut: String,
    pub new_version_description: String,

    // Step 2: motivation fuel.
    pub motivation_fuel: Option<MotivationFuel>,
    pub fuel_description: String,
    pub daily_fuel_reminder: String,

    // Step 3: dream life summary.
    pub dream_day: String,
    pub dream_week: String,
    pub ideal_living: String,
    pub monthly_costs: BTreeMap<String, f64>,
    pub current_expenses: Option<f64>,
    pub dream_expenses: Option<f64>,

    // Step 4: focus and environment.
    pub daily_focus: Vec<String>,
    pub things_to_cut: Vec<String>,
    pub environment_changes: String,

    // Step 5: momentum building.
    pub progress_tracking_method: String,
    pub daily_wins: Vec<String>,
    pub daily_planning_routine: String,
    pub action_commitment: String,
    pub additional_thoughts: String,
}

impl AnswerSet {
    /// Add (or replace) a monthly cost line item and recompute the dream
    /// total as the sum of all line items.
    pub fn add_monthly_cost(&mut self, name: impl Into<String>, amount: f64) {
        self.monthly_costs.insert(name.into(), amount);
        self.recompute_dream_expenses();
    }

    /// Remove a monthly cost line item and recompute the dream total.
    /// Unknown names are a no-op.
    pub fn remove_monthly_cost(&mut self, name: &str) {
        if self.monthly_costs.remove(name).is_some() {
            self.recompute_dream_expenses();
        }
    }

    fn recompute_dream_expenses(&mut self) {
        self.dream_expenses = Some(self.monthly_costs.values().sum());
    }

    /// dream minus current monthly expenses. May be negative; never clamped.
    pub fn financial_gap(&self) -> f64 {
        self.dream_expenses.unwrap_or(0.0) - self.current_expenses.unwrap_or(0.0)
    }

    /// Freeze the current answers into a submission snapshot, recomputing
    /// the financial gap from the latest totals.
    pub fn snapshot(&self) -> PlanData {
        PlanData {
            has_decided: self.has_decided,
            habits_to_cut: self.habits_to_cut.clone(),
            new_version_description: self.new_version_description.clone(),
            motivation_fuel: self.motivation_fuel,
            fuel_description: self.fuel_description.clone(),
            daily_fuel_reminder: self.daily_fuel_reminder.clone(),
            dream_day: self.dream_day.clone(),
            dream_week: self.dream_week.clone(),
            ideal_living: self.ideal_living.clone(),
            monthly_costs: self.monthly_costs.clone(),
            current_expenses: self.current_expenses.unwrap_or(0.0),
            dream_expenses: self.dream_expenses.unwrap_or(0.0),
            financial_gap: self.financial_gap(),
            daily_focus: self.daily_focus.clone(),
            things_to_cut: self.things_to_cut.clone(),
            environment_changes: self.environment_changes.clone(),
            progress_tracking_method: self.progress_tracking_method.clone(),
            daily_wins: self.daily_wins.clone(),
            daily_planning_routine: self.daily_planning_routine.clone(),
            action_commitment: self.action_commitment.clone(),
            additional_thoughts: self.additional_thoughts.clone(),
        }
    }
}

/// Immutable submission snapshot of an answer set, carrying the computed
/// financial gap. This is the wire shape the relay accepts and the shape
/// persisted into a plan row.
///
/// Every field is defaulted on deserialisation -- the relay performs no
/// shape validation beyond the credential check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanData {
    pub has_decided: bool,
    pub habits_to_cut: String,
    pub new_version_description: String,
    pub motivation_fuel: Option<MotivationFuel>,
    pub fuel_description: String,
    pub daily_fuel_reminder: String,
    pub dream_day: String,
    pub dream_week: String,
    pub ideal_living: String,
    pub monthly_costs: BTreeMap<String, f64>,
    pub current_expenses: f64,
    pub dream_expenses: f64,
    pub financial_gap: f64,
    pub daily_focus: Vec<String>,
    pub things_to_cut: Vec<String>,
    pub environment_changes: String,
    pub progress_tracking_method: String,
    pub daily_wins: Vec<String>,
    pub daily_planning_routine: String,
    pub action_commitment: String,
    pub additional_thoughts: String,
}
