//! Step gating for the five-step questionnaire.
//!
//! Each step exposes a validity predicate over a subset of the answer set;
//! advancing is only possible while the current step's predicate holds, and
//! going back is always possible except on the first step.

use crate::answers::AnswerSet;

/// Message shown when submission is attempted without an API key.
pub const MISSING_KEY_PROMPT: &str =
    "Please enter your Anthropic API key to generate your action plan.";

/// The five ordered wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Decision,
    Fuel,
    DreamLife,
    Focus,
    Momentum,
}

/// Total number of steps.
pub const TOTAL_STEPS: usize = 5;

impl Step {
    /// 1-based position, for the "Step N of 5" display.
    pub fn number(self) -> usize {
        match self {
            Self::Decision => 1,
            Self::Fuel => 2,
            Self::DreamLife => 3,
            Self::Focus => 4,
            Self::Momentum => 5,
        }
    }

    /// Display title for the step header.
    pub fn title(self) -> &'static str {
        match self {
            Self::Decision => "Decision Making",
            Self::Fuel => "Motivation Fuel",
            Self::DreamLife => "Dream Life Summary",
            Self::Focus => "Focus & Environment",
            Self::Momentum => "Momentum Building",
        }
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Self::Decision => Some(Self::Fuel),
            Self::Fuel => Some(Self::DreamLife),
            Self::DreamLife => Some(Self::Focus),
            Self::Focus => Some(Self::Momentum),
            Self::Momentum => None,
        }
    }

    pub fn previous(self) -> Option<Step> {
        match self {
            Self::Decision => None,
            Self::Fuel => Some(Self::Decision),
            Self::DreamLife => Some(Self::Fuel),
            Self::Focus => Some(Self::DreamLife),
            Self::Momentum => Some(Self::Focus),
        }
    }

    /// Whether the required fields of this step are populated.
    pub fn is_valid(self, answers: &AnswerSet) -> bool {
        match self {
            Self::Decision => {
                answers.has_decided
                    && !answers.habits_to_cut.is_empty()
                    && !answers.new_version_description.is_empty()
            }
            Self::Fuel => {
                answers.motivation_fuel.is_some()
                    && !answers.fuel_description.is_empty()
                    && !answers.daily_fuel_reminder.is_empty()
            }
            Self::DreamLife => {
                !answers.dream_day.is_empty()
                    && !answers.dream_week.is_empty()
                    && !answers.ideal_living.is_empty()
            }
            Self::Focus => {
                !answers.daily_focus.is_empty()
                    && !answers.things_to_cut.is_empty()
                    && !answers.environment_changes.is_empty()
            }
            Self::Momentum => {
                !answers.progress_tracking_method.is_empty()
                    && !answers.daily_wins.is_empty()
                    && !answers.daily_planning_routine.is_empty()
                    && !answers.action_commitment.is_empty()
            }
        }
    }
}

/// Cursor over the wizard steps with completion gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardFlow {
    current: Step,
}

impl WizardFlow {
    pub fn new() -> Self {
        Self {
            current: Step::Decision,
        }
    }

    pub fn current(&self) -> Step {
        self.current
    }

    /// Whether "Next" is enabled: not on the last step, and the current
    /// step's required fields are populated.
    pub fn can_advance(&self, answers: &AnswerSet) -> bool {
        self.current.next().is_some() && self.current.is_valid(answers)
    }

    /// Move to the next step if gating allows it. Returns whether it moved.
    pub fn advance(&mut self, answers: &AnswerSet) -> bool {
        if !self.current.is_valid(answers) {
            return false;
        }
        match self.current.next() {
            Some(next) => {
                self.current = next;
                true
            }
            None => false,
        }
    }

    /// Whether "Previous" is enabled: everywhere except step 1.
    pub fn can_go_back(&self) -> bool {
        self.current.previous().is_some()
    }

    /// Move to the previous step. Returns whether it moved.
    pub fn back(&mut self) -> bool {
        match self.current.previous() {
            Some(prev) => {
                self.current = prev;
                true
            }
            None => false,
        }
    }

    /// Whether submission is available: on the final step with its fields
    /// populated. The API-key requirement is checked separately at submit
    /// time so the key prompt can be surfaced.
    pub fn can_submit(&self, answers: &AnswerSet) -> bool {
        self.current == Step::Momentum && self.current.is_valid(answers)
    }
}

impl Default for WizardFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreamplan_db::models::MotivationFuel;

    /// An answer set that satisfies every step.
    fn complete_answers() -> AnswerSet {
        let mut answers = AnswerSet::default();
        answers.has_decided = true;
        answers.habits_to_cut = "late nights".into();
        answers.new_version_description = "focused".into();
        answers.motivation_fuel = Some(MotivationFuel::Pleasure);
        answers.fuel_description = "freedom".into();
        answers.daily_fuel_reminder = "mirror note".into();
        answers.dream_day = "write in the morning".into();
        answers.dream_week = "four-day weeks".into();
        answers.ideal_living = "quiet house".into();
        answers.daily_focus = vec!["revenue".into()];
        answers.things_to_cut = vec!["news".into()];
        answers.environment_changes = "phone in a drawer".into();
        answers.progress_tracking_method = "journal".into();
        answers.daily_wins = vec!["one call".into()];
        answers.daily_planning_routine = "evening list".into();
        answers.action_commitment = "ship weekly".into();
        answers
    }

    #[test]
    fn step_one_requires_flag_and_both_strings() {
        let mut answers = AnswerSet::default();
        assert!(!Step::Decision.is_valid(&answers));

        answers.has_decided = true;
        answers.habits_to_cut = "x".into();
        assert!(!Step::Decision.is_valid(&answers));

        answers.new_version_description = "y".into();
        assert!(Step::Decision.is_valid(&answers));

        answers.has_decided = false;
        assert!(!Step::Decision.is_valid(&answers));
    }

    #[test]
    fn step_two_requires_fuel_selection() {
        let mut answers = complete_answers();
        assert!(Step::Fuel.is_valid(&answers));

        answers.motivation_fuel = None;
        assert!(!Step::Fuel.is_valid(&answers));
    }

    #[test]
    fn step_four_requires_both_arrays_and_text() {
        let mut answers = complete_answers();
        assert!(Step::Focus.is_valid(&answers));

        answers.daily_focus.clear();
        assert!(!Step::Focus.is_valid(&answers));

        answers.daily_focus = vec!["a".into()];
        answers.things_to_cut.clear();
        assert!(!Step::Focus.is_valid(&answers));

        answers.things_to_cut = vec!["b".into()];
        answers.environment_changes.clear();
        assert!(!Step::Focus.is_valid(&answers));
    }

    #[test]
    fn step_five_requires_all_four_fields() {
        let mut answers = complete_answers();
        assert!(Step::Momentum.is_valid(&answers));

        for strip in 0..4 {
            let mut a = complete_answers();
            match strip {
                0 => a.progress_tracking_method.clear(),
                1 => a.daily_wins.clear(),
                2 => a.daily_planning_routine.clear(),
                _ => a.action_commitment.clear(),
            }
            assert!(!Step::Momentum.is_valid(&a), "variant {strip} should gate");
        }

        answers.additional_thoughts.clear();
        assert!(
            Step::Momentum.is_valid(&answers),
            "additional thoughts are optional"
        );
    }

    #[test]
    fn advance_is_blocked_until_step_is_valid() {
        let mut flow = WizardFlow::new();
        let mut answers = AnswerSet::default();

        assert!(!flow.can_advance(&answers));
        assert!(!flow.advance(&answers));
        assert_eq!(flow.current(), Step::Decision);

        answers.has_decided = true;
        answers.habits_to_cut = "x".into();
        answers.new_version_description = "y".into();
        assert!(flow.can_advance(&answers));
        assert!(flow.advance(&answers));
        assert_eq!(flow.current(), Step::Fuel);
    }

    #[test]
    fn back_is_blocked_on_first_step_only() {
        let mut flow = WizardFlow::new();
        assert!(!flow.can_go_back());
        assert!(!flow.back());

        let answers = complete_answers();
        assert!(flow.advance(&answers));
        assert!(flow.can_go_back());
        assert!(flow.back());
        assert_eq!(flow.current(), Step::Decision);
    }

    #[test]
    fn full_walk_reaches_submit() {
        let mut flow = WizardFlow::new();
        let answers = complete_answers();

        for _ in 0..4 {
            assert!(!flow.can_submit(&answers));
            assert!(flow.advance(&answers));
        }
        assert_eq!(flow.current(), Step::Momentum);
        assert!(!flow.can_advance(&answers), "no next step on the last step");
        assert!(!flow.advance(&answers));
        assert!(flow.can_submit(&answers));
    }

    #[test]
    fn submit_is_gated_by_final_step_validity() {
        let mut flow = WizardFlow::new();
        let mut answers = complete_answers();
        for _ in 0..4 {
            flow.advance(&answers);
        }

        answers.action_commitment.clear();
        assert!(!flow.can_submit(&answers));
    }
}
