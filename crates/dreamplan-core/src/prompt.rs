//! The fixed analysis prompt.
//!
//! Interpolates every answer-set field into a template that also pins the
//! exact JSON shape the model must return. The section names here are load
//! bearing: the results page and the analyses projection read them.

use crate::answers::PlanData;

/// Build the user-role prompt for one plan snapshot.
pub fn build_prompt(plan: &PlanData) -> String {
    let fuel = plan
        .motivation_fuel
        .map(|f| f.to_string())
        .unwrap_or_default();

    format!(
        r#"You are an expert life coach and strategist analyzing a comprehensive life plan based on Sabri Suby's "Ambitious But Lazy" framework. Your task is to provide a detailed, personalized action plan.

Here is the user's complete plan:

## 1. DECISION MAKING
- Has decided: {has_decided}
- Habits to cut off: {habits_to_cut}
- New version description: {new_version_description}

## 2. MOTIVATION FUEL
- Fuel type: {fuel}
- Fuel description: {fuel_description}
- Daily reminder method: {daily_fuel_reminder}

## 3. DREAM LIFE SUMMARY
- Dream day: {dream_day}
- Dream week: {dream_week}
- Ideal living: {ideal_living}
- Current expenses: ${current_expenses}/month
- Dream expenses: ${dream_expenses}/month
- Financial gap: ${financial_gap}/month

## 4. FOCUS & ENVIRONMENT
- Daily focus areas: {daily_focus}
- Things to cut out: {things_to_cut}
- Environment changes: {environment_changes}

## 5. MOMENTUM BUILDING
- Progress tracking: {progress_tracking_method}
- Daily wins to celebrate: {daily_wins}
- Daily planning routine: {daily_planning_routine}
- Action commitment: {action_commitment}

## ADDITIONAL THOUGHTS
{additional_thoughts}

Based on this comprehensive information, provide a detailed analysis in the following JSON format:

{{
  "win_ticker": ["array of 5-7 quick daily wins to track"],
  "dream_life_summary": "A compelling 2-3 paragraph synthesis of their dream life vision",
  "focus_areas": ["array of 3-5 main areas they must focus on with specific actions"],
  "cut_out_items": ["array of 3-5 specific things they must eliminate (decidere - to cut off)"],
  "action_steps": {{
    "week_1": ["specific actions for week 1"],
    "month_1": ["specific milestones for month 1"],
    "month_3": ["specific milestones for month 3"],
    "month_6": ["specific milestones for month 6"]
  }},
  "momentum_strategy": "Detailed paragraph on how to build and maintain momentum",
  "environment_blueprint": "Detailed paragraph on how to engineer their environment for success",
  "decision_analysis": "Analysis of their commitment level and what cutting off the old self really means",
  "fuel_strategy": "How to leverage their pain/pleasure fuel daily",
  "financial_roadmap": "Specific strategy to close the ${financial_gap}/month gap",
  "key_insights": ["array of 3-5 powerful insights based on their specific situation"],
  "potential_obstacles": ["array of 3-4 likely obstacles and how to overcome them"],
  "accountability_system": "Recommended accountability and tracking system"
}}

Be specific, actionable, and motivating. Reference their exact goals and situation."#,
        has_decided = if plan.has_decided { "Yes" } else { "No" },
        habits_to_cut = plan.habits_to_cut,
        new_version_description = plan.new_version_description,
        fuel = fuel,
        fuel_description = plan.fuel_description,
        daily_fuel_reminder = plan.daily_fuel_reminder,
        dream_day = plan.dream_day,
        dream_week = plan.dream_week,
        ideal_living = plan.ideal_living,
        current_expenses = plan.current_expenses,
        dream_expenses = plan.dream_expenses,
        financial_gap = plan.financial_gap,
        daily_focus = plan.daily_focus.join(", "),
        things_to_cut = plan.things_to_cut.join(", "),
        environment_changes = plan.environment_changes,
        progress_tracking_method = plan.progress_tracking_method,
        daily_wins = plan.daily_wins.join(", "),
        daily_planning_routine = plan.daily_planning_routine,
        action_commitment = plan.action_commitment,
        additional_thoughts = plan.additional_thoughts,
    )
}
