//! Operator-mode CLI handlers for `dreamplan plan` subcommands.
//!
//! Implements:
//! - `dreamplan plan show`           -- list all plans
//! - `dreamplan plan show <plan-id>` -- show one plan and its analysis

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use dreamplan_db::queries::{analyses as analysis_queries, plans as plan_queries};

use crate::PlanCommands;
use crate::render::render_analysis;

// -----------------------------------------------------------------------
// Public entry point
// -----------------------------------------------------------------------

/// Dispatch a `PlanCommands` variant to the appropriate handler.
pub async fn run_plan_command(command: PlanCommands, pool: &PgPool) -> Result<()> {
    match command {
        PlanCommands::Show { plan_id } => match plan_id {
            Some(id) => cmd_show_one(pool, &id).await,
            None => cmd_show_all(pool).await,
        },
    }
}

// -----------------------------------------------------------------------
// dreamplan plan show (list all)
// -----------------------------------------------------------------------

/// List all plans with summary info.
async fn cmd_show_all(pool: &PgPool) -> Result<()> {
    let plans = plan_queries::list_plans(pool).await?;

    if plans.is_empty() {
        println!("No plans found. Use `dreamplan wizard` to create one.");
        return Ok(());
    }

    // Compute column widths for a clean table.
    // ID is always 36 chars (UUID). Status max is 9 (analyzing/completed).
    let id_w = 36;
    let status_w = 9;
    let gap_w = 12;

    // Header
    println!(
        "{:<id_w$}  {:<status_w$}  {:>gap_w$}  CREATED",
        "ID", "STATUS", "GAP/MONTH",
    );

    // Rows
    for plan in &plans {
        let created = plan.created_at.format("%Y-%m-%d %H:%M");
        println!(
            "{:<id_w$}  {:<status_w$}  {:>gap_w$.2}  {}",
            plan.id, plan.status, plan.financial_gap, created,
        );
    }

    Ok(())
}

// -----------------------------------------------------------------------
// dreamplan plan show <plan-id>
// -----------------------------------------------------------------------

/// Show detailed info for a single plan, including its analysis if present.
async fn cmd_show_one(pool: &PgPool, plan_id_str: &str) -> Result<()> {
    let plan_id: Uuid = plan_id_str
        .parse()
        .with_context(|| format!("invalid plan ID: {:?}", plan_id_str))?;

    let plan = plan_queries::get_plan(pool, plan_id)
        .await?
        .with_context(|| format!("plan {plan_id} not found"))?;

    // Plan header.
    println!("Plan {}", plan.id);
    println!("  Status:       {}", plan.status);
    println!(
        "  Created:      {}",
        plan.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(completed) = plan.completed_at {
        println!(
            "  Completed:    {}",
            completed.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    println!();

    println!("Answers:");
    println!(
        "  Has decided:       {}",
        if plan.has_decided { "yes" } else { "no" }
    );
    println!("  Habits to cut:     {}", plan.habits_to_cut);
    println!("  New version:       {}", plan.new_version_description);
    match plan.motivation_fuel {
        Some(fuel) => println!("  Motivation fuel:   {fuel}"),
        None => println!("  Motivation fuel:   (not set)"),
    }
    println!("  Fuel description:  {}", plan.fuel_description);
    println!("  Daily reminder:    {}", plan.daily_fuel_reminder);
    println!("  Dream day:         {}", plan.dream_day);
    println!("  Dream week:        {}", plan.dream_week);
    println!("  Ideal living:      {}", plan.ideal_living);

    if !plan.monthly_costs.0.is_empty() {
        println!("  Monthly costs:");
        for (name, amount) in plan.monthly_costs.0.iter() {
            println!("    {name}: ${amount:.2}");
        }
    }
    match plan.current_expenses {
        Some(v) => println!("  Current expenses:  ${v:.2}/month"),
        None => println!("  Current expenses:  (not entered)"),
    }
    match plan.dream_expenses {
        Some(v) => println!("  Dream expenses:    ${v:.2}/month"),
        None => println!("  Dream expenses:    (not entered)"),
    }
    println!("  Financial gap:     ${:.2}/month", plan.financial_gap);
    println!("  Daily focus:       {}", plan.daily_focus.join(", "));
    println!("  Things to cut:     {}", plan.things_to_cut.join(", "));
    println!("  Environment:       {}", plan.environment_changes);
    println!("  Tracking method:   {}", plan.progress_tracking_method);
    println!("  Daily wins:        {}", plan.daily_wins.join(", "));
    println!("  Planning routine:  {}", plan.daily_planning_routine);
    println!("  Commitment:        {}", plan.action_commitment);
    if !plan.additional_thoughts.is_empty() {
        println!("  Additional:        {}", plan.additional_thoughts);
    }

    // Linked analysis, if any.
    match analysis_queries::get_analysis_for_plan(pool, plan_id).await? {
        Some(analysis) => {
            println!();
            print!("{}", render_analysis(&analysis.content.0));
        }
        None => {
            println!();
            println!("No analysis stored for this plan yet.");
        }
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    #[test]
    fn parse_valid_uuid() {
        let id = "550e8400-e29b-41d4-a716-446655440000";
        let parsed: Uuid = id.parse().unwrap();
        assert_eq!(parsed.to_string(), id);
    }

    #[test]
    fn parse_invalid_uuid() {
        let id = "not-a-uuid";
        let result: Result<Uuid, _> = id.parse();
        assert!(result.is_err());
    }
}
