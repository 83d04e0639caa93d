//! Database query functions for the `plans` table.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::{MotivationFuel, Plan, PlanStatus};

/// Parameters for inserting a new plan row.
///
/// One field per answer, borrowed from the caller's snapshot. The row is
/// created with the server default status (`draft`).
#[derive(Debug, Clone)]
pub struct NewPlan<'a> {
    pub has_decided: bool,
    pub habits_to_cut: &'a str,
    pub new_version_description: &'a str,
    pub motivation_fuel: Option<MotivationFuel>,
    pub fuel_description: &'a str,
    pub daily_fuel_reminder: &'a str,
    pub dream_day: &'a str,
    pub dream_week: &'a str,
    pub ideal_living: &'a str,
    pub monthly_costs: &'a BTreeMap<String, f64>,
    pub current_expenses: Option<f64>,
    pub dream_expenses: Option<f64>,
    pub financial_gap: f64,
    pub daily_focus: &'a [String],
    pub things_to_cut: &'a [String],
    pub environment_changes: &'a str,
    pub progress_tracking_method: &'a str,
    pub daily_wins: &'a [String],
    pub daily_planning_routine: &'a str,
    pub action_commitment: &'a str,
    pub additional_thoughts: &'a str,
}

/// Insert a new plan row. Returns the inserted plan with server-generated
/// defaults (id, created_at, status).
pub async fn insert_plan(pool: &PgPool, new: &NewPlan<'_>) -> Result<Plan> {
    let plan = sqlx::query_as::<_, Plan>(
        "INSERT INTO plans ( \
             has_decided, habits_to_cut, new_version_description, \
             motivation_fuel, fuel_description, daily_fuel_reminder, \
             dream_day, dream_week, ideal_living, \
             monthly_costs, current_expenses, dream_expenses, financial_gap, \
             daily_focus, things_to_cut, environment_changes, \
             progress_tracking_method, daily_wins, daily_planning_routine, \
             action_commitment, additional_thoughts \
         ) VALUES ( \
             $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, \
             $15, $16, $17, $18, $19, $20, $21 \
         ) \
         RETURNING *",
    )
    .bind(new.has_decided)
    .bind(new.habits_to_cut)
    .bind(new.new_version_description)
    .bind(new.motivation_fuel)
    .bind(new.fuel_description)
    .bind(new.daily_fuel_reminder)
    .bind(new.dream_day)
    .bind(new.dream_week)
    .bind(new.ideal_living)
    .bind(Json(new.monthly_costs))
    .bind(new.current_expenses)
    .bind(new.dream_expenses)
    .bind(new.financial_gap)
    .bind(new.daily_focus)
    .bind(new.things_to_cut)
    .bind(new.environment_changes)
    .bind(new.progress_tracking_method)
    .bind(new.daily_wins)
    .bind(new.daily_planning_routine)
    .bind(new.action_commitment)
    .bind(new.additional_thoughts)
    .fetch_one(pool)
    .await
    .context("failed to insert plan")?;

    Ok(plan)
}

/// Fetch a plan by its ID.
pub async fn get_plan(pool: &PgPool, id: Uuid) -> Result<Option<Plan>> {
    let plan = sqlx::query_as::<_, Plan>("SELECT * FROM plans WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch plan")?;

    Ok(plan)
}

/// List all plans, ordered by creation time (newest first).
pub async fn list_plans(pool: &PgPool) -> Result<Vec<Plan>> {
    let plans = sqlx::query_as::<_, Plan>("SELECT * FROM plans ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
        .context("failed to list plans")?;

    Ok(plans)
}

/// Update the status of a plan.
///
/// Stamps `completed_at` on the transition to `completed`, without ever
/// overwriting an existing timestamp.
pub async fn update_plan_status(pool: &PgPool, id: Uuid, status: PlanStatus) -> Result<()> {
    let result = sqlx::query(
        "UPDATE plans \
         SET status = $1, \
             completed_at = CASE \
                 WHEN $1 = 'completed' THEN COALESCE(completed_at, now()) \
                 ELSE completed_at \
             END \
         WHERE id = $2",
    )
    .bind(status)
    .bind(id)
    .execute(pool)
    .await
    .context("failed to update plan status")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("plan {id} not found");
    }

    Ok(())
}
