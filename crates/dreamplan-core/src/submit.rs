//! Client-side submission sequence.
//!
//! Three side-effecting steps, strictly sequential, each awaited before the
//! next: persist a draft plan, call the relay once over HTTP, persist the
//! returned analysis and mark the plan completed. A failure at any step
//! aborts the rest with no rollback -- a plan stuck in `analyzing` is an
//! accepted terminal state, and a manual re-submit starts over with a fresh
//! draft row.

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use dreamplan_db::models::{Plan, PlanStatus};
use dreamplan_db::queries::analyses::{self, NewAnalysis};
use dreamplan_db::queries::plans::{self, NewPlan};

use crate::answers::{AnswerSet, PlanData};
use crate::relay::{AnalyzeRequest, AnalyzeResponse};

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub plan_id: Uuid,
    pub analysis: Value,
}

fn new_plan_from<'a>(data: &'a PlanData) -> NewPlan<'a> {
    NewPlan {
        has_decided: data.has_decided,
        habits_to_cut: &data.habits_to_cut,
        new_version_description: &data.new_version_description,
        motivation_fuel: data.motivation_fuel,
        fuel_description: &data.fuel_description,
        daily_fuel_reminder: &data.daily_fuel_reminder,
        dream_day: &data.dream_day,
        dream_week: &data.dream_week,
        ideal_living: &data.ideal_living,
        monthly_costs: &data.monthly_costs,
        current_expenses: Some(data.current_expenses),
        dream_expenses: Some(data.dream_expenses),
        financial_gap: data.financial_gap,
        daily_focus: &data.daily_focus,
        things_to_cut: &data.things_to_cut,
        environment_changes: &data.environment_changes,
        progress_tracking_method: &data.progress_tracking_method,
        daily_wins: &data.daily_wins,
        daily_planning_routine: &data.daily_planning_routine,
        action_commitment: &data.action_commitment,
        additional_thoughts: &data.additional_thoughts,
    }
}

/// Run the full submission sequence for one answer set.
///
/// `relay_url` is the base URL of a running `dreamplan serve` instance.
pub async fn submit_plan(
    pool: &PgPool,
    http: &reqwest::Client,
    relay_url: &str,
    answers: &AnswerSet,
    api_key: &str,
) -> Result<SubmissionOutcome> {
    let data = answers.snapshot();

    // 1. Persist the draft record, then mark it analyzing.
    let plan: Plan = plans::insert_plan(pool, &new_plan_from(&data)).await?;
    plans::update_plan_status(pool, plan.id, PlanStatus::Analyzing).await?;
    info!(plan_id = %plan.id, "plan submitted, requesting analysis");

    // 2. Exactly one relay call.
    let url = format!("{}/analyze", relay_url.trim_end_matches('/'));
    let request = AnalyzeRequest {
        plan_data: data,
        anthropic_api_key: Some(api_key.to_owned()),
    };
    let response = http
        .post(&url)
        .json(&request)
        .send()
        .await
        .with_context(|| format!("failed to reach the analysis relay at {url}"))?;

    if !response.status().is_success() {
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_owned))
            .unwrap_or_else(|| "Failed to analyze plan".to_owned());
        return Err(anyhow!(message));
    }

    let AnalyzeResponse { analysis } = response
        .json()
        .await
        .context("relay returned a malformed success body")?;

    // 3. Persist the analysis, then mark the plan completed.
    analyses::insert_analysis(
        pool,
        &NewAnalysis {
            plan_id: plan.id,
            content: &analysis,
        },
    )
    .await?;
    plans::update_plan_status(pool, plan.id, PlanStatus::Completed).await?;
    info!(plan_id = %plan.id, "analysis stored, plan completed");

    Ok(SubmissionOutcome {
        plan_id: plan.id,
        analysis,
    })
}
